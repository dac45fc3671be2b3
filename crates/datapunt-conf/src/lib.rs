//! # Datapunt Conf
//!
//! Settings for the HAL-JSON serializers, layered in priority order:
//! environment variables > TOML file > defaults.
//!
//! ```
//! use datapunt_conf::ShaperSettings;
//!
//! let settings = ShaperSettings::from_toml_str(r#"
//!     dataset = "bag"
//!     base_url = "https://api.data.amsterdam.nl"
//! "#).unwrap();
//!
//! assert_eq!(settings.dataset.as_deref(), Some("bag"));
//! assert_eq!(settings.links_field_name, "_links");
//! ```

pub mod settings;

pub use settings::{DEFAULT_ENV_PREFIX, SettingsError, ShaperSettings};
