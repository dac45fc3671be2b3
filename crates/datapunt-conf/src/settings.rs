//! Serializer settings

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Prefix used by [`ShaperSettings::with_env_overrides`] callers by default
pub const DEFAULT_ENV_PREFIX: &str = "DATAPUNT_";

/// Error type for loading and validating settings
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("Invalid setting '{key}': {message}")]
	Invalid { key: &'static str, message: String },
}

/// Settings shared by every serializer of an API
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShaperSettings {
	/// Dataset name stamped on every rendered object, if any
	pub dataset: Option<String>,

	/// Name of the HAL links field
	pub links_field_name: String,

	/// Name of the display-string field
	pub display_field_name: String,

	/// Scheme and host used to make links absolute
	pub base_url: Option<String>,
}

impl Default for ShaperSettings {
	fn default() -> Self {
		Self {
			dataset: None,
			links_field_name: String::from("_links"),
			display_field_name: String::from("_display"),
			base_url: None,
		}
	}
}

impl ShaperSettings {
	/// Parse and validate settings from TOML text
	pub fn from_toml_str(text: &str) -> Result<Self, SettingsError> {
		let settings: Self = toml::from_str(text)?;
		settings.validate()?;
		Ok(settings)
	}

	/// Read, parse and validate a TOML settings file
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
		let path = path.as_ref();
		tracing::debug!("Loading serializer settings from {}", path.display());
		let text = fs::read_to_string(path)?;
		Self::from_toml_str(&text)
	}

	/// Apply `<prefix>DATASET`, `<prefix>BASE_URL` and
	/// `<prefix>LINKS_FIELD_NAME` from the process environment
	pub fn with_env_overrides(self, prefix: &str) -> Result<Self, SettingsError> {
		self.with_overrides_from(prefix, |key| std::env::var(key).ok())
	}

	/// Apply overrides from an arbitrary variable lookup
	pub fn with_overrides_from<F>(mut self, prefix: &str, lookup: F) -> Result<Self, SettingsError>
	where
		F: Fn(&str) -> Option<String>,
	{
		let key = |name: &str| format!("{}{}", prefix, name);

		if let Some(dataset) = lookup(&key("DATASET")) {
			self.dataset = Some(dataset);
		}
		if let Some(base_url) = lookup(&key("BASE_URL")) {
			self.base_url = Some(base_url);
		}
		if let Some(name) = lookup(&key("LINKS_FIELD_NAME")) {
			self.links_field_name = name;
		}

		self.validate()?;
		Ok(self)
	}

	/// Check field names are non-empty and the base URL is absolute
	pub fn validate(&self) -> Result<(), SettingsError> {
		if self.links_field_name.trim().is_empty() {
			return Err(SettingsError::Invalid {
				key: "links_field_name",
				message: "must not be empty".to_string(),
			});
		}
		if self.display_field_name.trim().is_empty() {
			return Err(SettingsError::Invalid {
				key: "display_field_name",
				message: "must not be empty".to_string(),
			});
		}
		if matches!(&self.dataset, Some(d) if d.trim().is_empty()) {
			return Err(SettingsError::Invalid {
				key: "dataset",
				message: "must not be empty when set".to_string(),
			});
		}
		if let Some(base_url) = &self.base_url {
			let parsed = url::Url::parse(base_url).map_err(|e| SettingsError::Invalid {
				key: "base_url",
				message: e.to_string(),
			})?;
			if parsed.cannot_be_a_base() {
				return Err(SettingsError::Invalid {
					key: "base_url",
					message: format!("'{}' cannot be used as a base URL", base_url),
				});
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::collections::HashMap;

	#[test]
	fn test_defaults() {
		let settings = ShaperSettings::default();
		assert_eq!(settings.links_field_name, "_links");
		assert_eq!(settings.display_field_name, "_display");
		assert!(settings.dataset.is_none());
		assert!(settings.validate().is_ok());
	}

	#[test]
	fn test_empty_toml_uses_defaults() {
		let settings = ShaperSettings::from_toml_str("").unwrap();
		assert_eq!(settings, ShaperSettings::default());
	}

	#[test]
	fn test_unknown_key_rejected() {
		let result = ShaperSettings::from_toml_str("datset = \"bag\"");
		assert!(matches!(result, Err(SettingsError::Toml(_))));
	}

	#[test]
	fn test_overrides_from_lookup() {
		let vars: HashMap<&str, &str> = [
			("DATAPUNT_DATASET", "gebieden"),
			("DATAPUNT_BASE_URL", "https://acc.api.data.amsterdam.nl"),
		]
		.into_iter()
		.collect();

		let settings = ShaperSettings::default()
			.with_overrides_from(DEFAULT_ENV_PREFIX, |k| vars.get(k).map(|v| v.to_string()))
			.unwrap();

		assert_eq!(settings.dataset.as_deref(), Some("gebieden"));
		assert_eq!(
			settings.base_url.as_deref(),
			Some("https://acc.api.data.amsterdam.nl")
		);
		assert_eq!(settings.links_field_name, "_links");
	}

	#[test]
	fn test_invalid_base_url() {
		let err = ShaperSettings::from_toml_str("base_url = \"not a url\"").unwrap_err();
		assert!(matches!(
			err,
			SettingsError::Invalid {
				key: "base_url",
				..
			}
		));
	}

	#[test]
	fn test_cannot_be_a_base_url() {
		let err =
			ShaperSettings::from_toml_str("base_url = \"mailto:info@example.com\"").unwrap_err();
		assert!(matches!(
			err,
			SettingsError::Invalid {
				key: "base_url",
				..
			}
		));
	}
}
