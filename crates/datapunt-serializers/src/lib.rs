//! Serializers for Datapunt style HAL-JSON APIs
//!
//! Each rule is a small, stateless transformation from a record (plus a
//! read-only [`RequestContext`](datapunt_core::RequestContext)) to a JSON
//! fragment:
//!
//! - [`links`]: `{"self": {"href": ...}}` envelopes ([`get_links`],
//!   [`LinksField`], [`SelfLinkField`])
//! - [`dataset`]: stamping the source dataset on an object ([`with_dataset`])
//! - [`related`]: count + filtered list link for reverse relations
//! - [`display`]: the record's display string
//! - [`geometry`]: GeoJSON passthrough for optional geometries
//!
//! [`ResponseShaper`] composes the rules into a pipeline; [`HalSerializer`]
//! is a shaper with a `_links` field in front.

pub mod dataset;
pub mod display;
pub mod field;
pub mod geometry;
pub mod links;
pub mod related;
pub mod shaper;

pub use dataset::with_dataset;
pub use display::DisplayField;
pub use field::{Field, MethodField};
pub use geometry::{GeoJsonSource, GeometryField, decode_geometry};
pub use links::{LinksField, SelfLinkField, get_links};
pub use related::{RelatedCollection, RelatedSet, RelatedSummaryField, related_summary};
pub use shaper::{HalSerializer, ResponseShaper, ShaperConfig};
