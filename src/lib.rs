//! # Datapunt
//!
//! HAL-JSON response shaping for REST APIs, inspired by the Datapunt
//! extensions to Django REST Framework.
//!
//! Records are rendered into JSON objects by composing small, stateless
//! rules instead of overriding serializer hooks:
//!
//! - a `_links` envelope with a `self` link to the record's detail view
//! - a `dataset` tag naming the source of the data
//! - related-collection summaries (`count` + filtered list link)
//! - a `_display` string taken from the record's `Display` implementation
//! - GeoJSON passthrough for optional geometries
//!
//! ## Quick Example
//!
//! ```
//! use datapunt::prelude::*;
//! use serde_json::{Value, json};
//! use std::sync::Arc;
//!
//! struct Pand {
//!     id: i64,
//! }
//!
//! impl Record for Pand {
//!     fn primary_key(&self) -> Option<Value> {
//!         Some(json!(self.id))
//!     }
//! }
//!
//! let routes = RouteTable::new().route("pand-detail", "/bag/pand/{pk}/");
//! let ctx = RequestContext::new(Arc::new(routes));
//!
//! let config = ShaperConfig::default().dataset("bag");
//! let serializer = HalSerializer::<Pand>::hal("pand-detail", config);
//! let object = serializer.shape(&Pand { id: 1 }, &ctx).unwrap();
//!
//! assert_eq!(
//!     Value::Object(object),
//!     json!({"_links": {"self": {"href": "/bag/pand/1/"}}, "dataset": "bag"})
//! );
//! ```
//!
//! ## Feature Flags
//!
//! - `geo` (default) - GeoJSON encoding of `geo-types` geometries via `geozero`

pub use datapunt_conf as conf;
pub use datapunt_core as core;
pub use datapunt_serializers as serializers;

pub use datapunt_conf::{SettingsError, ShaperSettings};
pub use datapunt_core::{
	DecodeError, Error, Kwargs, MalformedFilterError, Record, RenderedObject, RequestContext,
	ResolutionError, Result, RouteTable, UrlReverser, ViewContext,
};
pub use datapunt_serializers::{
	DisplayField, Field, GeoJsonSource, GeometryField, HalSerializer, LinksField, MethodField,
	RelatedCollection, RelatedSet, RelatedSummaryField, ResponseShaper, SelfLinkField,
	ShaperConfig, decode_geometry, get_links, related_summary, with_dataset,
};

/// Convenience re-exports for building serializers
pub mod prelude {
	pub use crate::{
		DisplayField, Error, Field, GeoJsonSource, GeometryField, HalSerializer, Kwargs,
		LinksField, MethodField, Record, RelatedCollection, RelatedSet, RelatedSummaryField,
		RenderedObject, RequestContext, ResponseShaper, Result, RouteTable, SelfLinkField,
		ShaperConfig, ShaperSettings, UrlReverser, ViewContext, get_links, related_summary,
		with_dataset,
	};
}
