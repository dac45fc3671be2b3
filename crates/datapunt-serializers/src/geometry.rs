//! GeoJSON geometry passthrough
//!
//! Geometries are encoded to GeoJSON text by the geometry library and
//! decoded into a JSON mapping. An absent (or empty) geometry renders as the
//! empty string, which clients treat as "no geometry".

use crate::field::Field;
use datapunt_core::{DecodeError, RequestContext, Result};
use serde_json::Value;
use std::marker::PhantomData;

/// Anything that can produce GeoJSON text for a single geometry
pub trait GeoJsonSource {
	fn geojson(&self) -> std::result::Result<String, DecodeError>;

	/// Empty geometries are rendered like absent ones
	fn is_empty(&self) -> bool {
		false
	}
}

/// Raw GeoJSON text, e.g. as stored in a database column
impl GeoJsonSource for String {
	fn geojson(&self) -> std::result::Result<String, DecodeError> {
		Ok(self.clone())
	}

	fn is_empty(&self) -> bool {
		self.trim().is_empty()
	}
}

#[cfg(feature = "geo")]
impl GeoJsonSource for geo_types::Geometry<f64> {
	fn geojson(&self) -> std::result::Result<String, DecodeError> {
		use geozero::ToJson;

		self.to_json().map_err(|e| DecodeError::new(e.to_string()))
	}

	fn is_empty(&self) -> bool {
		use geo_types::Geometry;

		match self {
			Geometry::LineString(ls) => ls.0.is_empty(),
			Geometry::Polygon(p) => p.exterior().0.is_empty(),
			Geometry::MultiPoint(mp) => mp.0.is_empty(),
			Geometry::MultiLineString(mls) => mls.0.is_empty(),
			Geometry::MultiPolygon(mp) => mp.0.is_empty(),
			Geometry::GeometryCollection(gc) => gc.0.is_empty(),
			_ => false,
		}
	}
}

#[cfg(feature = "geo")]
impl GeoJsonSource for geo_types::Point<f64> {
	fn geojson(&self) -> std::result::Result<String, DecodeError> {
		geo_types::Geometry::Point(*self).geojson()
	}
}

#[cfg(feature = "geo")]
impl GeoJsonSource for geo_types::MultiPolygon<f64> {
	fn geojson(&self) -> std::result::Result<String, DecodeError> {
		geo_types::Geometry::MultiPolygon(self.clone()).geojson()
	}

	fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// Decode an optional geometry into its GeoJSON mapping
///
/// Absent or empty geometries yield `""`; malformed GeoJSON text yields a
/// [`DecodeError`].
///
/// ```
/// use datapunt_serializers::decode_geometry;
/// use serde_json::json;
///
/// let text = r#"{"type": "Point", "coordinates": [4.9, 52.3]}"#.to_string();
/// assert_eq!(
///     decode_geometry(Some(&text)).unwrap(),
///     json!({"type": "Point", "coordinates": [4.9, 52.3]})
/// );
/// assert_eq!(decode_geometry::<String>(None).unwrap(), json!(""));
/// ```
pub fn decode_geometry<G>(geometry: Option<&G>) -> std::result::Result<Value, DecodeError>
where
	G: GeoJsonSource + ?Sized,
{
	match geometry {
		Some(g) if !g.is_empty() => {
			let text = g.geojson()?;
			Ok(serde_json::from_str(&text)?)
		}
		_ => Ok(Value::String(String::new())),
	}
}

/// Read-only field exposing an optional geometry attribute of the record.
///
/// The accessor selects the geometry; it may return `None` for records
/// without one.
pub struct GeometryField<F, G> {
	accessor: F,
	_geometry: PhantomData<fn() -> G>,
}

impl<F, G> GeometryField<F, G> {
	pub fn new<R>(accessor: F) -> Self
	where
		F: Fn(&R) -> Option<&G>,
		G: GeoJsonSource,
	{
		Self {
			accessor,
			_geometry: PhantomData,
		}
	}
}

impl<R, F, G> Field<R> for GeometryField<F, G>
where
	F: Fn(&R) -> Option<&G> + Send + Sync,
	G: GeoJsonSource,
{
	fn to_representation(&self, record: &R, _ctx: &RequestContext) -> Result<Value> {
		Ok(decode_geometry((self.accessor)(record))?)
	}
}
