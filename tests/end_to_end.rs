//! End-to-end shaping tests through the `datapunt` facade
//!
//! Settings are loaded from TOML, turned into a shaper configuration and
//! applied to records the way an API list/detail view would.

#![cfg(feature = "geo")]

use assert_json_diff::assert_json_eq;
use datapunt::prelude::*;
use rstest::*;
use serde::Serialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Serialize)]
struct Meetbout {
	id: i64,
	#[serde(skip)]
	geometrie: Option<geo_types::Geometry<f64>>,
}

impl Record for Meetbout {
	fn primary_key(&self) -> Option<Value> {
		Some(json!(self.id))
	}
}

#[fixture]
fn ctx() -> RequestContext {
	RequestContext::new(Arc::new(
		RouteTable::new()
			.route("meetbout-list", "/meetbouten/meetbout/")
			.route("meetbout-detail", "/meetbouten/meetbout/{pk}/"),
	))
}

/// Test: Dataset tag plus geometry passthrough
#[rstest]
fn test_dataset_and_geometry(ctx: RequestContext) {
	let shaper = ResponseShaper::<Meetbout>::new(ShaperConfig::default().dataset("bag"))
		.field("_geom", GeometryField::new(|m: &Meetbout| m.geometrie.as_ref()));

	let record = Meetbout {
		id: 5,
		geometrie: Some(geo_types::Geometry::Point(geo_types::Point::new(4.9, 52.3))),
	};

	let object = shaper.shape(&record, &ctx).unwrap();
	assert_json_eq!(
		Value::Object(object),
		json!({
			"dataset": "bag",
			"_geom": {"type": "Point", "coordinates": [4.9, 52.3]}
		})
	);
}

/// Test: Settings drive the shaper configuration
#[rstest]
fn test_settings_to_hal_object(ctx: RequestContext) {
	let settings = ShaperSettings::from_toml_str(
		r#"
dataset = "meetbouten"
links_field_name = "_links"
base_url = "https://api.data.amsterdam.nl"
"#,
	)
	.unwrap();

	let config = ShaperConfig::from(&settings);
	let serializer = HalSerializer::<Meetbout>::hal("meetbout-detail", config).with_model_fields();

	let records = [
		Meetbout {
			id: 10381,
			geometrie: None,
		},
		Meetbout {
			id: 10382,
			geometrie: None,
		},
	];
	let objects = serializer.shape_many(&records, &ctx).unwrap();

	assert_eq!(objects.len(), 2);
	assert_eq!(ctx.base_url(), None);
	assert_json_eq!(
		Value::Object(objects[1].clone()),
		json!({
			"_links": {
				"self": {"href": "https://api.data.amsterdam.nl/meetbouten/meetbout/10382/"}
			},
			"id": 10382,
			"dataset": "meetbouten"
		})
	);
}

/// Test: Rule A through the facade
#[rstest]
fn test_list_links(ctx: RequestContext) {
	let links = get_links("meetbout-list", None, &ctx).unwrap();
	assert_eq!(
		Value::Object(links),
		json!({"self": {"href": "/meetbouten/meetbout/"}})
	);
}
