//! Response shaping pipeline
//!
//! A [`ResponseShaper`] renders a record by running an ordered list of named
//! fields and then stamping the configured dataset:
//!
//! 1. the links field, if one is configured (always first in the output)
//! 2. the record's own serde representation, if model fields are enabled
//! 3. declared fields, in declaration order (replacing model keys in place)
//! 4. the `dataset` tag, if configured
//!
//! Configuration is explicit: the dataset, field names and a fallback base
//! URL come from a [`ShaperConfig`], the URL reverser from the per-call
//! [`RequestContext`]. A base URL set on the context wins over the configured
//! one.

use crate::dataset::with_dataset;
use crate::display::DisplayField;
use crate::field::Field;
use crate::links::LinksField;
use datapunt_conf::ShaperSettings;
use datapunt_core::{Error, Record, RenderedObject, RequestContext, Result};
use serde::Serialize;
use serde::ser::Error as _;
use serde_json::Value;
use std::borrow::Cow;
use std::fmt;

/// Static configuration of a shaper
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaperConfig {
	/// Dataset stamped on every object
	pub dataset: Option<String>,
	/// Output key of the links field
	pub links_field_name: String,
	/// Output key of the display field
	pub display_field_name: String,
	/// Base URL for absolute links when the request context has none
	pub base_url: Option<String>,
}

impl Default for ShaperConfig {
	fn default() -> Self {
		Self::from(&ShaperSettings::default())
	}
}

impl ShaperConfig {
	pub fn dataset(mut self, dataset: impl Into<String>) -> Self {
		self.dataset = Some(dataset.into());
		self
	}

	pub fn links_field_name(mut self, name: impl Into<String>) -> Self {
		self.links_field_name = name.into();
		self
	}

	pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = Some(base_url.into());
		self
	}
}

impl From<&ShaperSettings> for ShaperConfig {
	fn from(settings: &ShaperSettings) -> Self {
		Self {
			dataset: settings.dataset.clone(),
			links_field_name: settings.links_field_name.clone(),
			display_field_name: settings.display_field_name.clone(),
			base_url: settings.base_url.clone(),
		}
	}
}

type BoxedField<R> = Box<dyn Field<R>>;
type ModelFields<R> = Box<dyn Fn(&R) -> Result<RenderedObject> + Send + Sync>;

/// Composable serializer producing HAL-JSON style objects
///
/// # Examples
///
/// ```
/// use datapunt_core::{RequestContext, RouteTable};
/// use datapunt_serializers::{GeometryField, ResponseShaper, ShaperConfig};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// struct Meetbout {
///     geometrie: Option<String>,
/// }
///
/// let shaper = ResponseShaper::<Meetbout>::new(ShaperConfig::default().dataset("meetbouten"))
///     .field("_geom", GeometryField::new(|m: &Meetbout| m.geometrie.as_ref()));
///
/// let ctx = RequestContext::new(Arc::new(RouteTable::new()));
/// let object = shaper.shape(&Meetbout { geometrie: None }, &ctx).unwrap();
/// assert_eq!(
///     serde_json::Value::Object(object),
///     json!({"_geom": "", "dataset": "meetbouten"})
/// );
/// ```
pub struct ResponseShaper<R> {
	config: ShaperConfig,
	links: Option<BoxedField<R>>,
	model_fields: Option<ModelFields<R>>,
	fields: Vec<(String, BoxedField<R>)>,
}

/// A shaper whose links field renders a `self` link to the detail view.
///
/// Mirrors a hyperlinked model serializer whose URL field is named
/// `_links` (configurable through [`ShaperConfig::links_field_name`]).
pub type HalSerializer<R> = ResponseShaper<R>;

impl<R> ResponseShaper<R> {
	pub fn new(config: ShaperConfig) -> Self {
		Self {
			config,
			links: None,
			model_fields: None,
			fields: Vec::new(),
		}
	}

	/// Append a named field; a later field with the same name replaces it
	pub fn field(mut self, name: impl Into<String>, field: impl Field<R> + 'static) -> Self {
		let name = name.into();
		let field: BoxedField<R> = Box::new(field);
		match self.fields.iter_mut().find(|(n, _)| *n == name) {
			Some(slot) => slot.1 = field,
			None => self.fields.push((name, field)),
		}
		self
	}

	/// Use `field` as the links field, rendered first under
	/// [`ShaperConfig::links_field_name`]
	pub fn with_links(mut self, field: impl Field<R> + 'static) -> Self {
		self.links = Some(Box::new(field));
		self
	}

	pub fn config(&self) -> &ShaperConfig {
		&self.config
	}

	/// Output keys of the configured fields, in output order
	pub fn field_names(&self) -> Vec<&str> {
		self.links
			.as_ref()
			.map(|_| self.config.links_field_name.as_str())
			.into_iter()
			.chain(self.fields.iter().map(|(name, _)| name.as_str()))
			.collect()
	}

	/// Render one record
	pub fn shape(&self, record: &R, ctx: &RequestContext) -> Result<RenderedObject> {
		let ctx = self.effective_context(ctx);
		let ctx: &RequestContext = &ctx;
		let mut object = RenderedObject::new();

		if let Some(links) = &self.links {
			object.insert(
				self.config.links_field_name.clone(),
				links.to_representation(record, ctx)?,
			);
		}

		if let Some(model_fields) = &self.model_fields {
			for (key, value) in model_fields(record)? {
				if !object.contains_key(&key) {
					object.insert(key, value);
				}
			}
		}

		for (name, field) in &self.fields {
			object.insert(name.clone(), field.to_representation(record, ctx)?);
		}

		tracing::debug!("Shaped object with {} keys", object.len());

		Ok(match &self.config.dataset {
			Some(dataset) => with_dataset(object, dataset),
			None => object,
		})
	}

	/// Render records in order, stopping at the first error
	pub fn shape_many<'a, I>(
		&self,
		records: I,
		ctx: &RequestContext,
	) -> Result<Vec<RenderedObject>>
	where
		I: IntoIterator<Item = &'a R>,
		R: 'a,
	{
		records
			.into_iter()
			.map(|record| self.shape(record, ctx))
			.collect()
	}

	fn effective_context<'c>(&self, ctx: &'c RequestContext) -> Cow<'c, RequestContext> {
		match (&self.config.base_url, ctx.base_url()) {
			(Some(base), None) => Cow::Owned(ctx.clone().with_base_url(base.as_str())),
			_ => Cow::Borrowed(ctx),
		}
	}

	/// Strip output-only keys from incoming data
	///
	/// Read-only declared fields, the links field and the dataset tag are
	/// dropped; everything else passes through unchanged.
	pub fn to_internal_value(&self, data: &RenderedObject) -> Result<RenderedObject> {
		let mut internal = RenderedObject::new();

		for (key, value) in data {
			if self.links.is_some() && *key == self.config.links_field_name {
				continue;
			}
			if self.config.dataset.is_some() && key == crate::dataset::DATASET_KEY {
				continue;
			}

			match self.fields.iter().find(|(name, _)| name == key) {
				Some((_, field)) if field.read_only() => {
					tracing::debug!("Ignoring input for read-only field '{}'", key);
				}
				Some((_, field)) => {
					internal.insert(key.clone(), field.to_internal_value(key, value)?);
				}
				None => {
					internal.insert(key.clone(), value.clone());
				}
			}
		}

		Ok(internal)
	}
}

impl<R: Serialize + 'static> ResponseShaper<R> {
	/// Seed every object with the record's serde representation
	///
	/// The record must serialize to a JSON object.
	pub fn with_model_fields(mut self) -> Self {
		self.model_fields = Some(Box::new(|record: &R| -> Result<RenderedObject> {
			match serde_json::to_value(record)? {
				Value::Object(map) => Ok(map),
				other => Err(Error::Serialization(serde_json::Error::custom(format!(
					"expected a JSON object, got {}",
					json_type_name(&other)
				)))),
			}
		}));
		self
	}
}

impl<R: Record + 'static> ResponseShaper<R> {
	/// HAL serializer with a [`LinksField`] to `view_name` in front
	///
	/// ```
	/// use datapunt_core::{Record, RequestContext, RouteTable};
	/// use datapunt_serializers::{HalSerializer, ShaperConfig};
	/// use serde_json::{Value, json};
	/// use std::sync::Arc;
	///
	/// struct Pand(i64);
	///
	/// impl Record for Pand {
	///     fn primary_key(&self) -> Option<Value> {
	///         Some(json!(self.0))
	///     }
	/// }
	///
	/// let routes = RouteTable::new().route("pand-detail", "/bag/pand/{pk}/");
	/// let ctx = RequestContext::new(Arc::new(routes));
	///
	/// let serializer = HalSerializer::<Pand>::hal("pand-detail", ShaperConfig::default());
	/// let object = serializer.shape(&Pand(8), &ctx).unwrap();
	/// assert_eq!(
	///     Value::Object(object),
	///     json!({"_links": {"self": {"href": "/bag/pand/8/"}}})
	/// );
	/// ```
	pub fn hal(view_name: impl Into<String>, config: ShaperConfig) -> Self {
		Self::new(config).with_links(LinksField::new(view_name))
	}
}

impl<R: fmt::Display + 'static> ResponseShaper<R> {
	/// Add a [`DisplayField`] under [`ShaperConfig::display_field_name`]
	pub fn with_display(self) -> Self {
		let name = self.config.display_field_name.clone();
		self.field(name, DisplayField)
	}
}

impl<R> fmt::Debug for ResponseShaper<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ResponseShaper")
			.field("config", &self.config)
			.field("fields", &self.field_names())
			.field("model_fields", &self.model_fields.is_some())
			.finish()
	}
}

fn json_type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}
