//! HAL `self` link envelopes
//!
//! A link envelope always has the shape `{"self": {"href": <url>}}`. The URL
//! comes from the context's reverser; resolution failures are returned as-is.

use crate::field::Field;
use datapunt_core::{
	Kwargs, Record, RenderedObject, RequestContext, ResolutionError, Result, to_url_param,
};
use serde_json::{Value, json};

/// Build a `self` link envelope for a named route
///
/// # Examples
///
/// ```
/// use datapunt_core::{Kwargs, RequestContext, RouteTable};
/// use datapunt_serializers::get_links;
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let routes = RouteTable::new().route("pand-detail", "/bag/pand/{pk}/");
/// let ctx = RequestContext::new(Arc::new(routes));
///
/// let mut kwargs = Kwargs::new();
/// kwargs.insert("pk".to_string(), "5".to_string());
///
/// let links = get_links("pand-detail", Some(&kwargs), &ctx).unwrap();
/// assert_eq!(serde_json::Value::Object(links), json!({"self": {"href": "/bag/pand/5/"}}));
/// ```
pub fn get_links(
	view_name: &str,
	kwargs: Option<&Kwargs>,
	ctx: &RequestContext,
) -> std::result::Result<RenderedObject, ResolutionError> {
	let href = ctx.resolve(view_name, kwargs)?;
	Ok(self_link(Value::String(href)))
}

fn self_link(href: Value) -> RenderedObject {
	let mut links = RenderedObject::new();
	links.insert("self".to_string(), json!({ "href": href }));
	links
}

/// Hyperlinked identity field rendered as a HAL link envelope.
///
/// Reverses `view_name` with `{lookup_url_kwarg: record.lookup(lookup_field)}`.
/// Records without a lookup value (unsaved records) render
/// `{"self": {"href": null}}`.
#[derive(Debug, Clone)]
pub struct LinksField {
	view_name: String,
	lookup_field: String,
	lookup_url_kwarg: String,
}

impl LinksField {
	/// Create a links field for the given detail route, looked up by `pk`
	pub fn new(view_name: impl Into<String>) -> Self {
		Self {
			view_name: view_name.into(),
			lookup_field: String::from("pk"),
			lookup_url_kwarg: String::from("pk"),
		}
	}

	/// Record attribute used as the URL parameter value (default: `pk`)
	pub fn lookup_field(mut self, field: impl Into<String>) -> Self {
		self.lookup_field = field.into();
		self
	}

	/// Route parameter name (default: `pk`)
	pub fn lookup_url_kwarg(mut self, kwarg: impl Into<String>) -> Self {
		self.lookup_url_kwarg = kwarg.into();
		self
	}

	pub fn view_name(&self) -> &str {
		&self.view_name
	}
}

impl<R: Record> Field<R> for LinksField {
	fn to_representation(&self, record: &R, ctx: &RequestContext) -> Result<Value> {
		let Some(lookup_value) = record.lookup(&self.lookup_field) else {
			return Ok(Value::Object(self_link(Value::Null)));
		};

		let mut kwargs = Kwargs::new();
		kwargs.insert(self.lookup_url_kwarg.clone(), to_url_param(&lookup_value));

		Ok(Value::Object(get_links(&self.view_name, Some(&kwargs), ctx)?))
	}
}

/// Self link to the detail action of the view serving the request.
///
/// Needs a [`ViewContext`](datapunt_core::ViewContext) in the request
/// context; without one it fails with
/// [`Error::MissingContext`](datapunt_core::Error::MissingContext).
#[derive(Debug, Clone, Copy, Default)]
pub struct SelfLinkField;

impl<R: Record> Field<R> for SelfLinkField {
	fn to_representation(&self, record: &R, ctx: &RequestContext) -> Result<Value> {
		let href = match record.primary_key() {
			Some(pk) => Value::String(ctx.reverse_action("detail", &pk)?),
			None => Value::Null,
		};
		Ok(Value::Object(self_link(href)))
	}
}
