//! Per-request context handed to shaping rules

use crate::exception::{Error, ResolutionError, Result};
use crate::reverse::{UrlReverser, to_url_param};
use crate::types::Kwargs;
use serde_json::Value;
use std::sync::Arc;

/// Describes the view that is serving the current request.
///
/// Mirrors a viewset: routes are named `<basename>-<action>` and detail
/// routes take the record's lookup value under `lookup_url_kwarg`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewContext {
	pub basename: String,
	pub lookup_url_kwarg: String,
}

impl ViewContext {
	/// Create a view context with the default `pk` lookup kwarg
	pub fn new(basename: impl Into<String>) -> Self {
		Self {
			basename: basename.into(),
			lookup_url_kwarg: String::from("pk"),
		}
	}

	pub fn lookup_url_kwarg(mut self, kwarg: impl Into<String>) -> Self {
		self.lookup_url_kwarg = kwarg.into();
		self
	}

	/// Route name of one of this view's actions, e.g. `pand-detail`
	pub fn action_name(&self, action: &str) -> String {
		format!("{}-{}", self.basename, action)
	}
}

/// Read-only context for one shaping call.
///
/// Holds the URL reverser, an optional absolute base URL (the scheme and
/// host of the current request) and the serving view, if any. Cloning is
/// cheap.
///
/// # Examples
///
/// ```
/// use datapunt_core::{Kwargs, RequestContext, RouteTable};
/// use std::sync::Arc;
///
/// let routes = RouteTable::new().route("pand-list", "/bag/pand/");
/// let ctx = RequestContext::new(Arc::new(routes))
///     .with_base_url("https://api.data.amsterdam.nl");
///
/// assert_eq!(
///     ctx.resolve("pand-list", None).unwrap(),
///     "https://api.data.amsterdam.nl/bag/pand/"
/// );
/// ```
#[derive(Clone)]
pub struct RequestContext {
	reverser: Arc<dyn UrlReverser>,
	base_url: Option<String>,
	view: Option<ViewContext>,
}

impl RequestContext {
	pub fn new(reverser: Arc<dyn UrlReverser>) -> Self {
		Self {
			reverser,
			base_url: None,
			view: None,
		}
	}

	/// Make resolved URLs absolute by prefixing `base_url`
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		let base: String = base_url.into();
		self.base_url = Some(base.trim_end_matches('/').to_string());
		self
	}

	pub fn with_view(mut self, view: ViewContext) -> Self {
		self.view = Some(view);
		self
	}

	pub fn base_url(&self) -> Option<&str> {
		self.base_url.as_deref()
	}

	pub fn view(&self) -> Option<&ViewContext> {
		self.view.as_ref()
	}

	/// Reverse a route name, making the result absolute when a base URL is set
	pub fn resolve(
		&self,
		name: &str,
		kwargs: Option<&Kwargs>,
	) -> std::result::Result<String, ResolutionError> {
		let empty = Kwargs::new();
		let path = self.reverser.reverse(name, kwargs.unwrap_or(&empty))?;
		tracing::debug!("Reversed '{}' to '{}'", name, path);

		Ok(match &self.base_url {
			Some(base) if path.starts_with('/') => format!("{}{}", base, path),
			_ => path,
		})
	}

	/// Reverse one of the serving view's actions for a single object
	///
	/// Fails with [`Error::MissingContext`] when no view is attached.
	pub fn reverse_action(&self, action: &str, lookup_value: &Value) -> Result<String> {
		let view = self.view.as_ref().ok_or(Error::MissingContext("view"))?;

		let mut kwargs = Kwargs::new();
		kwargs.insert(view.lookup_url_kwarg.clone(), to_url_param(lookup_value));

		Ok(self.resolve(&view.action_name(action), Some(&kwargs))?)
	}
}

impl std::fmt::Debug for RequestContext {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RequestContext")
			.field("base_url", &self.base_url)
			.field("view", &self.view)
			.finish_non_exhaustive()
	}
}
