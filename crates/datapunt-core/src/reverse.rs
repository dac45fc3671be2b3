//! URL reverse resolution
//!
//! Inspired by Django's `django.urls.reverse()`. The shaping rules only ever
//! talk to the [`UrlReverser`] trait; [`RouteTable`] is a small in-memory
//! implementation for applications without a router of their own, and for
//! tests.

use crate::exception::ResolutionError;
use crate::types::Kwargs;
use percent_encoding::{AsciiSet, CONTROLS, utf8_percent_encode};
use serde_json::Value;
use std::collections::HashMap;

/// Characters escaped inside a single path segment
const PATH_SEGMENT: &AsciiSet = &CONTROLS
	.add(b' ')
	.add(b'"')
	.add(b'#')
	.add(b'%')
	.add(b'/')
	.add(b'<')
	.add(b'>')
	.add(b'?')
	.add(b'[')
	.add(b'\\')
	.add(b']')
	.add(b'^')
	.add(b'`')
	.add(b'{')
	.add(b'|')
	.add(b'}');

/// Trait for URL reversal functionality
///
/// Implement this trait to plug an application router into the serializers.
/// Errors are returned to the caller untouched; the serializers never retry
/// or fall back to another route.
pub trait UrlReverser: Send + Sync {
	/// Reverse a route name to a path, substituting `params`
	fn reverse(&self, name: &str, params: &Kwargs) -> Result<String, ResolutionError>;
}

/// In-memory route registry
///
/// Patterns use `{name}` placeholders, e.g. `/bag/pand/{pk}/`.
///
/// # Examples
///
/// ```
/// use datapunt_core::{Kwargs, RouteTable, UrlReverser};
///
/// let routes = RouteTable::new()
///     .route("pand-list", "/bag/pand/")
///     .route("pand-detail", "/bag/pand/{pk}/");
///
/// let mut kwargs = Kwargs::new();
/// kwargs.insert("pk".to_string(), "42".to_string());
///
/// assert_eq!(routes.reverse("pand-detail", &kwargs).unwrap(), "/bag/pand/42/");
/// assert_eq!(routes.reverse("pand-list", &Kwargs::new()).unwrap(), "/bag/pand/");
/// ```
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
	routes: HashMap<String, String>,
}

impl RouteTable {
	/// Create an empty route table
	pub fn new() -> Self {
		Self::default()
	}

	/// Register a named route pattern (builder style)
	pub fn route(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
		self.register(name, pattern);
		self
	}

	/// Register a named route pattern, replacing any previous pattern
	pub fn register(&mut self, name: impl Into<String>, pattern: impl Into<String>) {
		self.routes.insert(name.into(), pattern.into());
	}

	/// Get the pattern registered under `name`
	pub fn pattern(&self, name: &str) -> Option<&str> {
		self.routes.get(name).map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.routes.len()
	}

	pub fn is_empty(&self) -> bool {
		self.routes.is_empty()
	}
}

impl UrlReverser for RouteTable {
	fn reverse(&self, name: &str, params: &Kwargs) -> Result<String, ResolutionError> {
		let pattern = self
			.routes
			.get(name)
			.ok_or_else(|| ResolutionError::NoReverseMatch {
				name: name.to_string(),
			})?;

		substitute(name, pattern, params)
	}
}

/// Single-pass placeholder substitution
///
/// Walks the pattern once, replacing each `{param}` with its percent-encoded
/// value. Extra parameters that the pattern does not mention are ignored.
fn substitute(name: &str, pattern: &str, params: &Kwargs) -> Result<String, ResolutionError> {
	let mut result = String::with_capacity(pattern.len());
	let mut chars = pattern.chars();

	while let Some(ch) = chars.next() {
		if ch != '{' {
			result.push(ch);
			continue;
		}

		let param: String = chars.by_ref().take_while(|&c| c != '}').collect();
		let value = params
			.get(&param)
			.ok_or_else(|| ResolutionError::MissingParameter {
				name: name.to_string(),
				param: param.clone(),
			})?;

		if !is_safe_segment(value) {
			return Err(ResolutionError::InvalidParameter {
				name: name.to_string(),
				param,
			});
		}
		result.extend(utf8_percent_encode(value, PATH_SEGMENT));
	}

	Ok(result)
}

/// Rejects values that would escape their path segment
fn is_safe_segment(value: &str) -> bool {
	if value.is_empty() || value.contains(['/', '\\', '?', '#']) {
		return false;
	}
	let lower = value.to_ascii_lowercase();
	!["%2f", "%5c", "%3f", "%23"]
		.iter()
		.any(|encoded| lower.contains(encoded))
}

/// Render a JSON scalar as a URL parameter
///
/// Strings are used verbatim (without JSON quotes), everything else uses
/// its JSON text.
///
/// ```
/// use datapunt_core::to_url_param;
/// use serde_json::json;
///
/// assert_eq!(to_url_param(&json!(42)), "42");
/// assert_eq!(to_url_param(&json!("0363")), "0363");
/// ```
pub fn to_url_param(value: &Value) -> String {
	match value {
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::*;
	use serde_json::json;

	fn kwargs(pairs: &[(&str, &str)]) -> Kwargs {
		pairs
			.iter()
			.map(|(k, v)| (k.to_string(), v.to_string()))
			.collect()
	}

	#[fixture]
	fn routes() -> RouteTable {
		RouteTable::new()
			.route("gebouw-list", "/gebieden/gebouw/")
			.route("pand-detail", "/bag/pand/{pk}/")
			.route("straat-detail", "/bag/openbareruimte/{pk}/")
			.route("meting-detail", "/meetbouten/{bout}/metingen/{pk}/")
	}

	#[rstest]
	#[case("gebouw-list", &[], "/gebieden/gebouw/")]
	#[case("gebouw-list", &[("pk", "1")], "/gebieden/gebouw/")]
	#[case("pand-detail", &[("pk", "0363100012345678")], "/bag/pand/0363100012345678/")]
	#[case(
		"meting-detail",
		&[("bout", "10381"), ("pk", "3")],
		"/meetbouten/10381/metingen/3/"
	)]
	fn test_reverse(
		routes: RouteTable,
		#[case] name: &str,
		#[case] params: &[(&str, &str)],
		#[case] expected: &str,
	) {
		assert_eq!(routes.reverse(name, &kwargs(params)).unwrap(), expected);
	}

	#[rstest]
	#[case("Dam straat é", "/bag/openbareruimte/Dam%20straat%20%C3%A9/")]
	#[case("Nieuwe Herengracht", "/bag/openbareruimte/Nieuwe%20Herengracht/")]
	#[case("100%", "/bag/openbareruimte/100%25/")]
	#[case("a<b>", "/bag/openbareruimte/a%3Cb%3E/")]
	#[case("Spui-Kalverstraat_2", "/bag/openbareruimte/Spui-Kalverstraat_2/")]
	fn test_reverse_percent_encodes_values(
		routes: RouteTable,
		#[case] value: &str,
		#[case] expected: &str,
	) {
		let url = routes
			.reverse("straat-detail", &kwargs(&[("pk", value)]))
			.unwrap();
		assert_eq!(url, expected);
		assert!(!url.contains(' '));
		assert!(url.is_ascii());
	}

	#[rstest]
	fn test_reverse_unknown_name(routes: RouteTable) {
		let err = routes.reverse("nope", &Kwargs::new()).unwrap_err();
		assert_eq!(
			err,
			ResolutionError::NoReverseMatch {
				name: "nope".to_string()
			}
		);
	}

	#[rstest]
	fn test_reverse_missing_parameter(routes: RouteTable) {
		let err = routes.reverse("pand-detail", &Kwargs::new()).unwrap_err();
		assert_eq!(
			err,
			ResolutionError::MissingParameter {
				name: "pand-detail".to_string(),
				param: "pk".to_string(),
			}
		);
	}

	#[rstest]
	#[case("../admin")]
	#[case("1?x=2")]
	#[case("1#frag")]
	#[case("1%2Fadmin")]
	#[case("1%5cadmin")]
	#[case("")]
	fn test_reverse_rejects_path_injection(routes: RouteTable, #[case] bad: &str) {
		let err = routes
			.reverse("pand-detail", &kwargs(&[("pk", bad)]))
			.unwrap_err();
		assert!(
			matches!(err, ResolutionError::InvalidParameter { .. }),
			"value {:?} should be rejected",
			bad
		);
	}

	#[test]
	fn test_register_replaces_pattern() {
		let mut routes = RouteTable::new();
		routes.register("pand-list", "/v0/pand/");
		routes.register("pand-list", "/v1/pand/");
		assert_eq!(routes.len(), 1);
		assert_eq!(routes.pattern("pand-list"), Some("/v1/pand/"));
	}

	#[rstest]
	#[case(json!(7), "7")]
	#[case(json!("abc"), "abc")]
	#[case(json!("0363"), "0363")]
	#[case(json!(true), "true")]
	fn test_to_url_param(#[case] value: Value, #[case] expected: &str) {
		assert_eq!(to_url_param(&value), expected);
	}
}
