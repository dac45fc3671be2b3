//! Related-collection summaries
//!
//! Instead of embedding a reverse relation, the summary reports how many
//! related items exist and links to the related list view filtered on the
//! parent:
//!
//! ```json
//! {"count": 3, "href": "/bag/verblijfsobject/?pand=42"}
//! ```

use crate::field::Field;
use datapunt_core::{
	MalformedFilterError, RenderedObject, RequestContext, Result, to_url_param,
};
use serde_json::{Value, json};
use std::marker::PhantomData;

/// Handle on a reverse relation of a record
pub trait RelatedCollection {
	/// Number of related items; zero is a valid count
	fn count(&self) -> u64;

	/// Type name of the related items, e.g. `Verblijfsobject`
	fn item_type_name(&self) -> &str;

	/// Keys of the reverse foreign-key filter mapping
	fn filter_keys(&self) -> Vec<String>;

	/// Primary key of the record owning the relation
	fn parent_primary_key(&self) -> Value;

	/// The single filter key of the relation
	///
	/// Fails with [`MalformedFilterError`] unless there is exactly one key.
	fn single_filter_key(&self) -> std::result::Result<String, MalformedFilterError> {
		let mut keys = self.filter_keys();
		if keys.len() == 1 {
			return Ok(keys.remove(0));
		}
		Err(MalformedFilterError {
			item_type: self.item_type_name().to_string(),
			keys,
		})
	}
}

/// Plain-data [`RelatedCollection`] for relations counted elsewhere
#[derive(Debug, Clone, PartialEq)]
pub struct RelatedSet {
	item_type_name: String,
	filter_keys: Vec<String>,
	parent_primary_key: Value,
	count: u64,
}

impl RelatedSet {
	pub fn new(
		item_type_name: impl Into<String>,
		filter_key: impl Into<String>,
		parent_primary_key: impl Into<Value>,
		count: u64,
	) -> Self {
		Self {
			item_type_name: item_type_name.into(),
			filter_keys: vec![filter_key.into()],
			parent_primary_key: parent_primary_key.into(),
			count,
		}
	}

	/// Replace the filter mapping keys
	pub fn with_filter_keys(mut self, keys: Vec<String>) -> Self {
		self.filter_keys = keys;
		self
	}
}

impl RelatedCollection for RelatedSet {
	fn count(&self) -> u64 {
		self.count
	}

	fn item_type_name(&self) -> &str {
		&self.item_type_name
	}

	fn filter_keys(&self) -> Vec<String> {
		self.filter_keys.clone()
	}

	fn parent_primary_key(&self) -> Value {
		self.parent_primary_key.clone()
	}
}

/// Summarize a related collection as `{"count": n, "href": "<list>?<key>=<pk>"}`
///
/// The list route is `<lowercased item type>-list`. Resolution and filter
/// errors are returned unchanged.
///
/// # Examples
///
/// ```
/// use datapunt_core::{RequestContext, RouteTable};
/// use datapunt_serializers::{RelatedSet, related_summary};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// let routes = RouteTable::new().route("verblijfsobject-list", "/bag/verblijfsobject/");
/// let ctx = RequestContext::new(Arc::new(routes));
///
/// let related = RelatedSet::new("Verblijfsobject", "pand", 42, 3);
/// let summary = related_summary(&related, &ctx).unwrap();
/// assert_eq!(
///     serde_json::Value::Object(summary),
///     json!({"count": 3, "href": "/bag/verblijfsobject/?pand=42"})
/// );
/// ```
pub fn related_summary<C>(collection: &C, ctx: &RequestContext) -> Result<RenderedObject>
where
	C: RelatedCollection + ?Sized,
{
	let count = collection.count();
	let route = format!("{}-list", collection.item_type_name().to_lowercase());
	let url = ctx.resolve(&route, None)?;

	let filter_key = collection.single_filter_key().inspect_err(|e| {
		tracing::warn!("Cannot summarize related collection: {}", e);
	})?;
	let query = url::form_urlencoded::Serializer::new(String::new())
		.append_pair(&filter_key, &to_url_param(&collection.parent_primary_key()))
		.finish();

	let mut summary = RenderedObject::new();
	summary.insert("count".to_string(), json!(count));
	summary.insert("href".to_string(), json!(format!("{}?{}", url, query)));
	Ok(summary)
}

/// Field rendering a [`related_summary`] for a relation of the record.
///
/// The accessor returns the relation handle for a record:
///
/// ```
/// use datapunt_serializers::{RelatedSet, RelatedSummaryField};
///
/// struct Pand {
///     id: i64,
///     verblijfsobjecten: u64,
/// }
///
/// let field = RelatedSummaryField::new(|p: &Pand| {
///     RelatedSet::new("Verblijfsobject", "pand", p.id, p.verblijfsobjecten)
/// });
/// # let _ = field;
/// ```
pub struct RelatedSummaryField<F, C> {
	accessor: F,
	_collection: PhantomData<fn() -> C>,
}

impl<F, C> RelatedSummaryField<F, C> {
	pub fn new<R>(accessor: F) -> Self
	where
		F: Fn(&R) -> C,
		C: RelatedCollection,
	{
		Self {
			accessor,
			_collection: PhantomData,
		}
	}
}

impl<R, F, C> Field<R> for RelatedSummaryField<F, C>
where
	F: Fn(&R) -> C + Send + Sync,
	C: RelatedCollection,
{
	fn to_representation(&self, record: &R, ctx: &RequestContext) -> Result<Value> {
		let collection = (self.accessor)(record);
		Ok(Value::Object(related_summary(&collection, ctx)?))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use datapunt_core::{Error, RouteTable};
	use std::sync::Arc;

	fn ctx() -> RequestContext {
		RequestContext::new(Arc::new(
			RouteTable::new().route("verblijfsobject-list", "/bag/verblijfsobject/"),
		))
	}

	#[test]
	fn test_zero_count_is_valid() {
		let related = RelatedSet::new("Verblijfsobject", "pand", 1, 0);
		let summary = related_summary(&related, &ctx()).unwrap();
		assert_eq!(summary["count"], json!(0));
		assert_eq!(summary["href"], json!("/bag/verblijfsobject/?pand=1"));
	}

	#[test]
	fn test_string_primary_key_is_not_quoted() {
		let related = RelatedSet::new("Verblijfsobject", "pand", "0363100012168052", 2);
		let summary = related_summary(&related, &ctx()).unwrap();
		assert_eq!(
			summary["href"],
			json!("/bag/verblijfsobject/?pand=0363100012168052")
		);
	}

	#[test]
	fn test_query_value_is_encoded() {
		let related = RelatedSet::new("Verblijfsobject", "pand", "a b&c", 2);
		let summary = related_summary(&related, &ctx()).unwrap();
		assert_eq!(summary["href"], json!("/bag/verblijfsobject/?pand=a+b%26c"));
	}

	#[test]
	fn test_no_filter_keys() {
		let related = RelatedSet::new("Verblijfsobject", "pand", 1, 2).with_filter_keys(vec![]);
		let err = related_summary(&related, &ctx()).unwrap_err();
		match err {
			Error::MalformedFilter(e) => {
				assert_eq!(e.item_type, "Verblijfsobject");
				assert!(e.keys.is_empty());
			}
			other => panic!("Expected MalformedFilter, got {:?}", other),
		}
	}

	#[test]
	fn test_unknown_list_route() {
		let related = RelatedSet::new("Nummeraanduiding", "pand", 1, 2);
		let err = related_summary(&related, &ctx()).unwrap_err();
		assert!(matches!(err, Error::Resolution(_)));
	}

	#[test]
	fn test_summary_field_uses_accessor() {
		struct Pand {
			id: i64,
		}

		let field = RelatedSummaryField::new(|p: &Pand| {
			RelatedSet::new("Verblijfsobject", "pand", p.id, 7)
		});
		let value = field.to_representation(&Pand { id: 42 }, &ctx()).unwrap();
		assert_eq!(
			value,
			json!({"count": 7, "href": "/bag/verblijfsobject/?pand=42"})
		);
	}
}
