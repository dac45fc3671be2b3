//! Shared data types

use serde_json::{Map, Value};
use std::collections::HashMap;

/// JSON object produced by shaping a record.
///
/// Keys keep their insertion order, so `self` stays first in a link
/// envelope and the links field stays first in a HAL object.
pub type RenderedObject = Map<String, Value>;

/// Route parameters used when reversing a URL
pub type Kwargs = HashMap<String, String>;

/// A caller-owned object that can be shaped into a response.
///
/// Implementors only need to expose their primary key; [`Record::lookup`]
/// can be overridden to make other attributes available to hyperlinked
/// fields that look records up by something other than `pk`.
///
/// # Examples
///
/// ```
/// use datapunt_core::Record;
/// use serde_json::{Value, json};
///
/// struct Pand {
///     id: i64,
///     landelijk_id: String,
/// }
///
/// impl Record for Pand {
///     fn primary_key(&self) -> Option<Value> {
///         Some(json!(self.id))
///     }
///
///     fn lookup(&self, field: &str) -> Option<Value> {
///         match field {
///             "landelijk_id" => Some(json!(self.landelijk_id)),
///             _ => self.default_lookup(field),
///         }
///     }
/// }
///
/// let pand = Pand { id: 5, landelijk_id: "0363100012345678".into() };
/// assert_eq!(pand.lookup("pk"), Some(json!(5)));
/// assert_eq!(pand.lookup("landelijk_id"), Some(json!("0363100012345678")));
/// ```
pub trait Record {
	/// Primary key of the record, `None` while it is unsaved
	fn primary_key(&self) -> Option<Value>;

	/// Value of the named attribute, used for URL lookups
	fn lookup(&self, field: &str) -> Option<Value> {
		self.default_lookup(field)
	}

	/// Resolves `pk` and `id` to the primary key
	fn default_lookup(&self, field: &str) -> Option<Value> {
		match field {
			"pk" | "id" => self.primary_key(),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	struct Unsaved;

	impl Record for Unsaved {
		fn primary_key(&self) -> Option<Value> {
			None
		}
	}

	struct Saved(i64);

	impl Record for Saved {
		fn primary_key(&self) -> Option<Value> {
			Some(json!(self.0))
		}
	}

	#[test]
	fn test_default_lookup_maps_pk_and_id() {
		let record = Saved(42);
		assert_eq!(record.lookup("pk"), Some(json!(42)));
		assert_eq!(record.lookup("id"), Some(json!(42)));
		assert_eq!(record.lookup("naam"), None);
	}

	#[test]
	fn test_unsaved_record_has_no_lookup() {
		assert_eq!(Unsaved.lookup("pk"), None);
	}

	#[test]
	fn test_rendered_object_keeps_insertion_order() {
		let mut object = RenderedObject::new();
		object.insert("self".to_string(), json!({}));
		object.insert("dataset".to_string(), json!("bag"));
		object.insert("count".to_string(), json!(1));

		let keys: Vec<&str> = object.keys().map(String::as_str).collect();
		assert_eq!(keys, vec!["self", "dataset", "count"]);
	}
}
