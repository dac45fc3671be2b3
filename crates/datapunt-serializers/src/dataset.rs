//! Dataset tagging

use datapunt_core::RenderedObject;
use serde_json::Value;

/// Key under which the dataset name is stored
pub const DATASET_KEY: &str = "dataset";

/// Stamp `dataset` on a rendered object to indicate the source of the data.
///
/// Takes the object by value and returns it, so callers holding other copies
/// are unaffected. Tagging twice keeps a single key with the last name.
///
/// ```
/// use datapunt_core::RenderedObject;
/// use datapunt_serializers::with_dataset;
/// use serde_json::json;
///
/// let mut object = RenderedObject::new();
/// object.insert("id".to_string(), json!(5));
///
/// let tagged = with_dataset(with_dataset(object, "bag"), "brk");
/// assert_eq!(serde_json::Value::Object(tagged), json!({"id": 5, "dataset": "brk"}));
/// ```
pub fn with_dataset(mut object: RenderedObject, dataset: &str) -> RenderedObject {
	object.insert(DATASET_KEY.to_string(), Value::String(dataset.to_string()));
	object
}
