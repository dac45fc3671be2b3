//! Display-string field

use crate::field::Field;
use datapunt_core::{Error, RequestContext, Result};
use serde_json::Value;
use std::fmt;

/// Renders the whole record through its [`Display`](fmt::Display)
/// implementation, giving clients a human-readable label (`_display`).
///
/// The field is read-only: writes are rejected.
///
/// ```
/// use datapunt_core::{RequestContext, RouteTable};
/// use datapunt_serializers::{DisplayField, Field};
/// use serde_json::json;
/// use std::fmt;
/// use std::sync::Arc;
///
/// struct Widget(u32);
///
/// impl fmt::Display for Widget {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "Widget #{}", self.0)
///     }
/// }
///
/// let ctx = RequestContext::new(Arc::new(RouteTable::new()));
/// let value = DisplayField.to_representation(&Widget(7), &ctx).unwrap();
/// assert_eq!(value, json!("Widget #7"));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct DisplayField;

impl<R: fmt::Display> Field<R> for DisplayField {
	fn to_representation(&self, record: &R, _ctx: &RequestContext) -> Result<Value> {
		Ok(Value::String(record.to_string()))
	}

	fn read_only(&self) -> bool {
		true
	}

	fn to_internal_value(&self, name: &str, _data: &Value) -> Result<Value> {
		Err(Error::ReadOnlyField {
			field: name.to_string(),
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use datapunt_core::RouteTable;
	use serde_json::json;
	use std::sync::Arc;

	struct Stadsdeel {
		code: char,
		naam: &'static str,
	}

	impl fmt::Display for Stadsdeel {
		fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
			write!(f, "{} ({})", self.naam, self.code)
		}
	}

	#[test]
	fn test_display_field_uses_display() {
		let ctx = RequestContext::new(Arc::new(RouteTable::new()));
		let stadsdeel = Stadsdeel {
			code: 'A',
			naam: "Centrum",
		};
		assert_eq!(
			DisplayField.to_representation(&stadsdeel, &ctx).unwrap(),
			json!("Centrum (A)")
		);
	}

	#[test]
	fn test_display_field_rejects_writes() {
		let err = Field::<Stadsdeel>::to_internal_value(&DisplayField, "_display", &json!("x"))
			.unwrap_err();
		assert!(matches!(err, Error::ReadOnlyField { field } if field == "_display"));
		assert!(Field::<Stadsdeel>::read_only(&DisplayField));
	}
}
