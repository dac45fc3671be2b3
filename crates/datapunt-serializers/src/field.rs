//! The `Field` trait and computed fields

use datapunt_core::{Error, RequestContext, Result};
use serde_json::Value;

/// A named output slot of a [`ResponseShaper`](crate::ResponseShaper).
///
/// Fields render one value per record. All fields in this crate are
/// read-only: they produce output but never accept input.
pub trait Field<R>: Send + Sync {
	/// Render the field for `record`
	fn to_representation(&self, record: &R, ctx: &RequestContext) -> Result<Value>;

	fn read_only(&self) -> bool {
		true
	}

	/// Convert incoming data for this field
	///
	/// Read-only fields reject every write.
	fn to_internal_value(&self, name: &str, _data: &Value) -> Result<Value> {
		Err(Error::ReadOnlyField {
			field: name.to_string(),
		})
	}
}

/// A read-only field computed by a function of the record.
///
/// Inspired by Django REST Framework's `SerializerMethodField`.
///
/// # Examples
///
/// ```
/// use datapunt_core::{RequestContext, RouteTable};
/// use datapunt_serializers::{Field, MethodField};
/// use serde_json::json;
/// use std::sync::Arc;
///
/// struct Buurt {
///     code: String,
///     naam: String,
/// }
///
/// let field = MethodField::new(|b: &Buurt, _ctx: &RequestContext| {
///     Ok(json!(format!("{} ({})", b.naam, b.code)))
/// });
///
/// let ctx = RequestContext::new(Arc::new(RouteTable::new()));
/// let buurt = Buurt { code: "A00a".into(), naam: "Kop Zeedijk".into() };
/// assert_eq!(
///     field.to_representation(&buurt, &ctx).unwrap(),
///     json!("Kop Zeedijk (A00a)")
/// );
/// ```
pub struct MethodField<F> {
	method: F,
}

impl<F> MethodField<F> {
	pub fn new<R>(method: F) -> Self
	where
		F: Fn(&R, &RequestContext) -> Result<Value>,
	{
		Self { method }
	}
}

impl<R, F> Field<R> for MethodField<F>
where
	F: Fn(&R, &RequestContext) -> Result<Value> + Send + Sync,
{
	fn to_representation(&self, record: &R, ctx: &RequestContext) -> Result<Value> {
		(self.method)(record, ctx)
	}
}
