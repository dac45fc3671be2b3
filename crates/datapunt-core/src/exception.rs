//! Error types for response shaping
//!
//! Every shaping rule propagates failures of its collaborators verbatim.
//! Translating these into HTTP error responses is the caller's job.

/// URL reversal failure reported by a [`UrlReverser`](crate::UrlReverser)
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
	/// No route is registered under the requested name
	#[error("Reverse for '{name}' not found")]
	NoReverseMatch { name: String },

	/// The route pattern needs a parameter that was not supplied
	#[error("Reverse for '{name}' is missing parameter '{param}'")]
	MissingParameter { name: String, param: String },

	/// A parameter value would break out of its path segment
	#[error("Reverse for '{name}' got an invalid value for parameter '{param}'")]
	InvalidParameter { name: String, param: String },
}

/// A reverse foreign-key filter mapping did not have exactly one key
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Filter mapping for related '{item_type}' must have exactly one key, got {}", .keys.len())]
pub struct MalformedFilterError {
	/// Type name of the items in the related collection
	pub item_type: String,
	/// The keys that were actually present
	pub keys: Vec<String>,
}

/// GeoJSON text could not be produced or decoded
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("GeoJSON decode error: {message}")]
pub struct DecodeError {
	pub message: String,
}

impl DecodeError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
		}
	}
}

impl From<serde_json::Error> for DecodeError {
	fn from(err: serde_json::Error) -> Self {
		Self::new(err.to_string())
	}
}

/// Umbrella error returned by shaping rules and the shaper pipeline
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Resolution(#[from] ResolutionError),

	#[error(transparent)]
	MalformedFilter(#[from] MalformedFilterError),

	#[error(transparent)]
	Decode(#[from] DecodeError),

	/// Input was supplied for a field that only renders output
	#[error("Field '{field}' is read-only")]
	ReadOnlyField { field: String },

	/// A rule needed a piece of request context that was not provided
	#[error("Request context is missing '{0}'")]
	MissingContext(&'static str),

	/// A record could not be converted into a JSON object
	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
