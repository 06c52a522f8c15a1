//! Response body converters.

use std::fmt;
use std::marker::PhantomData;

use bytes::Bytes;
use serde::de::DeserializeOwned;

use crate::BoxError;

/// Decodes a successful response body into `T`.
pub trait ResponseConverter<T>: Send + Sync + 'static {
	/// Decodes `body`.
	fn convert(&self, body: Bytes) -> Result<T, BoxError>;
}

impl<T, F> ResponseConverter<T> for F
where
	F: Fn(Bytes) -> Result<T, BoxError> + Send + Sync + 'static,
{
	fn convert(&self, body: Bytes) -> Result<T, BoxError> {
		self(body)
	}
}

/// Decodes JSON bodies with `serde_json`.
pub struct JsonConverter<T>(PhantomData<fn() -> T>);

impl<T> JsonConverter<T> {
	/// Creates a JSON converter.
	pub const fn new() -> Self {
		Self(PhantomData)
	}
}

impl<T> Default for JsonConverter<T> {
	fn default() -> Self {
		Self::new()
	}
}

impl<T> fmt::Debug for JsonConverter<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("JsonConverter")
	}
}

impl<T: DeserializeOwned + 'static> ResponseConverter<T> for JsonConverter<T> {
	fn convert(&self, body: Bytes) -> Result<T, BoxError> {
		Ok(serde_json::from_slice(&body)?)
	}
}

/// Wraps a converter so an empty body decodes to `None`.
#[derive(Debug, Clone, Default)]
pub struct OptionConverter<C>(pub C);

impl<T, C> ResponseConverter<Option<T>> for OptionConverter<C>
where
	C: ResponseConverter<T>,
{
	fn convert(&self, body: Bytes) -> Result<Option<T>, BoxError> {
		if body.is_empty() {
			return Ok(None);
		}
		self.0.convert(body).map(Some)
	}
}
