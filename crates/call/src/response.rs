//! Typed response model.

use bytes::Bytes;
use http::{HeaderMap, StatusCode};

use crate::{Error, ResponseConverter, Result};

/// The raw response a transport hands back.
pub type RawResponse = http::Response<Bytes>;

/// A response whose body has been decoded.
///
/// Non-2xx responses carry the raw error body instead of a decoded one.
#[derive(Debug)]
pub struct Response<T> {
	status: StatusCode,
	headers: HeaderMap,
	body: Option<T>,
	error_body: Option<Bytes>,
}

impl<T> Response<T> {
	/// A `200 OK` response carrying `body`.
	pub fn success(body: T) -> Self {
		Self {
			status: StatusCode::OK,
			headers: HeaderMap::new(),
			body: Some(body),
			error_body: None,
		}
	}

	/// HTTP status.
	pub fn status(&self) -> StatusCode {
		self.status
	}

	/// Response headers.
	pub fn headers(&self) -> &HeaderMap {
		&self.headers
	}

	/// True for 2xx statuses.
	pub fn is_successful(&self) -> bool {
		self.status.is_success()
	}

	/// Decoded body of a successful response.
	pub fn body(&self) -> Option<&T> {
		self.body.as_ref()
	}

	/// Consumes the response, returning the decoded body.
	pub fn into_body(self) -> Option<T> {
		self.body
	}

	/// Raw body of an unsuccessful response.
	pub fn error_body(&self) -> Option<&Bytes> {
		self.error_body.as_ref()
	}
}

impl<T: 'static> Response<T> {
	/// Decodes a raw response.
	///
	/// Only 2xx statuses other than `204 No Content` and `205 Reset Content`
	/// reach the converter.
	pub fn parse(raw: RawResponse, converter: &dyn ResponseConverter<T>) -> Result<Self> {
		let (parts, bytes) = raw.into_parts();
		let status = parts.status;

		if !status.is_success() {
			return Ok(Self {
				status,
				headers: parts.headers,
				body: None,
				error_body: Some(bytes),
			});
		}

		let body = if status == StatusCode::NO_CONTENT || status == StatusCode::RESET_CONTENT {
			None
		} else {
			Some(converter.convert(bytes).map_err(Error::Decode)?)
		};

		Ok(Self {
			status,
			headers: parts.headers,
			body,
			error_body: None,
		})
	}
}
