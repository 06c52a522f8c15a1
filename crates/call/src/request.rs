//! Outgoing request descriptor and invocation tagging.

use bytes::Bytes;
use courier_invocation::Invocation;

/// The outgoing request a call is bound to.
pub type Request = http::Request<Bytes>;

/// Invocation tagging for [`Request`].
///
/// The tag is stored as a typed extension, so interceptors can read it
/// without touching method, URI, headers or body.
pub trait RequestExt {
	/// Attaches `invocation`, replacing any previous tag.
	#[must_use]
	fn with_invocation(self, invocation: Invocation) -> Self;

	/// The attached invocation, if any.
	fn invocation(&self) -> Option<&Invocation>;
}

impl RequestExt for Request {
	fn with_invocation(mut self, invocation: Invocation) -> Self {
		self.extensions_mut().insert(invocation);
		self
	}

	fn invocation(&self) -> Option<&Invocation> {
		self.extensions().get::<Invocation>()
	}
}
