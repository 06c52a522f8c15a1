//! The network boundary calls run their exchange on.

use std::sync::Arc;

use futures::future::BoxFuture;

use crate::{RawResponse, Request, TransportError};

/// One in-flight exchange.
pub type Exchange = BoxFuture<'static, Result<RawResponse, TransportError>>;

/// Performs request/response exchanges.
///
/// Calls abort an in-flight exchange by dropping its future, so
/// implementations should release connection state on drop. Work should not
/// start before the future is first polled.
pub trait Transport: Send + Sync + 'static {
	/// Starts an exchange for `request`.
	fn exchange(&self, request: Arc<Request>) -> Exchange;
}

impl<F> Transport for F
where
	F: Fn(Arc<Request>) -> Exchange + Send + Sync + 'static,
{
	fn exchange(&self, request: Arc<Request>) -> Exchange {
		self(request)
	}
}
