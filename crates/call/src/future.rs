//! Awaitable wrapper over an enqueued call.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll, ready};

use tokio::sync::oneshot;

use crate::{Call, Callback, Error, Response, Result};

/// A call enqueued on creation and resolved with its outcome.
///
/// Dropping the future before it resolves cancels the call.
pub struct CallFuture<T> {
	call: Box<dyn Call<T>>,
	rx: oneshot::Receiver<Result<Response<T>>>,
	resolved: bool,
}

impl<T: Send + 'static> CallFuture<T> {
	/// Enqueues `call` and returns a future for its outcome.
	///
	/// # Errors
	///
	/// Returns [`Error::AlreadyExecuted`] if `call` was started before.
	pub fn new(call: Box<dyn Call<T>>) -> Result<Self> {
		let (tx, rx) = oneshot::channel();
		call.enqueue(Box::new(Completion(tx)))?;
		Ok(Self { call, rx, resolved: false })
	}

	/// The underlying call.
	pub fn call(&self) -> &dyn Call<T> {
		&*self.call
	}
}

impl<T> fmt::Debug for CallFuture<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CallFuture")
			.field("resolved", &self.resolved)
			.field("canceled", &self.call.is_canceled())
			.finish_non_exhaustive()
	}
}

impl<T> Future for CallFuture<T> {
	type Output = Result<Response<T>>;

	fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		let outcome = ready!(Pin::new(&mut self.rx).poll(cx));
		self.resolved = true;
		Poll::Ready(outcome.unwrap_or_else(|_| Err(Error::Defect("call completed without notifying its callback".into()))))
	}
}

impl<T> Drop for CallFuture<T> {
	fn drop(&mut self) {
		if !self.resolved {
			self.call.cancel();
		}
	}
}

struct Completion<T>(oneshot::Sender<Result<Response<T>>>);

impl<T: Send + 'static> Callback<T> for Completion<T> {
	fn on_response(self: Box<Self>, _call: &dyn Call<T>, response: Response<T>) {
		let _ = self.0.send(Ok(response));
	}

	fn on_failure(self: Box<Self>, _call: &dyn Call<T>, error: Error) {
		let _ = self.0.send(Err(error));
	}
}
