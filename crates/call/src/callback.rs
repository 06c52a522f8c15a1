//! Completion notification for enqueued calls.

use crate::{Call, Error, Response, Result};

/// Receives the outcome of an enqueued call.
///
/// Exactly one method fires, once, for every accepted
/// [`enqueue`](Call::enqueue). Which thread it fires on is decided by the
/// call's callback executor.
pub trait Callback<T>: Send + 'static {
	/// The exchange produced a response. The status may still be non-2xx.
	fn on_response(self: Box<Self>, call: &dyn Call<T>, response: Response<T>);

	/// The exchange failed, was canceled, or its body could not be decoded.
	fn on_failure(self: Box<Self>, call: &dyn Call<T>, error: Error);
}

/// Adapts a closure over the call outcome into a [`Callback`].
pub fn on_complete<T, F>(f: F) -> Box<dyn Callback<T>>
where
	T: 'static,
	F: FnOnce(Result<Response<T>>) + Send + 'static,
{
	Box::new(OnComplete(f))
}

struct OnComplete<F>(F);

impl<T, F> Callback<T> for OnComplete<F>
where
	T: 'static,
	F: FnOnce(Result<Response<T>>) + Send + 'static,
{
	fn on_response(self: Box<Self>, _call: &dyn Call<T>, response: Response<T>) {
		(self.0)(Ok(response));
	}

	fn on_failure(self: Box<Self>, _call: &dyn Call<T>, error: Error) {
		(self.0)(Err(error));
	}
}

pub(crate) fn notify<T: 'static>(callback: Box<dyn Callback<T>>, call: &dyn Call<T>, outcome: Result<Response<T>>) {
	match outcome {
		Ok(response) => callback.on_response(call, response),
		Err(error) => callback.on_failure(call, error),
	}
}
