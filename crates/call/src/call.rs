//! The call contract and its transport-backed implementation.

use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use courier_worker::{Executor, TaskClass};
use futures::FutureExt;
use tokio_util::sync::CancellationToken;

use crate::callback::notify;
use crate::{Callback, Error, Request, Response, ResponseConverter, Result, Transport};

/// One request/response exchange that may be started at most once.
///
/// A call is either executed synchronously with [`execute`](Self::execute)
/// or asynchronously with [`enqueue`](Self::enqueue); starting it a second
/// time in any combination fails with [`Error::AlreadyExecuted`]. Use
/// [`clone_call`](Self::clone_call) to run the same request again, e.g. to
/// poll or to retry after a transport failure.
///
/// [`cancel`](Self::cancel) may be called from any thread at any time. A
/// call that is busy writing its request or reading its response may still
/// complete normally; cancellation only asks the transport to stop.
pub trait Call<T>: Send + Sync {
	/// Sends the request and blocks until the response is decoded.
	///
	/// # Errors
	///
	/// * [`Error::AlreadyExecuted`] if the call was started before.
	/// * [`Error::Canceled`] if the call was canceled before or during the exchange.
	/// * [`Error::Transport`] if talking to the remote side failed.
	/// * [`Error::Request`], [`Error::Decode`] or [`Error::Defect`] if building
	///   the request or decoding the response is broken.
	fn execute(&self) -> Result<Response<T>>;

	/// Sends the request in the background and reports the outcome to `callback`.
	///
	/// Returns immediately. Once accepted, `callback` is notified exactly once,
	/// including when the call is canceled before the exchange starts.
	///
	/// # Errors
	///
	/// Returns [`Error::AlreadyExecuted`] without notifying `callback` if the
	/// call was started before.
	fn enqueue(&self, callback: Box<dyn Callback<T>>) -> Result<()>;

	/// True once `execute` or `enqueue` has been accepted.
	fn is_executed(&self) -> bool;

	/// Requests cancellation. Idempotent.
	///
	/// A call that has not started yet never will. An in-flight exchange is
	/// aborted if the transport can still stop it.
	fn cancel(&self);

	/// True if [`cancel`](Self::cancel) was called, whether or not it aborted anything.
	fn is_canceled(&self) -> bool;

	/// Creates a new, unstarted call for the same request.
	fn clone_call(&self) -> Box<dyn Call<T>>;

	/// The request this call is bound to.
	fn request(&self) -> &Request;
}

const NEW: u8 = 0;
const EXECUTED: u8 = 1;
const ENQUEUED: u8 = 2;

/// Immutable parts shared by a call and all of its clones.
struct Template<T> {
	request: Arc<Request>,
	transport: Arc<dyn Transport>,
	converter: Arc<dyn ResponseConverter<T>>,
	callback_executor: Option<Arc<dyn Executor>>,
}

/// Per-instance lifecycle state.
#[derive(Default)]
struct State {
	phase: AtomicU8,
	cancel: CancellationToken,
}

/// A [`Call`] that runs its exchange on a [`Transport`].
///
/// [`Clone`] follows [`Call::clone_call`]: the copy shares the request,
/// transport and converter but starts out unexecuted and uncanceled.
pub struct TransportCall<T> {
	template: Arc<Template<T>>,
	state: Arc<State>,
}

impl<T: Send + 'static> TransportCall<T> {
	/// Binds a request to the transport that will carry it and the converter
	/// that decodes its successful responses.
	pub fn new(request: Request, transport: Arc<dyn Transport>, converter: Arc<dyn ResponseConverter<T>>) -> Self {
		Self {
			template: Arc::new(Template {
				request: Arc::new(request),
				transport,
				converter,
				callback_executor: None,
			}),
			state: Arc::default(),
		}
	}

	/// Routes [`Callback`] notifications through `executor`.
	///
	/// Without an executor, callbacks run on whichever thread completed the
	/// exchange.
	#[must_use]
	pub fn with_callback_executor(self, executor: Arc<dyn Executor>) -> Self {
		let template = Template {
			request: Arc::clone(&self.template.request),
			transport: Arc::clone(&self.template.transport),
			converter: Arc::clone(&self.template.converter),
			callback_executor: Some(executor),
		};
		Self {
			template: Arc::new(template),
			state: self.state,
		}
	}

	/// Another handle onto this very call, sharing its lifecycle state.
	fn handle(&self) -> Self {
		Self {
			template: Arc::clone(&self.template),
			state: Arc::clone(&self.state),
		}
	}

	/// Moves the call out of `NEW`, atomically.
	fn start(&self, phase: u8) -> Result<()> {
		self.state
			.phase
			.compare_exchange(NEW, phase, Ordering::AcqRel, Ordering::Acquire)
			.map(drop)
			.map_err(|_| Error::AlreadyExecuted)
	}

	/// The full exchange: cancellation check, transport round-trip and body
	/// decoding. Panics anywhere in the pipeline surface as [`Error::Defect`].
	fn exchange(&self) -> impl Future<Output = Result<Response<T>>> + Send + 'static {
		let template = Arc::clone(&self.template);
		let cancel = self.state.cancel.clone();
		let exchange = async move {
			if cancel.is_cancelled() {
				return Err(Error::Canceled);
			}
			let in_flight = template.transport.exchange(Arc::clone(&template.request));
			let raw = tokio::select! {
				biased;
				() = cancel.cancelled() => return Err(Error::Canceled),
				raw = in_flight => raw?,
			};
			Response::parse(raw, &*template.converter)
		};
		AssertUnwindSafe(exchange).catch_unwind().map(|outcome| {
			outcome.unwrap_or_else(|payload| Err(Error::Defect(courier_worker::panic_message(&*payload))))
		})
	}

	fn deliver(self, callback: Box<dyn Callback<T>>, outcome: Result<Response<T>>) {
		match self.template.callback_executor.clone() {
			Some(executor) => executor.execute(Box::new(move || notify(callback, &self, outcome))),
			None => notify(callback, &self, outcome),
		}
	}
}

impl<T: Send + 'static> Call<T> for TransportCall<T> {
	fn execute(&self) -> Result<Response<T>> {
		self.start(EXECUTED)?;
		tracing::trace!(method = %self.template.request.method(), uri = %self.template.request.uri(), "call.execute");
		let outcome = courier_worker::block_on(TaskClass::Exchange, self.exchange());
		if let Err(err) = &outcome {
			tracing::debug!(error = %err, "call.execute.failed");
		}
		outcome
	}

	fn enqueue(&self, callback: Box<dyn Callback<T>>) -> Result<()> {
		self.start(ENQUEUED)?;
		tracing::trace!(method = %self.template.request.method(), uri = %self.template.request.uri(), "call.enqueue");
		let call = self.handle();
		let exchange = self.exchange();
		// Runs on the worker's own runtime: the caller's runtime may shut down first.
		drop(courier_worker::spawn(TaskClass::Exchange, async move {
			let outcome = exchange.await;
			if let Err(err) = &outcome {
				tracing::debug!(error = %err, "call.enqueue.failed");
			}
			call.deliver(callback, outcome);
		}));
		Ok(())
	}

	fn is_executed(&self) -> bool {
		self.state.phase.load(Ordering::Acquire) != NEW
	}

	fn cancel(&self) {
		tracing::trace!(uri = %self.template.request.uri(), "call.cancel");
		self.state.cancel.cancel();
	}

	fn is_canceled(&self) -> bool {
		self.state.cancel.is_cancelled()
	}

	fn clone_call(&self) -> Box<dyn Call<T>> {
		Box::new(self.clone())
	}

	fn request(&self) -> &Request {
		&self.template.request
	}
}

impl<T> Clone for TransportCall<T> {
	fn clone(&self) -> Self {
		tracing::trace!(uri = %self.template.request.uri(), "call.clone");
		Self {
			template: Arc::clone(&self.template),
			state: Arc::default(),
		}
	}
}

impl<T> fmt::Debug for TransportCall<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let phase = match self.state.phase.load(Ordering::Acquire) {
			NEW => "new",
			EXECUTED => "executed",
			_ => "enqueued",
		};
		f.debug_struct("TransportCall")
			.field("method", self.template.request.method())
			.field("uri", self.template.request.uri())
			.field("phase", &phase)
			.field("canceled", &self.state.cancel.is_cancelled())
			.finish_non_exhaustive()
	}
}
