//! Setup-time factory that mints calls.

use std::fmt;
use std::sync::Arc;

use courier_invocation::Invocation;
use courier_worker::Executor;

use crate::{
	Adapted, CallAdapterFactory, ConverterFactory, Error, Platform, Request, RequestExt, ResponseConverter, Result, ReturnShape, Transport, TransportCall, first_call_adapter,
};

/// Binds a transport and a platform's default chains, then mints calls.
///
/// Built once per service client; the platform is consulted here and never
/// per call.
#[derive(Clone)]
pub struct CallFactory {
	transport: Arc<dyn Transport>,
	callback_executor: Option<Arc<dyn Executor>>,
	call_adapters: Vec<CallAdapterFactory>,
	converters: Vec<ConverterFactory>,
}

impl CallFactory {
	/// Uses the process-wide [`Platform`].
	pub fn new(transport: Arc<dyn Transport>) -> Self {
		Self::from_platform(transport, Platform::get(), None)
	}

	/// Uses `platform`, optionally overriding its callback executor.
	pub fn from_platform(transport: Arc<dyn Transport>, platform: &Platform, callback_executor: Option<Arc<dyn Executor>>) -> Self {
		let callback_executor = callback_executor.or_else(|| platform.default_callback_executor());
		Self {
			transport,
			call_adapters: platform.default_call_adapter_factories(callback_executor.clone()),
			callback_executor,
			converters: platform.default_converter_factories(),
		}
	}

	/// Call adapter chain in consultation order.
	pub fn call_adapter_factories(&self) -> &[CallAdapterFactory] {
		&self.call_adapters
	}

	/// Converter chain in consultation order.
	pub fn converter_factories(&self) -> &[ConverterFactory] {
		&self.converters
	}

	/// Creates an unstarted call for `request`, tagged with `invocation`.
	///
	/// The call already delivers callbacks through the factory's callback
	/// executor, so enqueueing it directly behaves like a call adapted with
	/// [`ReturnShape::Call`].
	pub fn call<T: Send + 'static>(&self, invocation: Invocation, request: Request, converter: Arc<dyn ResponseConverter<T>>) -> TransportCall<T> {
		tracing::trace!(%invocation, "call_factory.call");
		let call = TransportCall::new(request.with_invocation(invocation), Arc::clone(&self.transport), converter);
		match &self.callback_executor {
			Some(executor) => call.with_callback_executor(Arc::clone(executor)),
			None => call,
		}
	}

	/// Adapts `call` with the first factory supporting `shape`.
	///
	/// # Errors
	///
	/// [`Error::Defect`] if no factory supports `shape`, or whatever the
	/// selected factory reports.
	pub fn adapt<T: Send + 'static>(&self, call: TransportCall<T>, shape: ReturnShape) -> Result<Adapted<T>> {
		let factory = first_call_adapter(&self.call_adapters, shape).ok_or_else(|| Error::Defect(format!("no call adapter for {shape:?}")))?;
		tracing::trace!(factory = factory.name(), ?shape, "call_factory.adapt");
		factory.adapt(call)
	}
}

impl fmt::Debug for CallFactory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("CallFactory")
			.field("callback_executor", &self.callback_executor.is_some())
			.field("call_adapters", &self.call_adapters)
			.field("converters", &self.converters)
			.finish_non_exhaustive()
	}
}
