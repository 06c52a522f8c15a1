//! Default call adapter and converter factory chains.
//!
//! The call-building layer walks a chain in order and uses the first factory
//! that supports the declared shape, so specific factories must precede
//! general fallbacks.

use std::fmt;
use std::sync::Arc;

use courier_worker::Executor;

use crate::{CallFuture, OptionConverter, Result, TransportCall};

/// What a declared service method returns to its caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReturnShape {
	/// A [`Call`](crate::Call) to execute or enqueue.
	Call,
	/// A future resolving to the response.
	Future,
}

/// How a declared method types its response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyShape {
	/// A plain value.
	Value,
	/// An optional value; an empty body means `None`.
	Optional,
}

/// A call after adaptation to its declared return shape.
#[derive(Debug)]
pub enum Adapted<T> {
	/// The call itself, with callbacks bound to an executor.
	Call(TransportCall<T>),
	/// The call enqueued behind a future.
	Future(CallFuture<T>),
}

/// Default call adapter factories.
#[derive(Clone)]
#[non_exhaustive]
pub enum CallAdapterFactory {
	/// Adapts calls into [`CallFuture`]s.
	Future,
	/// Hands calls back as-is, delivering callbacks through the executor.
	Executor(Option<Arc<dyn Executor>>),
}

impl CallAdapterFactory {
	/// Stable name for diagnostics.
	pub const fn name(&self) -> &'static str {
		match self {
			Self::Future => "future",
			Self::Executor(_) => "executor",
		}
	}

	/// True if this factory can produce `shape`.
	pub const fn supports(&self, shape: ReturnShape) -> bool {
		matches!((self, shape), (Self::Future, ReturnShape::Future) | (Self::Executor(_), ReturnShape::Call))
	}

	/// Adapts `call` into this factory's shape.
	///
	/// # Errors
	///
	/// The future adapter enqueues immediately and fails with
	/// [`Error::AlreadyExecuted`](crate::Error::AlreadyExecuted) for a started call.
	pub fn adapt<T: Send + 'static>(&self, call: TransportCall<T>) -> Result<Adapted<T>> {
		match self {
			Self::Future => CallFuture::<T>::new(Box::new(call)).map(Adapted::Future),
			Self::Executor(Some(executor)) => Ok(Adapted::Call(call.with_callback_executor(Arc::clone(executor)))),
			Self::Executor(None) => Ok(Adapted::Call(call)),
		}
	}
}

impl fmt::Debug for CallAdapterFactory {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Future => f.write_str("Future"),
			Self::Executor(executor) => f.debug_tuple("Executor").field(&executor.is_some()).finish(),
		}
	}
}

/// Default converter factories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ConverterFactory {
	/// Wraps a value converter with [`OptionConverter`].
	Optional,
}

impl ConverterFactory {
	/// Stable name for diagnostics.
	pub const fn name(&self) -> &'static str {
		match self {
			Self::Optional => "optional",
		}
	}

	/// True if this factory decodes bodies of `shape`.
	pub const fn supports(&self, shape: BodyShape) -> bool {
		matches!((self, shape), (Self::Optional, BodyShape::Optional))
	}

	/// Wraps `inner` to decode the optional form of its output.
	pub fn wrap<C>(&self, inner: C) -> OptionConverter<C> {
		match self {
			Self::Optional => OptionConverter(inner),
		}
	}
}

/// First call adapter factory in `chain` that supports `shape`.
pub fn first_call_adapter(chain: &[CallAdapterFactory], shape: ReturnShape) -> Option<&CallAdapterFactory> {
	chain.iter().find(|factory| factory.supports(shape))
}

/// First converter factory in `chain` that supports `shape`.
pub fn first_converter(chain: &[ConverterFactory], shape: BodyShape) -> Option<&ConverterFactory> {
	chain.iter().find(|factory| factory.supports(shape))
}
