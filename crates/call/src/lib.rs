//! Call execution and cancellation lifecycle.
//!
//! A [`Call`] turns one bound request into exactly one exchange on a
//! [`Transport`], delivered either synchronously ([`Call::execute`]) or to a
//! [`Callback`] ([`Call::enqueue`]). Calls are single-use, cancelable from
//! any thread, and re-runnable through [`Call::clone_call`].
//!
//! * [`TransportCall`]: the transport-backed call state machine
//! * [`Platform`]: process-wide callback thread affinity and default extension chains
//! * [`CallFactory`]: setup-time binding of transport and platform defaults
//! * [`CallFuture`]: awaitable adapter over an enqueued call

#![warn(missing_docs)]

mod adapter;
mod call;
mod callback;
mod config;
mod convert;
mod error;
mod factory;
mod future;
mod platform;
mod request;
mod response;
mod transport;

pub use adapter::{Adapted, BodyShape, CallAdapterFactory, ConverterFactory, ReturnShape, first_call_adapter, first_converter};
pub use call::{Call, TransportCall};
pub use callback::{Callback, on_complete};
pub use config::{ConfigError, DispatchConfig, PLATFORM_ENV};
pub use convert::{JsonConverter, OptionConverter, ResponseConverter};
pub use courier_invocation::{Invocation, Method};
pub use error::{BoxError, Error, ErrorKind, Result, TransportError};
pub use factory::CallFactory;
pub use future::CallFuture;
pub use platform::{Platform, PlatformKind};
pub use request::{Request, RequestExt};
pub use response::{RawResponse, Response};
pub use transport::{Exchange, Transport};
