//! Failure taxonomy for call execution.

use std::io;

/// Boxed error produced by converters.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A convenient type alias for `Result` with `E` = [`enum@Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Every way a call can fail.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
	/// `execute` or `enqueue` was invoked on a call that was already started.
	#[error("call already executed")]
	AlreadyExecuted,
	/// The call was canceled before it produced an outcome.
	#[error("call canceled")]
	Canceled,
	/// Talking to the remote side failed.
	#[error("transport failure: {0}")]
	Transport(#[source] io::Error),
	/// The transport could not turn the request descriptor into a wire request.
	#[error("failed to build request: {0}")]
	Request(String),
	/// The response arrived but its body could not be decoded.
	#[error("failed to decode response body: {0}")]
	Decode(#[source] BoxError),
	/// Something inside the exchange pipeline broke (e.g. a panicking transport).
	#[error("internal fault: {0}")]
	Defect(String),
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// Network-level failure; retrying a fresh clone of the call may succeed.
	Transport,
	/// The caller misused the call object.
	Usage,
	/// Request construction or response decoding is broken.
	Defect,
	/// The call was canceled.
	Canceled,
}

impl Error {
	/// Classifies this error.
	pub const fn kind(&self) -> ErrorKind {
		match self {
			Self::AlreadyExecuted => ErrorKind::Usage,
			Self::Canceled => ErrorKind::Canceled,
			Self::Transport(_) => ErrorKind::Transport,
			Self::Request(_) | Self::Decode(_) | Self::Defect(_) => ErrorKind::Defect,
		}
	}

	/// True for failures a caller may reasonably retry.
	pub const fn is_recoverable(&self) -> bool {
		matches!(self.kind(), ErrorKind::Transport)
	}

	/// True if this error reports cancellation.
	pub const fn is_canceled(&self) -> bool {
		matches!(self, Self::Canceled)
	}
}

/// Failure reported by a [`Transport`](crate::Transport).
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum TransportError {
	/// I/O failure talking to the remote side.
	#[error(transparent)]
	Io(#[from] io::Error),
	/// The request descriptor cannot be sent as-is.
	#[error("invalid request: {0}")]
	InvalidRequest(String),
}

impl From<TransportError> for Error {
	fn from(err: TransportError) -> Self {
		match err {
			TransportError::Io(e) => Self::Transport(e),
			TransportError::InvalidRequest(reason) => Self::Request(reason),
		}
	}
}
