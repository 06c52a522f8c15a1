//! Canonical invocation record for courier calls.
//!
//! The call-building layer captures each service method call as an
//! [`Invocation`] and tags the outgoing request with it, so transport
//! interceptors can recover which operation and arguments produced an
//! exchange:
//!
//! ```ignore
//! if let Some(invocation) = request.extensions().get::<Invocation>() {
//!     tracing::info!(%invocation, "outgoing");
//! }
//! ```

use std::fmt;
use std::sync::Arc;

pub use serde_json::Value;

/// Identity of a declared remote operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Method {
	service: &'static str,
	name: &'static str,
}

impl Method {
	/// Creates an operation identity from its declaring service and method name.
	pub const fn new(service: &'static str, name: &'static str) -> Self {
		Self { service, name }
	}

	/// Declaring service name.
	pub const fn service(&self) -> &'static str {
		self.service
	}

	/// Method name.
	pub const fn name(&self) -> &'static str {
		self.name
	}
}

impl fmt::Display for Method {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.service, self.name)
	}
}

/// A single invocation of a service method: the operation plus its arguments.
///
/// The argument list is fixed at construction and only exposed as a slice.
/// Use caution when interpreting the values: they are whatever the
/// call-building layer captured, and anything they merely refer to (ids,
/// paths, handles into caller state) can change after the record was made.
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
	method: Method,
	arguments: Arc<[Value]>,
}

impl Invocation {
	/// Creates a record, copying `arguments`.
	pub fn of(method: Method, arguments: &[Value]) -> Self {
		Self::from_vec(method, arguments.to_vec())
	}

	/// Creates a record that takes ownership of `arguments`.
	pub fn from_vec(method: Method, arguments: Vec<Value>) -> Self {
		Self {
			method,
			arguments: arguments.into(),
		}
	}

	/// The invoked operation.
	pub const fn method(&self) -> Method {
		self.method
	}

	/// Read-only view of the arguments, in declaration order.
	pub fn arguments(&self) -> &[Value] {
		&self.arguments
	}

	/// Number of arguments captured.
	pub fn arity(&self) -> usize {
		self.arguments.len()
	}
}

impl fmt::Display for Invocation {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}() [", self.method)?;
		for (i, arg) in self.arguments.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{arg}")?;
		}
		f.write_str("]")
	}
}
