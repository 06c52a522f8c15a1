//! Worker runtime primitives for courier calls.
//!
//! * [`spawn`] / [`spawn_blocking`]: classified task spawning on the global runtime
//! * [`block_on`]: blocking bridge used by synchronous call execution
//! * [`Executor`]: thread-affinity strategies for callback delivery

#![warn(missing_docs)]

use std::any::Any;

mod class;
pub mod executor;
mod spawn;

pub use class::TaskClass;
pub use executor::{Executor, InlineExecutor, MainLoop, MainThreadExecutor, RuntimeExecutor, Task, main_thread};
pub use spawn::{block_on, spawn, spawn_blocking};

/// Extracts a human-readable message from a panic payload.
pub fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(s) = payload.downcast_ref::<&'static str>() {
		return (*s).to_owned();
	}
	if let Some(s) = payload.downcast_ref::<String>() {
		return s.clone();
	}
	"non-string panic payload".to_owned()
}

#[cfg(test)]
mod panic_tests;
