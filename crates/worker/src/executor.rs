//! Executors that decide which thread runs a completion callback.

use std::fmt;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::{TaskClass, spawn_blocking};

/// A unit of work handed to an [`Executor`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs submitted tasks on a thread of the executor's choosing.
pub trait Executor: Send + Sync + 'static {
	/// Submits one task. The task runs at most once.
	fn execute(&self, task: Task);
}

impl<E: Executor + ?Sized> Executor for Arc<E> {
	fn execute(&self, task: Task) {
		(**self).execute(task);
	}
}

/// Runs tasks immediately on the submitting thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineExecutor;

impl Executor for InlineExecutor {
	fn execute(&self, task: Task) {
		task();
	}
}

/// Runs tasks on the worker runtime's blocking pool.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuntimeExecutor;

impl Executor for RuntimeExecutor {
	fn execute(&self, task: Task) {
		drop(spawn_blocking(TaskClass::Notify, task));
	}
}

/// Creates a connected main-thread executor and the loop that drains it.
///
/// Whichever thread owns the [`MainLoop`] and runs it becomes the affinity
/// thread: every task submitted through any clone of the executor runs there,
/// in submission order.
pub fn main_thread() -> (MainThreadExecutor, MainLoop) {
	let (tx, rx) = mpsc::unbounded_channel();
	(MainThreadExecutor { tx }, MainLoop { rx })
}

/// Executor that posts tasks to a [`MainLoop`].
#[derive(Clone)]
pub struct MainThreadExecutor {
	tx: mpsc::UnboundedSender<Task>,
}

impl fmt::Debug for MainThreadExecutor {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("MainThreadExecutor")
			.field("closed", &self.tx.is_closed())
			.finish()
	}
}

impl MainThreadExecutor {
	/// Returns true once the loop has been dropped.
	pub fn is_closed(&self) -> bool {
		self.tx.is_closed()
	}
}

impl Executor for MainThreadExecutor {
	fn execute(&self, task: Task) {
		if self.tx.send(task).is_err() {
			tracing::warn!("main loop is gone; dropping posted task");
		}
	}
}

/// Receiving side of a main-thread executor.
#[derive(Debug)]
pub struct MainLoop {
	rx: mpsc::UnboundedReceiver<Task>,
}

impl MainLoop {
	/// Runs tasks until every [`MainThreadExecutor`] has been dropped.
	///
	/// Returns the number of tasks run.
	///
	/// # Panics
	///
	/// Panics if called from within an asynchronous execution context.
	pub fn run(mut self) -> usize {
		let mut ran = 0;
		while let Some(task) = self.rx.blocking_recv() {
			task();
			ran += 1;
		}
		tracing::trace!(ran, "main_loop.exit");
		ran
	}

	/// Runs every task already queued without waiting for more.
	pub fn run_pending(&mut self) -> usize {
		let mut ran = 0;
		while let Ok(task) = self.rx.try_recv() {
			task();
			ran += 1;
		}
		ran
	}
}
