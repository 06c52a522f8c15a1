use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tokio::task::JoinHandle;

use crate::TaskClass;

fn global_runtime() -> &'static Runtime {
	static GLOBAL_RT: OnceLock<Runtime> = OnceLock::new();
	GLOBAL_RT.get_or_init(|| {
		tokio::runtime::Builder::new_multi_thread()
			.enable_all()
			.worker_threads(2)
			.thread_name("courier-transport")
			.build()
			.expect("failed to build courier global tokio runtime")
	})
}

/// Spawns an async task on the global runtime with shared worker
/// classification metadata.
///
/// The task never lands on the caller's ambient runtime, so shutting that
/// runtime down cannot drop it halfway.
pub fn spawn<F>(class: TaskClass, fut: F) -> JoinHandle<F::Output>
where
	F: Future + Send + 'static,
	F::Output: Send + 'static,
{
	tracing::trace!(worker_class = class.as_str(), "worker.spawn");
	global_runtime().spawn(fut)
}

/// Spawns blocking work on the global runtime's blocking pool.
pub fn spawn_blocking<F, R>(class: TaskClass, f: F) -> JoinHandle<R>
where
	F: FnOnce() -> R + Send + 'static,
	R: Send + 'static,
{
	tracing::trace!(worker_class = class.as_str(), "worker.spawn_blocking");
	global_runtime().spawn_blocking(f)
}

/// Drives `fut` to completion, blocking the calling thread.
///
/// From a plain thread the future runs on the global runtime's handle. Inside
/// a multi-thread runtime the worker is handed over with
/// [`tokio::task::block_in_place`]. A current-thread runtime cannot be
/// blocked without starving its own reactor, so there the future is driven
/// from a scoped helper thread while the caller waits for it.
///
/// A panic inside `fut` is resumed on the calling thread.
pub fn block_on<F>(class: TaskClass, fut: F) -> F::Output
where
	F: Future + Send,
	F::Output: Send,
{
	tracing::trace!(worker_class = class.as_str(), "worker.block_on");
	match Handle::try_current() {
		Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => tokio::task::block_in_place(|| handle.block_on(fut)),
		Ok(_) => std::thread::scope(|scope| {
			let helper = scope.spawn(|| global_runtime().handle().block_on(fut));
			helper.join().unwrap_or_else(|payload| std::panic::resume_unwind(payload))
		}),
		Err(_) => global_runtime().handle().block_on(fut),
	}
}
