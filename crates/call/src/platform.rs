//! Process-wide dispatch platform.
//!
//! The platform decides which thread asynchronous callbacks run on and which
//! default extension chains the call-building layer starts from. It is
//! resolved once per process: either installed explicitly with
//! [`Platform::install`] before first use, or resolved lazily from
//! [`DispatchConfig::from_env`] on the first [`Platform::get`].

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, OnceLock};

use courier_worker::{Executor, MainLoop, MainThreadExecutor, main_thread};
use parking_lot::Mutex;
use serde::Deserialize;

use crate::{CallAdapterFactory, ConfigError, ConverterFactory, DispatchConfig};

static PLATFORM: OnceLock<Platform> = OnceLock::new();

/// Known platform variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PlatformKind {
	/// No affinity thread: callbacks run where the exchange completed.
	Generic,
	/// Callbacks are redirected to a single main/UI thread.
	MainThread,
}

impl FromStr for PlatformKind {
	type Err = ConfigError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim() {
			"generic" => Ok(Self::Generic),
			"main-thread" => Ok(Self::MainThread),
			other => Err(ConfigError::UnknownPlatform(other.to_owned())),
		}
	}
}

/// Environment strategy for callback dispatch and default extensions.
pub struct Platform {
	kind: PlatformKind,
	extended_defaults: bool,
	callback_executor: Option<Arc<dyn Executor>>,
	main_loop: Mutex<Option<MainLoop>>,
}

impl Platform {
	/// The process-wide platform, resolving it on first access.
	///
	/// Concurrent first accesses all observe the same instance.
	pub fn get() -> &'static Platform {
		PLATFORM.get_or_init(Self::from_env)
	}

	/// Installs `platform` as the process-wide platform.
	///
	/// # Errors
	///
	/// Hands `platform` back if a platform was already resolved.
	pub fn install(platform: Platform) -> Result<&'static Platform, Platform> {
		PLATFORM.set(platform)?;
		Ok(Self::get())
	}

	/// Platform without an affinity thread.
	pub fn generic() -> Self {
		Self {
			kind: PlatformKind::Generic,
			extended_defaults: true,
			callback_executor: None,
			main_loop: Mutex::new(None),
		}
	}

	/// Main-thread platform owning a fresh loop.
	///
	/// The thread meant to receive callbacks claims the loop with
	/// [`take_main_loop`](Self::take_main_loop) and runs it.
	pub fn main_thread() -> Self {
		let (executor, main_loop) = main_thread();
		Self {
			main_loop: Mutex::new(Some(main_loop)),
			..Self::with_main_thread(executor)
		}
	}

	/// Main-thread platform posting to a loop the caller already owns.
	pub fn with_main_thread(executor: MainThreadExecutor) -> Self {
		Self {
			kind: PlatformKind::MainThread,
			extended_defaults: true,
			callback_executor: Some(Arc::new(executor)),
			main_loop: Mutex::new(None),
		}
	}

	/// Builds the platform `config` describes.
	pub fn from_config(config: &DispatchConfig) -> Self {
		let platform = match config.platform {
			PlatformKind::Generic => Self::generic(),
			PlatformKind::MainThread => Self::main_thread(),
		};
		platform.extended_defaults(config.extended_defaults)
	}

	fn from_env() -> Self {
		let config = DispatchConfig::from_env().unwrap_or_else(|err| {
			tracing::warn!(%err, "invalid dispatch configuration; using generic platform");
			DispatchConfig::default()
		});
		tracing::trace!(platform = ?config.platform, "platform.resolve");
		Self::from_config(&config)
	}

	/// Enables or disables the future adapter and optional-body converter.
	#[must_use]
	pub fn extended_defaults(mut self, enabled: bool) -> Self {
		self.extended_defaults = enabled;
		self
	}

	/// Which variant this is.
	pub fn kind(&self) -> PlatformKind {
		self.kind
	}

	/// Executor redirecting callbacks to the affinity thread, if the platform has one.
	pub fn default_callback_executor(&self) -> Option<Arc<dyn Executor>> {
		self.callback_executor.clone()
	}

	/// Default call adapter chain, most specific first.
	///
	/// `callback_executor` is bound into the trailing executor factory; pass
	/// [`default_callback_executor`](Self::default_callback_executor) unless
	/// the caller overrides it.
	pub fn default_call_adapter_factories(&self, callback_executor: Option<Arc<dyn Executor>>) -> Vec<CallAdapterFactory> {
		let executor = CallAdapterFactory::Executor(callback_executor);
		if self.extended_defaults {
			vec![CallAdapterFactory::Future, executor]
		} else {
			vec![executor]
		}
	}

	/// Default converter chain, most specific first.
	pub fn default_converter_factories(&self) -> Vec<ConverterFactory> {
		if self.extended_defaults {
			vec![ConverterFactory::Optional]
		} else {
			Vec::new()
		}
	}

	/// Claims the main loop of a platform built with [`main_thread`](Self::main_thread).
	///
	/// Returns `None` for other platforms and after the first claim.
	pub fn take_main_loop(&self) -> Option<MainLoop> {
		self.main_loop.lock().take()
	}
}

impl fmt::Debug for Platform {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Platform")
			.field("kind", &self.kind)
			.field("extended_defaults", &self.extended_defaults)
			.field("callback_executor", &self.callback_executor.is_some())
			.finish_non_exhaustive()
	}
}
