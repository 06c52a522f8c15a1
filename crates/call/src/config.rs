//! Dispatch configuration.

use std::env::{self, VarError};

use serde::Deserialize;

use crate::PlatformKind;

/// Environment variable naming the platform variant.
pub const PLATFORM_ENV: &str = "COURIER_PLATFORM";

/// Errors from loading a [`DispatchConfig`].
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
	/// The platform name is not one of the known variants.
	#[error("unknown platform '{0}' (expected 'generic' or 'main-thread')")]
	UnknownPlatform(String),
	/// The environment variable holds non-unicode data.
	#[error("{PLATFORM_ENV} is not valid unicode")]
	NotUnicode,
	/// The TOML document is malformed.
	#[error(transparent)]
	Toml(#[from] toml::de::Error),
}

/// Selects the dispatch platform and its default extensions.
///
/// ```toml
/// [dispatch]
/// platform = "main-thread"
/// extended-defaults = true
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct DispatchConfig {
	/// Platform variant.
	pub platform: PlatformKind,
	/// Include the future adapter and optional-body converter in the default chains.
	pub extended_defaults: bool,
}

impl Default for DispatchConfig {
	fn default() -> Self {
		Self {
			platform: PlatformKind::Generic,
			extended_defaults: true,
		}
	}
}

impl DispatchConfig {
	/// Reads the platform from [`PLATFORM_ENV`]; unset means generic.
	///
	/// # Errors
	///
	/// Fails if the variable holds an unknown name or non-unicode data.
	pub fn from_env() -> Result<Self, ConfigError> {
		match env::var(PLATFORM_ENV) {
			Ok(name) => Ok(Self {
				platform: name.parse()?,
				..Self::default()
			}),
			Err(VarError::NotPresent) => Ok(Self::default()),
			Err(VarError::NotUnicode(_)) => Err(ConfigError::NotUnicode),
		}
	}

	/// Parses the `[dispatch]` table of a TOML document.
	///
	/// A document without the table yields the defaults.
	///
	/// # Errors
	///
	/// Fails on malformed TOML, unknown keys or unknown platform names.
	pub fn from_toml(src: &str) -> Result<Self, ConfigError> {
		#[derive(Deserialize)]
		struct Document {
			#[serde(default)]
			dispatch: DispatchConfig,
		}
		Ok(toml::from_str::<Document>(src)?.dispatch)
	}
}
