// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{env, path::PathBuf};

use framewatch_sink::OutputConfig;

use crate::defaults;

/// Agent configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
	pub output: OutputConfig,
	/// `tracing_subscriber::EnvFilter` directive for diagnostics.
	pub log_filter: String,
}

impl Config {
	/// Reads `FRAMEWATCH_OUTPUT` and `FRAMEWATCH_LOG` from the environment.
	pub fn from_env() -> Self {
		Self::from_lookup(|key| env::var(key).ok())
	}

	/// Builds the configuration from an arbitrary variable lookup. An empty
	/// variable counts as unset.
	pub fn from_lookup<F>(lookup: F) -> Self
	where
		F: Fn(&str) -> Option<String>,
	{
		let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

		let output = match lookup(defaults::OUTPUT_VAR) {
			Some(path) => OutputConfig::file(path),
			None => OutputConfig::stdout(),
		};
		let log_filter = lookup(defaults::LOG_VAR).unwrap_or_else(|| defaults::LOG_FILTER.to_string());

		Self {
			output,
			log_filter,
		}
	}

	pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
		self.output = OutputConfig::file(path);
		self
	}

	pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
		self.log_filter = filter.into();
		self
	}
}

impl Default for Config {
	fn default() -> Self {
		Self {
			output: OutputConfig::stdout(),
			log_filter: defaults::LOG_FILTER.to_string(),
		}
	}
}
