// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::io;

use tracing_subscriber::EnvFilter;

use crate::defaults;

/// Installs a stderr `fmt` subscriber filtered by `filter`.
///
/// Diagnostics go to stderr so they never interleave with an artifact
/// written to stdout. Does nothing if a global subscriber is already set.
pub fn init(filter: &str) {
	let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new(defaults::LOG_FILTER));
	let _ = tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).with_target(true).try_init();
}
