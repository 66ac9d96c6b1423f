// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Output sinks for capture artifacts.
//!
//! Emitting never fails from the caller's point of view: the process is
//! about to terminate after a match, so a write fault is logged and the
//! artifact falls back to stdout instead of being lost.

pub use config::OutputConfig;
pub use console::ConsoleSink;
pub use file::FileSink;

mod config;
mod console;
mod file;

/// Destination of a finished capture artifact.
pub trait ArtifactSink: Send + Sync {
	fn emit(&self, artifact: &str);
}

impl<S: ArtifactSink + ?Sized> ArtifactSink for Box<S> {
	fn emit(&self, artifact: &str) {
		(**self).emit(artifact)
	}
}
