// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::io::{self, Write};

use tracing::error;

use crate::ArtifactSink;

/// Writes the artifact, followed by a newline, to stdout.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
	fn write(&self, artifact: &str) -> io::Result<()> {
		let mut out = io::stdout().lock();
		writeln!(out, "{}", artifact)?;
		out.flush()
	}
}

impl ArtifactSink for ConsoleSink {
	fn emit(&self, artifact: &str) {
		if let Err(err) = self.write(artifact) {
			error!(%err, "failed to write artifact to stdout");
		}
	}
}
