// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fs::{self, File},
	io::{BufWriter, Write},
	path::{Path, PathBuf},
};

use framewatch_type::Result;
use tracing::{debug, error};

use crate::{ArtifactSink, ConsoleSink};

/// Writes the artifact as the entire content of a file.
#[derive(Debug, Clone)]
pub struct FileSink {
	path: PathBuf,
	fallback: ConsoleSink,
}

impl FileSink {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self {
			path: path.into(),
			fallback: ConsoleSink,
		}
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Creates the parent directories, then replaces the file content with
	/// exactly the artifact bytes.
	pub fn write(&self, artifact: &str) -> Result<()> {
		if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
			fs::create_dir_all(parent)?;
		}

		let mut out = BufWriter::new(File::create(&self.path)?);
		out.write_all(artifact.as_bytes())?;
		out.flush()?;
		Ok(())
	}
}

impl ArtifactSink for FileSink {
	fn emit(&self, artifact: &str) {
		match self.write(artifact) {
			Ok(()) => debug!(path = %self.path.display(), bytes = artifact.len(), "artifact written"),
			Err(err) => {
				error!(path = %self.path.display(), %err, "failed to write artifact file, falling back to stdout");
				self.fallback.emit(artifact);
			}
		}
	}
}
