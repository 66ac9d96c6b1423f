// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::path::{Path, PathBuf};

use crate::{ArtifactSink, ConsoleSink, FileSink};

/// Where artifacts go: stdout when no path is set, otherwise the file at
/// `path`, whose parent directories are created as needed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputConfig {
	pub path: Option<PathBuf>,
}

impl OutputConfig {
	pub fn stdout() -> Self {
		Self::default()
	}

	pub fn file(path: impl Into<PathBuf>) -> Self {
		Self {
			path: Some(path.into()),
		}
	}

	pub fn path(&self) -> Option<&Path> {
		self.path.as_deref()
	}

	pub fn sink(&self) -> Box<dyn ArtifactSink> {
		match &self.path {
			Some(path) => Box::new(FileSink::new(path)),
			None => Box::new(ConsoleSink),
		}
	}
}
