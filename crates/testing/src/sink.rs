// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use framewatch_sink::ArtifactSink;
use parking_lot::Mutex;

/// Keeps every emitted artifact in memory. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct CollectingSink {
	artifacts: Arc<Mutex<Vec<String>>>,
}

impl CollectingSink {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn artifacts(&self) -> Vec<String> {
		self.artifacts.lock().clone()
	}

	pub fn last(&self) -> Option<String> {
		self.artifacts.lock().last().cloned()
	}
}

impl ArtifactSink for CollectingSink {
	fn emit(&self, artifact: &str) {
		self.artifacts.lock().push(artifact.to_string());
	}
}
