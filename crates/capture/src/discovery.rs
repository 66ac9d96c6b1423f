// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Discovery mode: report the names of the methods on the real call stack so
//! an operator can learn the exact names to configure a target chain with.

use crate::artifact::render_discovery;

/// Source of the current call stack, most recent call first.
pub trait StackWalker: Send + Sync {
	fn walk(&self) -> Vec<String>;
}

/// Walks the native stack of the calling thread and resolves symbol names.
///
/// Names are demangled without their hash suffix; file names and line
/// numbers are omitted. Leading frames that belong to the capture machinery
/// itself are dropped, so the first reported frame is the instrumented code.
pub struct BacktraceWalker {
	skip_prefixes: Vec<String>,
}

const INTERNAL_PREFIXES: &[&str] = &[
	"backtrace::",
	"<backtrace::",
	"framewatch_capture::",
	"<framewatch_capture::",
	"framewatch::",
	"<framewatch::",
];

impl BacktraceWalker {
	pub fn new() -> Self {
		Self {
			skip_prefixes: INTERNAL_PREFIXES.iter().map(|prefix| prefix.to_string()).collect(),
		}
	}

	/// Also drops leading frames whose name starts with `prefix`, such as the
	/// glue code an instrumentation engine inserts.
	pub fn skip_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.skip_prefixes.push(prefix.into());
		self
	}

	fn is_internal(&self, name: &str) -> bool {
		self.skip_prefixes.iter().any(|prefix| name.starts_with(prefix.as_str()))
	}
}

impl Default for BacktraceWalker {
	fn default() -> Self {
		Self::new()
	}
}

impl StackWalker for BacktraceWalker {
	fn walk(&self) -> Vec<String> {
		let mut names = Vec::new();
		backtrace::trace(|frame| {
			backtrace::resolve_frame(frame, |symbol| {
				if let Some(name) = symbol.name() {
					names.push(format!("{name:#}"));
				}
			});
			true
		});

		let first = names.iter().position(|name| !self.is_internal(name)).unwrap_or(names.len());
		names.split_off(first)
	}
}

/// A walker reporting a fixed stack, for hosts that track their own frames.
#[derive(Debug, Clone, Default)]
pub struct FixedWalker {
	methods: Vec<String>,
}

impl FixedWalker {
	pub fn new<I, S>(methods: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			methods: methods.into_iter().map(Into::into).collect(),
		}
	}
}

impl StackWalker for FixedWalker {
	fn walk(&self) -> Vec<String> {
		self.methods.clone()
	}
}

/// Renders the discovery artifact for the stack reported by `walker`.
pub fn discover(walker: &dyn StackWalker) -> String {
	render_discovery(&walker.walk())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[inline(never)]
	fn probe(walker: &BacktraceWalker) -> Vec<String> {
		walker.walk()
	}

	#[test]
	fn test_fixed_walker() {
		let walker = FixedWalker::new(["App.end", "App.main"]);
		assert_eq!(discover(&walker), "App.end\nApp.main");
	}

	#[test]
	fn test_backtrace_walker_skips_itself() {
		let walker = BacktraceWalker::new();
		let names = probe(&walker);

		assert!(!names.is_empty());
		assert!(!walker.is_internal(&names[0]));
		assert!(names.iter().all(|name| !name.starts_with("backtrace::")));
	}

	#[test]
	fn test_backtrace_walker_is_idempotent() {
		let walker = BacktraceWalker::new();
		let runs: Vec<Vec<String>> = (0..2).map(|_| probe(&walker)).collect();
		assert_eq!(runs[0], runs[1]);
	}

	#[test]
	fn test_skip_prefix() {
		let walker = BacktraceWalker::new().skip_prefix("my_glue::");
		assert!(walker.is_internal("my_glue::enter"));
		assert!(walker.is_internal("framewatch_capture::session::CaptureSession::discover_chain"));
		assert!(!walker.is_internal("framewatch_demo::App::end_chain"));
	}
}
