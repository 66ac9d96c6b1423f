// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{convert::Infallible, process};

use framewatch_capture::{BacktraceWalker, CaptureSession, Completion, StackWalker};
use framewatch_sink::ArtifactSink;
use framewatch_type::{MethodSignature, Result, Value};
use tracing::{debug, instrument};

use crate::Config;

/// A capture session wired to its output.
///
/// The `complete_*` methods hand the finished [`Completion`] back to the
/// caller after emitting it. [`Agent::match_found`] and
/// [`Agent::discover_chain`] terminate the process with status 0 instead.
pub struct Agent {
	session: CaptureSession,
	sink: Box<dyn ArtifactSink>,
	walker: Box<dyn StackWalker>,
}

impl Agent {
	pub fn new(config: &Config) -> Self {
		debug!(output = ?config.output.path(), "creating capture agent");
		Self {
			session: CaptureSession::new(),
			sink: config.output.sink(),
			walker: Box::new(BacktraceWalker::new()),
		}
	}

	pub fn with_sink(mut self, sink: impl ArtifactSink + 'static) -> Self {
		self.sink = Box::new(sink);
		self
	}

	pub fn with_walker(mut self, walker: impl StackWalker + 'static) -> Self {
		self.walker = Box::new(walker);
		self
	}

	pub fn with_session(mut self, session: CaptureSession) -> Self {
		self.session = session;
		self
	}

	pub fn session(&self) -> &CaptureSession {
		&self.session
	}

	pub fn in_target(&self) -> bool {
		self.session.in_target()
	}

	pub fn enter_entry_frame(&self, method: impl Into<MethodSignature>, values: &[Value]) -> Result<()> {
		self.session.enter_entry_frame(method.into(), values)
	}

	pub fn exit_entry_frame(&self) -> Result<()> {
		self.session.exit_entry_frame()
	}

	pub fn enter_candidate_frame(&self, method: impl Into<MethodSignature>, values: &[Value]) -> Result<bool> {
		self.session.enter_candidate_frame(method.into(), values)
	}

	pub fn exit_candidate_frame(&self) -> Result<bool> {
		self.session.exit_candidate_frame()
	}

	/// Captures the terminal frame, emits the artifact and returns the
	/// completion.
	#[instrument(name = "framewatch::agent::complete_match", level = "trace", skip_all)]
	pub fn complete_match(&self, method: impl Into<MethodSignature>, values: &[Value]) -> Result<Completion> {
		let completion = self.session.match_found(method.into(), values)?;
		self.sink.emit(completion.artifact());
		Ok(completion)
	}

	/// Emits the call stack reported by the agent's walker and returns the
	/// completion.
	#[instrument(name = "framewatch::agent::complete_discovery", level = "trace", skip_all)]
	pub fn complete_discovery(&self) -> Result<Completion> {
		let completion = self.session.discover_chain(self.walker.as_ref())?;
		self.sink.emit(completion.artifact());
		Ok(completion)
	}

	/// Emits the captured chain and exits the process.
	///
	/// Only returns if the session had already completed.
	pub fn match_found(&self, method: impl Into<MethodSignature>, values: &[Value]) -> Result<Infallible> {
		self.complete_match(method, values)?;
		terminate()
	}

	/// Emits the current call stack and exits the process.
	///
	/// Only returns if the session had already completed.
	pub fn discover_chain(&self) -> Result<Infallible> {
		self.complete_discovery()?;
		terminate()
	}
}

fn terminate() -> ! {
	debug!("capture complete, terminating");
	process::exit(0)
}
