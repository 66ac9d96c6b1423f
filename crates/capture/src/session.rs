// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use framewatch_identity::IdentityRegistry;
use framewatch_type::{Error, FrameDescriptor, MethodSignature, Result, Value};
use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, error, info, instrument, trace, warn};

use crate::{
	artifact::{render_discovery, render_stack},
	discovery::StackWalker,
	serialize::ValueSerializer,
	stack::CaptureStack,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureState {
	Idle,
	InTarget,
	Matched,
}

/// Result of a session that reached its terminal state.
#[derive(Debug, Clone)]
pub enum Completion {
	/// The target chain was matched.
	Matched {
		frames: Vec<FrameDescriptor>,
		artifact: String,
	},
	/// The call stack was reported in discovery mode.
	Discovered {
		methods: Vec<String>,
		artifact: String,
	},
}

impl Completion {
	pub fn artifact(&self) -> &str {
		match self {
			Completion::Matched {
				artifact,
				..
			}
			| Completion::Discovered {
				artifact,
				..
			} => artifact,
		}
	}

	pub fn into_artifact(self) -> String {
		match self {
			Completion::Matched {
				artifact,
				..
			}
			| Completion::Discovered {
				artifact,
				..
			} => artifact,
		}
	}
}

struct Inner {
	stack: CaptureStack,
	complete: bool,
}

/// Drives the capture stack from the instrumentation entry points.
///
/// Frame values are rendered when the frame is entered, outside of the
/// session lock, so a value descriptor may itself run instrumented code.
pub struct CaptureSession {
	registry: Arc<IdentityRegistry>,
	inner: Mutex<Inner>,
}

impl CaptureSession {
	pub fn new() -> Self {
		Self::with_registry(Arc::new(IdentityRegistry::new()))
	}

	pub fn with_registry(registry: Arc<IdentityRegistry>) -> Self {
		Self {
			registry,
			inner: Mutex::new(Inner {
				stack: CaptureStack::new(),
				complete: false,
			}),
		}
	}

	pub fn registry(&self) -> &Arc<IdentityRegistry> {
		&self.registry
	}

	pub fn state(&self) -> CaptureState {
		let inner = self.inner.lock();
		if inner.complete {
			CaptureState::Matched
		} else if inner.stack.in_target() {
			CaptureState::InTarget
		} else {
			CaptureState::Idle
		}
	}

	pub fn in_target(&self) -> bool {
		self.inner.lock().stack.in_target()
	}

	pub fn depth(&self) -> usize {
		self.inner.lock().stack.depth()
	}

	/// Snapshot of the recorded frames, oldest first.
	pub fn frames(&self) -> Vec<FrameDescriptor> {
		self.inner.lock().stack.frames().to_vec()
	}

	/// The first frame of the target chain was entered: start recording.
	#[instrument(name = "capture::session::enter_entry_frame", level = "trace", skip(self, values), fields(method = %method))]
	pub fn enter_entry_frame(&self, method: MethodSignature, values: &[Value]) -> Result<()> {
		self.live()?;
		let entry = self.capture(method, values);
		let mut inner = self.live()?;
		if let Err(err) = inner.stack.open(entry) {
			error!(%err, "capture stack discipline violated");
			return Err(err);
		}
		debug!("entered target chain");
		Ok(())
	}

	/// The first frame of the target chain returned without a match: the
	/// chain seen so far is not the target, drop it.
	///
	/// Candidate frames still on the stack mean the instrumentation is
	/// unbalanced. That is reported as [`Error::UnbalancedStack`] and the
	/// stack is left untouched.
	#[instrument(name = "capture::session::exit_entry_frame", level = "trace", skip(self))]
	pub fn exit_entry_frame(&self) -> Result<()> {
		let mut inner = self.live()?;
		match inner.stack.close() {
			Ok(entry) => {
				drop(inner);
				debug!(method = %entry.method(), "left target chain without a match");
				self.registry.purge();
				Ok(())
			}
			Err(err) => {
				error!(%err, depth = inner.stack.depth(), "capture stack discipline violated");
				Err(err)
			}
		}
	}

	/// A call that may be the next link of the chain was entered.
	///
	/// Returns whether the frame was recorded; outside of the target chain
	/// candidates are ignored.
	#[instrument(name = "capture::session::enter_candidate_frame", level = "trace", skip(self, values), fields(method = %method))]
	pub fn enter_candidate_frame(&self, method: MethodSignature, values: &[Value]) -> Result<bool> {
		if !self.live()?.stack.in_target() {
			trace!("not in target chain, candidate ignored");
			return Ok(false);
		}
		let frame = self.capture(method, values);
		let mut inner = self.live()?;
		if let Err(err) = inner.stack.push(frame) {
			error!(%err, "capture stack discipline violated");
			return Err(err);
		}
		trace!(depth = inner.stack.depth(), "candidate frame recorded");
		Ok(true)
	}

	/// A candidate returned before the end of the chain was reached, so it is
	/// not part of the target: discard its frame.
	///
	/// Returns whether a frame was discarded; outside of the target chain
	/// this is a no-op.
	#[instrument(name = "capture::session::exit_candidate_frame", level = "trace", skip(self))]
	pub fn exit_candidate_frame(&self) -> Result<bool> {
		let mut inner = self.live()?;
		if !inner.stack.in_target() {
			trace!("not in target chain, candidate exit ignored");
			return Ok(false);
		}
		match inner.stack.pop() {
			Ok(frame) => {
				trace!(method = %frame.method(), depth = inner.stack.depth(), "candidate frame discarded");
				Ok(true)
			}
			Err(err) => {
				error!(%err, "capture stack discipline violated");
				Err(err)
			}
		}
	}

	/// The terminal frame of the chain was entered: render the recorded
	/// frames followed by the terminal one and complete the session.
	#[instrument(name = "capture::session::match_found", level = "trace", skip(self, values), fields(method = %method))]
	pub fn match_found(&self, method: MethodSignature, values: &[Value]) -> Result<Completion> {
		self.live()?;
		let terminal = self.capture(method, values);
		let mut inner = self.live()?;
		if !inner.stack.in_target() {
			warn!("match reported outside of a target chain, only the terminal frame is captured");
		}

		let frames = inner.stack.snapshot_with(terminal);
		let artifact = render_stack(&frames)?;
		inner.complete = true;

		info!(frames = frames.len(), bytes = artifact.len(), "target chain matched");
		Ok(Completion::Matched {
			frames,
			artifact,
		})
	}

	/// Reports the method names on the call stack seen by `walker` and
	/// completes the session. Independent of the recorded chain.
	#[instrument(name = "capture::session::discover_chain", level = "trace", skip(self, walker))]
	pub fn discover_chain(&self, walker: &dyn StackWalker) -> Result<Completion> {
		let mut inner = self.live()?;
		let methods = walker.walk();
		let artifact = render_discovery(&methods);
		inner.complete = true;

		info!(frames = methods.len(), "call stack discovered");
		Ok(Completion::Discovered {
			methods,
			artifact,
		})
	}

	fn live(&self) -> Result<MutexGuard<'_, Inner>> {
		let inner = self.inner.lock();
		if inner.complete {
			return Err(Error::SessionComplete);
		}
		Ok(inner)
	}

	fn capture(&self, method: MethodSignature, values: &[Value]) -> FrameDescriptor {
		trace!(%method, values = values.len(), "capturing frame");
		let values = ValueSerializer::new(&self.registry).render_all(values);
		FrameDescriptor::new(method, values)
	}
}

impl Default for CaptureSession {
	fn default() -> Self {
		Self::new()
	}
}
