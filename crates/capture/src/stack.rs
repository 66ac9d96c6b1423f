// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use framewatch_type::{Error, FrameDescriptor, Result};

/// Frames of the partially matched target chain, oldest first.
///
/// Invariant: `in_target` holds exactly when the stack is non-empty, and then
/// its bottom frame is the entry frame. Every mutation either keeps the
/// invariant or fails without touching the stack.
#[derive(Debug, Default)]
pub struct CaptureStack {
	frames: Vec<FrameDescriptor>,
	in_target: bool,
}

impl CaptureStack {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn in_target(&self) -> bool {
		self.in_target
	}

	pub fn depth(&self) -> usize {
		self.frames.len()
	}

	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	pub fn frames(&self) -> &[FrameDescriptor] {
		&self.frames
	}

	pub fn top(&self) -> Option<&FrameDescriptor> {
		self.frames.last()
	}

	/// Records the entry frame and starts tracking the chain.
	pub fn open(&mut self, entry: FrameDescriptor) -> Result<()> {
		if self.in_target {
			return Err(Error::AlreadyInTarget);
		}
		self.frames.push(entry);
		self.in_target = true;
		Ok(())
	}

	/// Removes the entry frame and stops tracking.
	///
	/// Fails if candidate frames are still recorded: the entry frame can only
	/// return after every call it made has returned.
	pub fn close(&mut self) -> Result<FrameDescriptor> {
		if !self.in_target {
			return Err(Error::NotInTarget {
				operation: "exit_entry_frame",
			});
		}
		if self.frames.len() > 1 {
			return Err(Error::UnbalancedStack {
				remaining: self.frames.len() - 1,
			});
		}
		let entry = self.frames.pop().ok_or(Error::NotInTarget {
			operation: "exit_entry_frame",
		})?;
		self.in_target = false;
		Ok(entry)
	}

	/// Records a candidate frame on top of the chain.
	pub fn push(&mut self, frame: FrameDescriptor) -> Result<()> {
		if !self.in_target {
			return Err(Error::NotInTarget {
				operation: "enter_candidate_frame",
			});
		}
		self.frames.push(frame);
		Ok(())
	}

	/// Discards the most recent candidate frame.
	pub fn pop(&mut self) -> Result<FrameDescriptor> {
		if !self.in_target {
			return Err(Error::NotInTarget {
				operation: "exit_candidate_frame",
			});
		}
		if self.frames.len() <= 1 {
			return Err(Error::NoCandidateFrame);
		}
		self.frames.pop().ok_or(Error::NoCandidateFrame)
	}

	/// The recorded chain followed by `terminal`, in call order. The stack
	/// itself is left as it is.
	pub fn snapshot_with(&self, terminal: FrameDescriptor) -> Vec<FrameDescriptor> {
		let mut frames = Vec::with_capacity(self.frames.len() + 1);
		frames.extend_from_slice(&self.frames);
		frames.push(terminal);
		frames
	}
}
