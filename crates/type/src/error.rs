// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::io;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Leaving the entry frame while candidate frames are still recorded.
	/// The instrumentation rules that drive the capture are unsound.
	#[error("exiting the entry frame with {remaining} candidate frame(s) still on the capture stack")]
	UnbalancedStack {
		remaining: usize,
	},

	#[error("no candidate frame to exit, only the entry frame is on the capture stack")]
	NoCandidateFrame,

	#[error("{operation} requires an active target chain")]
	NotInTarget {
		operation: &'static str,
	},

	#[error("entry frame entered while a target chain is already active")]
	AlreadyInTarget,

	#[error("capture session already completed")]
	SessionComplete,

	#[error("i/o error: {0}")]
	Io(#[from] io::Error),

	#[error("json error: {0}")]
	Json(#[from] serde_json::Error),
}

impl Error {
	/// True for faults caused by instrumentation that does not respect
	/// the enter/exit discipline.
	pub fn is_stack_discipline(&self) -> bool {
		matches!(
			self,
			Error::UnbalancedStack { .. }
				| Error::NoCandidateFrame
				| Error::NotInTarget { .. }
				| Error::AlreadyInTarget
		)
	}
}
