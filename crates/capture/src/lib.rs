// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Call-chain capture.
//!
//! The external instrumentation engine reports entries into and exits from
//! the frames of a target call chain. A [`CaptureSession`] records the frames
//! of the chain while it is being matched, discards candidates that return
//! without reaching the end of the chain, and renders the whole chain once
//! the terminal frame is reached.
//!
//! # State machine
//!
//! - **Idle**: nothing recorded
//! - **InTarget**: the entry frame was entered, candidates are recorded
//! - **Matched**: the chain was found (or discovered), the session is done
//!
//! The session assumes a single chain in flight at a time. It serializes
//! each operation but does not isolate concurrent call stacks from one
//! another.

pub use artifact::{render_discovery, render_stack};
pub use discovery::{BacktraceWalker, FixedWalker, StackWalker, discover};
pub use serialize::{MAX_DEPTH, ValueSerializer};
pub use session::{CaptureSession, CaptureState, Completion};
pub use stack::CaptureStack;

mod artifact;
mod discovery;
mod serialize;
mod session;
mod stack;
