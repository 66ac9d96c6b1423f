// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Captures the live call stack of an instrumented program the moment a
//! target call chain is reached.
//!
//! The instrumentation reports entry and exit of the chain's first method,
//! entry and exit of candidate methods, and entry of the terminal method.
//! On a match the recorded frames, with their receivers and arguments
//! serialized in an identity-preserving form, are written to the configured
//! output and the process exits.
//!
//! The free functions operate on a process-wide [`Agent`], created from the
//! environment on first use or explicitly with [`install`].

mod agent;
mod config;
pub mod logging;

use std::convert::Infallible;

pub use agent::Agent;
pub use config::Config;
pub use framewatch_capture as capture;
pub use framewatch_capture::{
	BacktraceWalker, CaptureSession, CaptureState, Completion, FixedWalker, StackWalker, discover,
};
pub use framewatch_identity as identity;
pub use framewatch_sink as sink;
pub use framewatch_sink::{ArtifactSink, OutputConfig};
pub use framewatch_type::{
	Error, FrameDescriptor, MethodSignature, ObjectRef, RenderError, Renderable, Result, SerializedValue, Shape,
	Value,
};
use once_cell::sync::OnceCell;

/// Default configuration values
pub mod defaults {
	/// Destination path of the artifact; stdout when unset.
	pub const OUTPUT_VAR: &str = "FRAMEWATCH_OUTPUT";
	/// Diagnostics filter directive.
	pub const LOG_VAR: &str = "FRAMEWATCH_LOG";
	pub const LOG_FILTER: &str = "warn";
}

static AGENT: OnceCell<Agent> = OnceCell::new();

/// Installs the process-wide agent. The first installation wins; later calls
/// return the agent already in place.
pub fn install(config: Config) -> &'static Agent {
	AGENT.get_or_init(|| {
		logging::init(&config.log_filter);
		Agent::new(&config)
	})
}

/// The process-wide agent, configured from the environment if nothing was
/// installed yet.
pub fn agent() -> &'static Agent {
	AGENT.get_or_init(|| {
		let config = Config::from_env();
		logging::init(&config.log_filter);
		Agent::new(&config)
	})
}

pub fn in_target() -> bool {
	agent().in_target()
}

pub fn enter_entry_frame(method: impl Into<MethodSignature>, values: &[Value]) -> Result<()> {
	agent().enter_entry_frame(method, values)
}

pub fn exit_entry_frame() -> Result<()> {
	agent().exit_entry_frame()
}

pub fn enter_candidate_frame(method: impl Into<MethodSignature>, values: &[Value]) -> Result<bool> {
	agent().enter_candidate_frame(method, values)
}

pub fn exit_candidate_frame() -> Result<bool> {
	agent().exit_candidate_frame()
}

pub fn match_found(method: impl Into<MethodSignature>, values: &[Value]) -> Result<Infallible> {
	agent().match_found(method, values)
}

pub fn discover_chain() -> Result<Infallible> {
	agent().discover_chain()
}
