// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::env;

use framewatch::{Agent, BacktraceWalker, Completion, Config, Error, MethodSignature, Result, Value};
use parking_lot::Mutex;
use tracing::{trace, warn};

/// Selects what the demo's instrumentation does.
pub const RULES_VAR: &str = "FRAMEWATCH_DEMO_RULES";

/// Symbol prefix of the probe's own frames, hidden from discovery output.
pub const PROBE_PREFIX: &str = "framewatch_demo::probe::";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rules {
	/// Hooks do nothing.
	Off,
	/// The terminal method reports the call stack.
	Discover,
	/// The chain is recorded and serialized when the terminal method is hit.
	Serialize,
}

impl Rules {
	pub fn from_env() -> Self {
		Self::parse(env::var(RULES_VAR).ok().as_deref())
	}

	pub fn parse(value: Option<&str>) -> Self {
		match value.map(str::trim) {
			Some(value) if value.eq_ignore_ascii_case("discover") => Rules::Discover,
			Some(value) if value.eq_ignore_ascii_case("serialize") => Rules::Serialize,
			_ => Rules::Off,
		}
	}
}

/// The hooks woven into the demo's methods.
///
/// A terminating probe exits the process once the capture completes. An
/// embedded one keeps the [`Completion`] and ignores every later hook.
pub struct Probe {
	rules: Rules,
	agent: Agent,
	terminate: bool,
	completion: Mutex<Option<Completion>>,
}

impl Probe {
	pub fn new(rules: Rules, agent: Agent) -> Self {
		Self {
			rules,
			agent,
			terminate: true,
			completion: Mutex::new(None),
		}
	}

	pub fn embedded(rules: Rules, agent: Agent) -> Self {
		Self {
			terminate: false,
			..Self::new(rules, agent)
		}
	}

	/// A terminating probe whose agent writes where `config` says and hides
	/// the probe's frames from discovery.
	pub fn from_config(rules: Rules, config: &Config) -> Self {
		Self::new(rules, Agent::new(config).with_walker(walker()))
	}

	pub fn rules(&self) -> Rules {
		self.rules
	}

	pub fn agent(&self) -> &Agent {
		&self.agent
	}

	pub fn completion(&self) -> Option<Completion> {
		self.completion.lock().clone()
	}

	#[inline(never)]
	pub fn entry(&self, method: MethodSignature, values: &[Value]) {
		if self.rules == Rules::Serialize {
			report(self.agent.enter_entry_frame(method, values));
		}
	}

	#[inline(never)]
	pub fn exit_entry(&self) {
		if self.rules == Rules::Serialize {
			report(self.agent.exit_entry_frame());
		}
	}

	#[inline(never)]
	pub fn candidate(&self, method: MethodSignature, values: &[Value]) {
		if self.rules == Rules::Serialize {
			report(self.agent.enter_candidate_frame(method, values));
		}
	}

	#[inline(never)]
	pub fn exit_candidate(&self) {
		if self.rules == Rules::Serialize {
			report(self.agent.exit_candidate_frame());
		}
	}

	#[inline(never)]
	pub fn terminal(&self, method: MethodSignature, values: &[Value]) {
		match (self.rules, self.terminate) {
			(Rules::Off, _) => {}
			(Rules::Discover, true) => report(self.agent.discover_chain()),
			(Rules::Serialize, true) => report(self.agent.match_found(method, values)),
			(Rules::Discover, false) => self.keep(self.agent.complete_discovery()),
			(Rules::Serialize, false) => self.keep(self.agent.complete_match(method, values)),
		}
	}

	fn keep(&self, result: Result<Completion>) {
		match result {
			Ok(completion) => *self.completion.lock() = Some(completion),
			Err(err) => report::<()>(Err(err)),
		}
	}
}

/// Discovery walker that skips the probe's frames.
pub fn walker() -> BacktraceWalker {
	BacktraceWalker::new().skip_prefix(PROBE_PREFIX)
}

fn report<T>(result: Result<T>) {
	match result {
		Ok(_) => {}
		Err(Error::SessionComplete) => trace!("capture already complete, hook ignored"),
		Err(err) => warn!(%err, "instrumentation hook failed"),
	}
}

#[cfg(test)]
mod tests {
	use framewatch_testing::sink::CollectingSink;

	use super::*;

	#[test]
	fn test_parse_rules() {
		assert_eq!(Rules::parse(None), Rules::Off);
		assert_eq!(Rules::parse(Some("")), Rules::Off);
		assert_eq!(Rules::parse(Some("discover")), Rules::Discover);
		assert_eq!(Rules::parse(Some(" Serialize ")), Rules::Serialize);
		assert_eq!(Rules::parse(Some("unknown")), Rules::Off);
	}

	#[test]
	fn test_completed_probe_ignores_hooks() {
		let probe = Probe::embedded(Rules::Serialize, Agent::new(&Config::default()).with_sink(CollectingSink::new()));
		probe.terminal(MethodSignature::new("demo.App.end_chain(i64)"), &[]);
		assert!(probe.completion().is_some());

		probe.entry(MethodSignature::new("demo.App.main(Vec<String>)"), &[]);
		probe.exit_candidate();
		assert!(!probe.agent().in_target());
	}
}
