// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fs,
	process::{Command, Output},
};

use framewatch_testing::tempdir::{artifact_path, temp_dir};
use serde_json::Value as Json;

fn demo(rules: &str) -> Command {
	let mut command = Command::new(env!("CARGO_BIN_EXE_framewatch-demo"));
	command.env("FRAMEWATCH_DEMO_RULES", rules).env("FRAMEWATCH_LOG", "off").env_remove("FRAMEWATCH_OUTPUT");
	command
}

fn run(command: &mut Command) -> Output {
	let output = command.output().unwrap();
	assert!(output.status.success(), "demo failed: {}", String::from_utf8_lossy(&output.stderr));
	output
}

fn methods(artifact: &str) -> Vec<String> {
	let frames: Json = serde_json::from_str(artifact).unwrap();
	frames.as_array().unwrap().iter().map(|frame| frame["method"].as_str().unwrap().to_string()).collect()
}

#[test]
fn test_serialize_to_stdout() {
	let output = run(&mut demo("serialize"));
	let stdout = String::from_utf8(output.stdout).unwrap();

	// the process ends at the match, the program never finishes
	assert!(!stdout.contains("without a match"));
	assert_eq!(
		methods(stdout.trim_end()),
		["demo.App.main(Vec<String>)", "demo.App.begin_chain(App)", "demo.App.mid_chain(i64)", "demo.App.end_chain(i64)"]
	);
}

#[test]
fn test_discover_to_stdout() {
	let output = run(&mut demo("discover"));
	let stdout = String::from_utf8(output.stdout).unwrap();
	let lines: Vec<&str> = stdout.lines().collect();

	assert!(lines[0].ends_with("App::end_chain"), "unexpected top frame {}", lines[0]);
	let position = |name: &str| lines.iter().position(|line| line.ends_with(name)).unwrap();
	assert!(position("App::mid_chain_int") < position("App::begin_chain"));
	assert!(position("App::begin_chain") < position("framewatch_demo::app::run"));
	assert!(position("framewatch_demo::app::run") < position("framewatch_demo::main"));
}

#[test]
fn test_serialize_to_file() {
	temp_dir(|root| {
		let path = artifact_path(root);

		let output = run(demo("serialize").env("FRAMEWATCH_OUTPUT", &path));
		assert!(output.stdout.is_empty());
		let first = fs::read_to_string(&path)?;
		assert_eq!(methods(&first).len(), 4);

		// a second run replaces the artifact instead of appending to it
		run(demo("serialize").env("FRAMEWATCH_OUTPUT", &path));
		assert_eq!(fs::read_to_string(&path)?, first);
		Ok(())
	})
	.unwrap();
}

#[test]
fn test_without_rules_program_completes() {
	let output = run(demo("off").arg("extra"));
	let stdout = String::from_utf8(output.stdout).unwrap();
	assert_eq!(stdout, "chain finished without a match: 21\n");
}
