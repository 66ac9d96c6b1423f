// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{fs, ptr};

use framewatch::{CaptureState, Config, Value};
use framewatch_testing::{
	fixture::Record,
	tempdir::{artifact_path, temp_dir},
};
use serde_json::Value as Json;

// The agent is process-wide, so everything touching it lives in one test.
#[test]
fn test_installed_agent_writes_configured_output() {
	temp_dir(|root| {
		let path = artifact_path(root);
		let installed = framewatch::install(Config::default().with_output(&path).with_log_filter("off"));

		// later installations keep the first agent
		let again = framewatch::install(Config::default());
		assert!(ptr::eq(installed, again));
		assert!(ptr::eq(installed, framewatch::agent()));

		let receiver = Value::object(Record::new("App", vec![("count", Value::from(2))]));

		framewatch::enter_entry_frame("App.main()", &[Value::Null]).unwrap();
		assert!(framewatch::in_target());
		assert!(framewatch::enter_candidate_frame("App.unrelated()", &[receiver.clone()]).unwrap());
		assert!(framewatch::exit_candidate_frame().unwrap());
		assert!(framewatch::enter_candidate_frame("App.begin()", &[receiver.clone()]).unwrap());

		let completion = framewatch::agent().complete_match("App.end()", &[receiver]).unwrap();
		assert_eq!(framewatch::agent().session().state(), CaptureState::Matched);

		let written = fs::read_to_string(&path)?;
		assert_eq!(written, completion.artifact());

		let frames: Json = serde_json::from_str(&written).unwrap();
		let methods: Vec<&str> = frames.as_array().unwrap().iter().map(|f| f["method"].as_str().unwrap()).collect();
		assert_eq!(methods, ["App.main()", "App.begin()", "App.end()"]);

		let begin = &frames[1]["values"][0];
		let end = &frames[2]["values"][0];
		assert_eq!(begin["@type"], "App");
		assert_eq!(begin["count"], 2);
		// each frame is its own pass: expanded again, same identity
		assert_eq!(end["@id"], begin["@id"]);
		assert_eq!(end["count"], 2);
		Ok(())
	})
	.unwrap();
}
