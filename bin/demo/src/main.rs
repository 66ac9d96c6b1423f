// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::env;

use framewatch::{Config, logging};
use framewatch_demo::{Probe, Rules, run};

fn main() {
	let config = Config::from_env();
	logging::init(&config.log_filter);

	let probe = Probe::from_config(Rules::from_env(), &config);
	let result = run(&probe, env::args().skip(1).collect());
	println!("chain finished without a match: {}", result);
}
