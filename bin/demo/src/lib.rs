// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! A small program whose methods report to framewatch the way woven
//! instrumentation would: `main -> begin_chain -> mid_chain -> end_chain`,
//! with an overload of `mid_chain` that returns before the chain completes.

mod app;
mod probe;

pub use app::{APP_TYPE, App, Apps, Args, run};
pub use probe::{PROBE_PREFIX, Probe, RULES_VAR, Rules, walker};
