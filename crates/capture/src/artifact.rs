// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use framewatch_type::{FrameDescriptor, Result};

/// Serializes a matched chain: a JSON array of `{"method", "values"}` records
/// in call order.
pub fn render_stack(frames: &[FrameDescriptor]) -> Result<String> {
	Ok(serde_json::to_string(frames)?)
}

/// Newline separated method names, most recent call first.
pub fn render_discovery(methods: &[String]) -> String {
	methods.join("\n")
}
