// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::fmt::{self, Display, Formatter};

use serde::Serialize;

use crate::serialized::SerializedValue;

/// `<fully-qualified-type>.<method-name>(<parameter-types>)`, without the
/// return type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MethodSignature(String);

impl MethodSignature {
	pub fn new(qualified: impl Into<String>) -> Self {
		Self(qualified.into())
	}

	/// Builds a signature from the declaring type and a method signature as
	/// reported by the weaving engine, `name(params) ReturnType`. The return
	/// type after the parameter list is dropped.
	pub fn from_parts(type_name: &str, signature: &str) -> Self {
		let params_end = signature.rfind(')').map_or(0, |close| close + 1);
		let signature = match signature[params_end..].find(' ') {
			Some(space) => &signature[..params_end + space],
			None => signature,
		};
		Self(format!("{}.{}", type_name, signature))
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// The method name without its declaring type or parameters.
	pub fn method_name(&self) -> &str {
		let head = match self.0.find('(') {
			Some(open) => &self.0[..open],
			None => &self.0,
		};
		match head.rfind('.') {
			Some(dot) => &head[dot + 1..],
			None => head,
		}
	}
}

impl Display for MethodSignature {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for MethodSignature {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<String> for MethodSignature {
	fn from(value: String) -> Self {
		Self(value)
	}
}

/// One captured call: the method and its rendered receiver and arguments.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameDescriptor {
	method: MethodSignature,
	values: Vec<SerializedValue>,
}

impl FrameDescriptor {
	pub fn new(method: MethodSignature, values: Vec<SerializedValue>) -> Self {
		Self {
			method,
			values,
		}
	}

	pub fn method(&self) -> &MethodSignature {
		&self.method
	}

	pub fn values(&self) -> &[SerializedValue] {
		&self.values
	}
}
