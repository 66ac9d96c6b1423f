// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Rendered form of captured values.
//!
//! JSON layout:
//! - simple values are plain JSON scalars, `Char` is a one character string
//! - objects are JSON objects carrying `"@id"` and `"@type"`; records add
//!   their fields, sequences add `"@items"`, mappings add `"@entries"`
//! - a revisited object is `{"@ref": id}`
//! - a value that could not be rendered is `{"@error": {"kind", "message"}}`

use serde::{
	Serialize, Serializer,
	ser::{SerializeMap, SerializeStruct},
};

#[derive(Debug, Clone, PartialEq)]
pub enum SerializedValue {
	Null,
	Bool(bool),
	Char(char),
	Int(i64),
	UInt(u64),
	Float(f64),
	Str(String),
	Object {
		identity: u64,
		type_name: String,
		body: Body,
	},
	/// An object already rendered earlier in the same pass.
	Reference {
		identity: u64,
	},
	/// Diagnostic placeholder for a value whose structure could not be read.
	Unrenderable {
		kind: String,
		message: String,
	},
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
	Record(Vec<(String, SerializedValue)>),
	Sequence(Vec<SerializedValue>),
	Mapping(Vec<(String, SerializedValue)>),
}

impl SerializedValue {
	/// Identity tag of an object or reference, `None` for untagged values.
	pub fn identity(&self) -> Option<u64> {
		match self {
			SerializedValue::Object {
				identity,
				..
			}
			| SerializedValue::Reference {
				identity,
			} => Some(*identity),
			_ => None,
		}
	}

	pub fn body(&self) -> Option<&Body> {
		match self {
			SerializedValue::Object {
				body,
				..
			} => Some(body),
			_ => None,
		}
	}

	/// Looks up a record field or mapping entry by name.
	pub fn field(&self, name: &str) -> Option<&SerializedValue> {
		match self.body()? {
			Body::Record(fields) | Body::Mapping(fields) => {
				fields.iter().find(|(field, _)| field == name).map(|(_, value)| value)
			}
			Body::Sequence(_) => None,
		}
	}

	pub fn items(&self) -> Option<&[SerializedValue]> {
		match self.body()? {
			Body::Sequence(items) => Some(items),
			_ => None,
		}
	}
}

impl Serialize for SerializedValue {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			SerializedValue::Null => serializer.serialize_unit(),
			SerializedValue::Bool(v) => serializer.serialize_bool(*v),
			SerializedValue::Char(v) => serializer.serialize_char(*v),
			SerializedValue::Int(v) => serializer.serialize_i64(*v),
			SerializedValue::UInt(v) => serializer.serialize_u64(*v),
			SerializedValue::Float(v) if v.is_finite() => serializer.serialize_f64(*v),
			// JSON has no NaN or infinity
			SerializedValue::Float(v) => serializer.collect_str(v),
			SerializedValue::Str(v) => serializer.serialize_str(v),
			SerializedValue::Object {
				identity,
				type_name,
				body,
			} => {
				let len = match body {
					Body::Record(fields) => 2 + fields.len(),
					_ => 3,
				};
				let mut map = serializer.serialize_map(Some(len))?;
				map.serialize_entry("@id", identity)?;
				map.serialize_entry("@type", type_name)?;
				match body {
					Body::Record(fields) => {
						for (name, value) in fields {
							map.serialize_entry(name, value)?;
						}
					}
					Body::Sequence(items) => map.serialize_entry("@items", items)?,
					Body::Mapping(entries) => map.serialize_entry("@entries", &Entries(entries))?,
				}
				map.end()
			}
			SerializedValue::Reference {
				identity,
			} => {
				let mut map = serializer.serialize_map(Some(1))?;
				map.serialize_entry("@ref", identity)?;
				map.end()
			}
			SerializedValue::Unrenderable {
				kind,
				message,
			} => {
				let mut map = serializer.serialize_map(Some(1))?;
				map.serialize_entry(
					"@error",
					&Placeholder {
						kind,
						message,
					},
				)?;
				map.end()
			}
		}
	}
}

struct Entries<'a>(&'a [(String, SerializedValue)]);

impl Serialize for Entries<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut map = serializer.serialize_map(Some(self.0.len()))?;
		for (key, value) in self.0 {
			map.serialize_entry(key, value)?;
		}
		map.end()
	}
}

struct Placeholder<'a> {
	kind: &'a str,
	message: &'a str,
}

impl Serialize for Placeholder<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut state = serializer.serialize_struct("Placeholder", 2)?;
		state.serialize_field("kind", self.kind)?;
		state.serialize_field("message", self.message)?;
		state.end()
	}
}
