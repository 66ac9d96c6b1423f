// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	any::Any,
	collections::HashSet,
	panic::{self, AssertUnwindSafe},
};

use framewatch_identity::IdentityRegistry;
use framewatch_type::{Body, ObjectRef, SerializedValue, Shape, Value};
use tracing::warn;

/// Nesting depth past which a value is rendered as a placeholder.
///
/// A sequence or mapping costs two JSON levels per step, and the artifact
/// wraps frame values in three more. At this depth the deepest artifact stays
/// within the 128 level limit of a default `serde_json` reader.
pub const MAX_DEPTH: usize = 60;

/// Renders host values into [`SerializedValue`]s.
///
/// One serializer is one pass: an object met a second time within the pass
/// renders as a reference to its identity instead of being expanded again,
/// which also stops traversal of cyclic structures. Only expanded objects
/// count as met, so every reference points at an `@id` in the same pass.
pub struct ValueSerializer<'a> {
	registry: &'a IdentityRegistry,
	visited: HashSet<u64>,
}

impl<'a> ValueSerializer<'a> {
	pub fn new(registry: &'a IdentityRegistry) -> Self {
		Self {
			registry,
			visited: HashSet::new(),
		}
	}

	/// Renders the receiver and arguments of one frame in a single pass.
	pub fn render_all(mut self, values: &[Value]) -> Vec<SerializedValue> {
		values.iter().map(|value| self.render(value)).collect()
	}

	pub fn render(&mut self, value: &Value) -> SerializedValue {
		self.render_at(value, 0)
	}

	fn render_at(&mut self, value: &Value, depth: usize) -> SerializedValue {
		match value {
			Value::Null => SerializedValue::Null,
			Value::Bool(v) => SerializedValue::Bool(*v),
			Value::Char(v) => SerializedValue::Char(*v),
			Value::Int(v) => SerializedValue::Int(*v),
			Value::UInt(v) => SerializedValue::UInt(*v),
			Value::Float(v) => SerializedValue::Float(*v),
			Value::Str(v) => SerializedValue::Str(v.clone()),
			Value::Object(object) => self.render_object(object, depth),
		}
	}

	fn render_object(&mut self, object: &ObjectRef, depth: usize) -> SerializedValue {
		let identity = self.registry.id_of(Some(object));
		if self.visited.contains(&identity) {
			return SerializedValue::Reference {
				identity,
			};
		}

		if depth >= MAX_DEPTH {
			return SerializedValue::Unrenderable {
				kind: "depth".to_string(),
				message: format!("{} nested deeper than {} levels", object.type_name(), MAX_DEPTH),
			};
		}

		let shape = match panic::catch_unwind(AssertUnwindSafe(|| object.shape())) {
			Ok(Ok(shape)) => shape,
			Ok(Err(err)) => {
				warn!(object = ?object, %err, "value could not be rendered");
				return SerializedValue::Unrenderable {
					kind: err.kind,
					message: err.message,
				};
			}
			Err(payload) => {
				let message = panic_message(payload.as_ref());
				warn!(object = ?object, %message, "value descriptor panicked");
				return SerializedValue::Unrenderable {
					kind: "panic".to_string(),
					message,
				};
			}
		};

		self.visited.insert(identity);
		let body = match shape {
			Shape::Record(fields) => Body::Record(self.render_fields(fields, depth)),
			Shape::Sequence(items) => {
				Body::Sequence(items.iter().map(|item| self.render_at(item, depth + 1)).collect())
			}
			Shape::Mapping(entries) => Body::Mapping(self.render_fields(entries, depth)),
		};

		SerializedValue::Object {
			identity,
			type_name: object.type_name().to_string(),
			body,
		}
	}

	fn render_fields(&mut self, fields: Vec<(String, Value)>, depth: usize) -> Vec<(String, SerializedValue)> {
		fields.into_iter().map(|(name, value)| (name, self.render_at(&value, depth + 1))).collect()
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(message) = payload.downcast_ref::<&str>() {
		message.to_string()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"value descriptor panicked".to_string()
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use framewatch_testing::fixture::{Broken, Node, Panicking, Record};
	use framewatch_type::{FrameDescriptor, MethodSignature, ObjectRef, RenderError, Renderable};

	use super::*;
	use crate::artifact::render_stack;

	/// Collects `@id` tags and `@ref` targets of a rendered value.
	fn tags(value: &SerializedValue, ids: &mut HashSet<u64>, refs: &mut Vec<u64>) {
		match value {
			SerializedValue::Object {
				identity,
				body,
				..
			} => {
				ids.insert(*identity);
				let children: Vec<&SerializedValue> = match body {
					Body::Record(fields) | Body::Mapping(fields) => fields.iter().map(|(_, v)| v).collect(),
					Body::Sequence(items) => items.iter().collect(),
				};
				for child in children {
					tags(child, ids, refs);
				}
			}
			SerializedValue::Reference {
				identity,
			} => refs.push(*identity),
			_ => {}
		}
	}

	fn assert_references_resolve(rendered: &[SerializedValue]) {
		let mut ids = HashSet::new();
		let mut refs = Vec::new();
		for value in rendered {
			tags(value, &mut ids, &mut refs);
		}
		for target in refs {
			assert!(ids.contains(&target), "@ref {} has no matching @id", target);
		}
	}

	/// A one element sequence, for building deep chains.
	struct Nest(Value);

	impl Renderable for Nest {
		fn type_name(&self) -> &str {
			"Nest"
		}

		fn shape(&self) -> Result<Shape, RenderError> {
			Ok(Shape::sequence([self.0.clone()]))
		}
	}

	#[test]
	fn test_simple_values_are_untagged() {
		let registry = IdentityRegistry::new();
		let rendered = ValueSerializer::new(&registry).render_all(&[
			Value::from(42),
			Value::from("hello"),
			Value::from('c'),
			Value::from(true),
			Value::from(2.5),
			Value::from("hello"),
		]);

		assert!(rendered.iter().all(|value| value.identity().is_none()));
		assert_eq!(rendered[1], rendered[5]);
		assert!(registry.is_empty());
	}

	#[test]
	fn test_object_is_tagged() {
		let registry = IdentityRegistry::new();
		let record = Record::new("Point", [("x", Value::from(1)), ("y", Value::from(2))]);
		let rendered = ValueSerializer::new(&registry).render(&Value::object(record));

		assert_eq!(rendered.identity(), Some(1));
		assert_eq!(rendered.field("x"), Some(&SerializedValue::Int(1)));
		assert_eq!(rendered.field("y"), Some(&SerializedValue::Int(2)));
	}

	#[test]
	fn test_repeated_object_in_one_pass_is_a_reference() {
		let registry = IdentityRegistry::new();
		let shared = Value::object(Record::new("Shared", [("n", Value::from(7))]));
		let rendered = ValueSerializer::new(&registry).render_all(&[shared.clone(), shared]);

		assert!(matches!(rendered[0], SerializedValue::Object { identity: 1, .. }));
		assert_eq!(
			rendered[1],
			SerializedValue::Reference {
				identity: 1
			}
		);
	}

	#[test]
	fn test_separate_passes_expand_again_with_same_identity() {
		let registry = IdentityRegistry::new();
		let shared = Value::object(Record::new("Shared", [("n", Value::from(7))]));

		let first = ValueSerializer::new(&registry).render(&shared);
		let second = ValueSerializer::new(&registry).render(&shared);

		assert_eq!(first, second);
		assert!(matches!(second, SerializedValue::Object { identity: 1, .. }));
	}

	#[test]
	fn test_cycle_terminates() {
		let registry = IdentityRegistry::new();
		let root = Node::new("root");
		let child = Node::new("child");
		root.adopt(&child);

		let rendered = ValueSerializer::new(&registry).render(&Value::object(root.clone()));

		let root_id = rendered.identity().unwrap();
		let children = rendered.field("children").unwrap();
		let first_child = &children.items().unwrap()[0];
		assert_eq!(first_child.field("name"), Some(&SerializedValue::Str("child".into())));
		assert_eq!(
			first_child.field("parent"),
			Some(&SerializedValue::Reference {
				identity: root_id
			})
		);
	}

	#[test]
	fn test_failure_keeps_siblings() {
		let registry = IdentityRegistry::new();
		let holder = Record::new(
			"Holder",
			[
				("before", Value::from(1)),
				("secret", Value::object(Arc::new(Broken::new("access", "field is not readable")))),
				("after", Value::from(2)),
			],
		);

		let rendered = ValueSerializer::new(&registry).render(&Value::object(holder));

		assert_eq!(rendered.field("before"), Some(&SerializedValue::Int(1)));
		assert_eq!(
			rendered.field("secret"),
			Some(&SerializedValue::Unrenderable {
				kind: "access".into(),
				message: "field is not readable".into(),
			})
		);
		assert_eq!(rendered.field("after"), Some(&SerializedValue::Int(2)));
	}

	#[test]
	fn test_panicking_descriptor_is_contained() {
		let registry = IdentityRegistry::new();
		let rendered = ValueSerializer::new(&registry).render_all(&[
			Value::object(Arc::new(Panicking::new("descriptor exploded"))),
			Value::from(5),
		]);

		assert_eq!(
			rendered[0],
			SerializedValue::Unrenderable {
				kind: "panic".into(),
				message: "descriptor exploded".into(),
			}
		);
		assert_eq!(rendered[1], SerializedValue::Int(5));
	}

	#[test]
	fn test_depth_limit() {
		let registry = IdentityRegistry::new();
		let mut value = Value::from(0);
		for _ in 0..(MAX_DEPTH + 8) {
			value = Value::object(Record::new("Wrapper", [("inner", value)]));
		}

		let mut rendered = ValueSerializer::new(&registry).render(&value);
		let mut depth = 0;
		while let Some(inner) = rendered.field("inner").cloned() {
			rendered = inner;
			depth += 1;
		}

		assert_eq!(depth, MAX_DEPTH);
		assert!(matches!(rendered, SerializedValue::Unrenderable { ref kind, .. } if kind == "depth"));
	}

	#[test]
	fn test_null_object_field() {
		let registry = IdentityRegistry::new();
		let record = Record::new("Orphan", [("parent", Value::Null)]);
		let rendered = ValueSerializer::new(&registry).render(&Value::Object(ObjectRef::new(record)));
		assert_eq!(rendered.field("parent"), Some(&SerializedValue::Null));
	}

	#[test]
	fn test_repeated_broken_object_repeats_placeholder() {
		let registry = IdentityRegistry::new();
		let broken = Value::object(Arc::new(Broken::new("access", "denied")));
		let placeholder = SerializedValue::Unrenderable {
			kind: "access".into(),
			message: "denied".into(),
		};

		let rendered = ValueSerializer::new(&registry).render_all(&[broken.clone(), broken]);

		assert_eq!(rendered, [placeholder.clone(), placeholder]);
		assert_references_resolve(&rendered);
	}

	#[test]
	fn test_references_resolve_around_failed_objects() {
		let registry = IdentityRegistry::new();
		let broken = Value::object(Arc::new(Broken::new("access", "denied")));
		let panicking = Value::object(Arc::new(Panicking::new("descriptor exploded")));
		let holder = Value::object(Record::new(
			"Holder",
			[("first", broken.clone()), ("second", broken.clone()), ("loud", panicking.clone())],
		));

		let rendered =
			ValueSerializer::new(&registry).render_all(&[holder.clone(), broken, panicking, holder]);

		assert!(matches!(rendered[1], SerializedValue::Unrenderable { .. }));
		assert!(matches!(rendered[2], SerializedValue::Unrenderable { ref kind, .. } if kind == "panic"));
		assert!(matches!(rendered[3], SerializedValue::Reference { .. }));
		assert_references_resolve(&rendered);
	}

	#[test]
	fn test_deepest_artifact_parses() {
		let registry = IdentityRegistry::new();
		let mut value = Value::from(0);
		for _ in 0..(MAX_DEPTH + 8) {
			value = Value::object(Arc::new(Nest(value)));
		}

		let values = ValueSerializer::new(&registry).render_all(&[value]);
		let artifact = render_stack(&[FrameDescriptor::new(MethodSignature::new("App.deep(Nest)"), values)]).unwrap();

		let parsed: serde_json::Value = serde_json::from_str(&artifact).unwrap();
		assert_eq!(parsed[0]["values"][0]["@type"], "Nest");
	}
}
