// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Host-side description of receivers and arguments.

use std::{
	fmt,
	sync::{Arc, Weak},
};

/// A receiver or argument value handed over by the instrumentation engine.
///
/// Every variant except [`Value::Object`] is a simple value: it is copied by
/// value and never receives an identity tag.
#[derive(Clone)]
pub enum Value {
	Null,
	Bool(bool),
	Char(char),
	Int(i64),
	UInt(u64),
	Float(f64),
	Str(String),
	Object(ObjectRef),
}

impl Value {
	pub fn object<T: Renderable>(object: Arc<T>) -> Self {
		Value::Object(ObjectRef::new(object))
	}

	pub fn is_simple(&self) -> bool {
		!matches!(self, Value::Object(_))
	}

	pub fn as_object(&self) -> Option<&ObjectRef> {
		match self {
			Value::Object(object) => Some(object),
			_ => None,
		}
	}
}

impl fmt::Debug for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::Null => f.write_str("Null"),
			Value::Bool(v) => write!(f, "Bool({v})"),
			Value::Char(v) => write!(f, "Char({v:?})"),
			Value::Int(v) => write!(f, "Int({v})"),
			Value::UInt(v) => write!(f, "UInt({v})"),
			Value::Float(v) => write!(f, "Float({v})"),
			Value::Str(v) => write!(f, "Str({v:?})"),
			Value::Object(object) => write!(f, "Object({object:?})"),
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Value::Bool(value)
	}
}

impl From<char> for Value {
	fn from(value: char) -> Self {
		Value::Char(value)
	}
}

impl From<i32> for Value {
	fn from(value: i32) -> Self {
		Value::Int(value as i64)
	}
}

impl From<i64> for Value {
	fn from(value: i64) -> Self {
		Value::Int(value)
	}
}

impl From<u64> for Value {
	fn from(value: u64) -> Self {
		Value::UInt(value)
	}
}

impl From<usize> for Value {
	fn from(value: usize) -> Self {
		Value::UInt(value as u64)
	}
}

impl From<f64> for Value {
	fn from(value: f64) -> Self {
		Value::Float(value)
	}
}

impl From<&str> for Value {
	fn from(value: &str) -> Self {
		Value::Str(value.to_string())
	}
}

impl From<String> for Value {
	fn from(value: String) -> Self {
		Value::Str(value)
	}
}

impl From<ObjectRef> for Value {
	fn from(value: ObjectRef) -> Self {
		Value::Object(value)
	}
}

impl<T: Into<Value>> From<Option<T>> for Value {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or(Value::Null)
	}
}

/// Structural descriptor a host supplies for its complex values.
///
/// `shape` is called at most once per value per serialization pass. It may
/// fail for values whose contents cannot be read; the failure is rendered
/// in place of the value and does not affect its siblings.
pub trait Renderable: Send + Sync + 'static {
	fn type_name(&self) -> &str {
		std::any::type_name::<Self>()
	}

	fn shape(&self) -> Result<Shape, RenderError>;
}

/// The structural contents of a complex value.
#[derive(Debug, Clone)]
pub enum Shape {
	/// A structured record: named fields in declaration order.
	Record(Vec<(String, Value)>),
	/// An ordered sequence: arrays, lists, sets.
	Sequence(Vec<Value>),
	/// A keyed mapping.
	Mapping(Vec<(String, Value)>),
}

impl Shape {
	pub fn record<I, K, V>(fields: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<Value>,
	{
		Shape::Record(fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}

	pub fn sequence<I, V>(items: I) -> Self
	where
		I: IntoIterator<Item = V>,
		V: Into<Value>,
	{
		Shape::Sequence(items.into_iter().map(Into::into).collect())
	}

	pub fn mapping<I, K, V>(entries: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<Value>,
	{
		Shape::Mapping(entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
	}
}

/// Reason a complex value could not be traversed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct RenderError {
	pub kind: String,
	pub message: String,
}

impl RenderError {
	pub fn new(kind: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			kind: kind.into(),
			message: message.into(),
		}
	}
}

/// Shared handle to a live host object.
///
/// Identity is the identity of the underlying allocation: clones of the same
/// `ObjectRef` (or of the `Arc` it was built from) denote the same object.
#[derive(Clone)]
pub struct ObjectRef(Arc<dyn Renderable>);

impl ObjectRef {
	pub fn new<T: Renderable>(object: Arc<T>) -> Self {
		Self(object)
	}

	pub fn from_dyn(object: Arc<dyn Renderable>) -> Self {
		Self(object)
	}

	pub fn type_name(&self) -> &str {
		self.0.type_name()
	}

	pub fn shape(&self) -> Result<Shape, RenderError> {
		self.0.shape()
	}

	/// Address of the shared allocation. Stable for as long as any strong
	/// or weak handle to the object exists.
	pub fn address(&self) -> usize {
		Arc::as_ptr(&self.0) as *const () as usize
	}

	pub fn downgrade(&self) -> Weak<dyn Renderable> {
		Arc::downgrade(&self.0)
	}

	pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
		self.address() == other.address()
	}
}

impl fmt::Debug for ObjectRef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}@{:#x}", self.type_name(), self.address())
	}
}
