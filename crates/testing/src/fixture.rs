// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Host objects for exercising the serializer and the capture session.

use std::sync::{Arc, Weak};

use framewatch_type::{RenderError, Renderable, Shape, Value};
use parking_lot::Mutex;

/// An immutable record with a fixed type name and fields.
pub struct Record {
	type_name: String,
	fields: Vec<(String, Value)>,
}

impl Record {
	pub fn new<I, K>(type_name: impl Into<String>, fields: I) -> Arc<Self>
	where
		I: IntoIterator<Item = (K, Value)>,
		K: Into<String>,
	{
		Arc::new(Self {
			type_name: type_name.into(),
			fields: fields.into_iter().map(|(k, v)| (k.into(), v)).collect(),
		})
	}
}

impl Renderable for Record {
	fn type_name(&self) -> &str {
		&self.type_name
	}

	fn shape(&self) -> Result<Shape, RenderError> {
		Ok(Shape::Record(self.fields.clone()))
	}
}

/// A tree node whose children point back at their parent, forming cycles.
pub struct Node {
	name: Mutex<String>,
	children: Arc<Children>,
	parent: Mutex<Weak<Node>>,
}

pub struct Children(Mutex<Vec<Arc<Node>>>);

impl Node {
	pub fn new(name: impl Into<String>) -> Arc<Self> {
		Arc::new(Self {
			name: Mutex::new(name.into()),
			children: Arc::new(Children(Mutex::new(Vec::new()))),
			parent: Mutex::new(Weak::new()),
		})
	}

	pub fn adopt(self: &Arc<Self>, child: &Arc<Node>) {
		*child.parent.lock() = Arc::downgrade(self);
		self.children.0.lock().push(child.clone());
	}

	pub fn rename(&self, name: impl Into<String>) {
		*self.name.lock() = name.into();
	}

	pub fn children(&self) -> Vec<Arc<Node>> {
		self.children.0.lock().clone()
	}
}

impl Renderable for Node {
	fn type_name(&self) -> &str {
		"Node"
	}

	fn shape(&self) -> Result<Shape, RenderError> {
		let parent = self.parent.lock().upgrade().map(Value::object).unwrap_or(Value::Null);
		Ok(Shape::record([
			("name", Value::from(self.name.lock().clone())),
			("children", Value::object(self.children.clone())),
			("parent", parent),
		]))
	}
}

impl Renderable for Children {
	fn type_name(&self) -> &str {
		"Vec<Node>"
	}

	fn shape(&self) -> Result<Shape, RenderError> {
		Ok(Shape::sequence(self.0.lock().iter().cloned().map(Value::object)))
	}
}

/// A value whose contents cannot be read.
pub struct Broken {
	error: RenderError,
}

impl Broken {
	pub fn new(kind: &str, message: &str) -> Self {
		Self {
			error: RenderError::new(kind, message),
		}
	}
}

impl Renderable for Broken {
	fn type_name(&self) -> &str {
		"Broken"
	}

	fn shape(&self) -> Result<Shape, RenderError> {
		Err(self.error.clone())
	}
}

/// A value whose descriptor panics.
pub struct Panicking {
	message: String,
}

impl Panicking {
	pub fn new(message: &str) -> Self {
		Self {
			message: message.to_string(),
		}
	}
}

impl Renderable for Panicking {
	fn type_name(&self) -> &str {
		"Panicking"
	}

	fn shape(&self) -> Result<Shape, RenderError> {
		panic!("{}", self.message)
	}
}
