// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{Arc, Weak};

use framewatch::{MethodSignature, RenderError, Renderable, Shape, Value};
use parking_lot::Mutex;

use crate::Probe;

/// Declaring type reported in the demo's method signatures.
pub const APP_TYPE: &str = "demo.App";

fn signature(method: &str) -> MethodSignature {
	MethodSignature::from_parts(APP_TYPE, method)
}

/// An application node. Children hold a weak link back to their parent, so
/// a rendered `App` graph contains a cycle.
pub struct App {
	name: String,
	apps: Arc<Apps>,
	parent: Mutex<Weak<App>>,
}

pub struct Apps(Mutex<Vec<Arc<App>>>);

/// Command line arguments handed to `main`.
pub struct Args(Vec<String>);

impl App {
	pub fn new(name: impl Into<String>) -> Arc<Self> {
		Arc::new(Self {
			name: name.into(),
			apps: Arc::new(Apps(Mutex::new(Vec::new()))),
			parent: Mutex::new(Weak::new()),
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn adopt(self: &Arc<Self>, child: &Arc<App>) {
		*child.parent.lock() = Arc::downgrade(self);
		self.apps.0.lock().push(child.clone());
	}

	#[inline(never)]
	pub fn begin_chain(self: &Arc<Self>, probe: &Probe, other: &Arc<App>) -> i64 {
		probe.candidate(signature("begin_chain(App) i64"), &[Value::object(self.clone()), Value::object(other.clone())]);

		let label = self.mid_chain_str(probe, other.name());
		let result = self.mid_chain_int(probe, label.len() as i64);

		probe.exit_candidate();
		result
	}

	#[inline(never)]
	pub fn mid_chain_str(self: &Arc<Self>, probe: &Probe, label: &str) -> String {
		probe.candidate(signature("mid_chain(&str) String"), &[Value::object(self.clone()), Value::from(label)]);
		let label = format!("{}/{}", self.name, label);
		probe.exit_candidate();
		label
	}

	#[inline(never)]
	pub fn mid_chain_int(self: &Arc<Self>, probe: &Probe, n: i64) -> i64 {
		probe.candidate(signature("mid_chain(i64) i64"), &[Value::object(self.clone()), Value::from(n)]);
		let result = self.end_chain(probe, n * 2);
		probe.exit_candidate();
		result
	}

	#[inline(never)]
	pub fn end_chain(self: &Arc<Self>, probe: &Probe, n: i64) -> i64 {
		probe.terminal(signature("end_chain(i64) i64"), &[Value::object(self.clone()), Value::from(n)]);
		n + self.apps.0.lock().len() as i64
	}
}

impl Renderable for App {
	fn type_name(&self) -> &str {
		APP_TYPE
	}

	fn shape(&self) -> Result<Shape, RenderError> {
		let parent = self.parent.lock().upgrade().map(Value::object).unwrap_or(Value::Null);
		Ok(Shape::record([
			("name", Value::from(self.name.as_str())),
			("apps", Value::object(self.apps.clone())),
			("parent", parent),
		]))
	}
}

impl Renderable for Apps {
	fn type_name(&self) -> &str {
		"Vec<demo.App>"
	}

	fn shape(&self) -> Result<Shape, RenderError> {
		Ok(Shape::sequence(self.0.lock().iter().cloned().map(Value::object)))
	}
}

impl Renderable for Args {
	fn type_name(&self) -> &str {
		"Vec<String>"
	}

	fn shape(&self) -> Result<Shape, RenderError> {
		Ok(Shape::sequence(self.0.iter().map(|arg| Value::from(arg.as_str()))))
	}
}

/// The program body: the entry frame of the target chain.
#[inline(never)]
pub fn run(probe: &Probe, args: Vec<String>) -> i64 {
	let args = Arc::new(Args(args));
	probe.entry(signature("main(Vec<String>)"), &[Value::object(args)]);

	let root = App::new("root");
	let child = App::new("child");
	root.adopt(&child);
	let result = root.begin_chain(probe, &child);

	probe.exit_entry();
	result
}
