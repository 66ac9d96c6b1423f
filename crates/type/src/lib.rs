// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Shared types for framewatch.
//!
//! Host programs describe receivers and arguments as [`Value`]s; complex
//! values carry a [`Renderable`] structural descriptor. Captured frames are
//! stored as [`FrameDescriptor`]s holding [`SerializedValue`]s.

pub use error::Error;
pub use frame::{FrameDescriptor, MethodSignature};
pub use serialized::{Body, SerializedValue};
pub use value::{ObjectRef, RenderError, Renderable, Shape, Value};

pub mod error;
pub mod frame;
pub mod serialized;
pub mod value;

pub type Result<T> = std::result::Result<T, Error>;
