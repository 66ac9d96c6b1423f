// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Identity registry for captured objects.
//!
//! Assigns each distinct live object a stable integer id, so that an object
//! referenced from several captured frames can be recognised as the same
//! instance in the serialized output.

pub use registry::{IdentityRegistry, NULL_IDENTITY};

mod registry;
