// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Weak,
	atomic::{AtomicU64, Ordering},
};

use dashmap::DashMap;
use framewatch_type::{ObjectRef, Renderable};
use tracing::trace;

/// Id reported for an absent reference. Never assigned to an object.
pub const NULL_IDENTITY: u64 = 0;

struct Slot {
	id: u64,
	owner: Weak<dyn Renderable>,
}

/// Maps live objects to ids, keyed by the address of their allocation.
///
/// Slots hold weak handles only: the registry never keeps an object alive.
/// A weak handle does keep the allocation itself reserved, so an address
/// cannot be handed to a new object while its slot exists and a live address
/// always resolves to its original owner. [`IdentityRegistry::purge`]
/// releases the slots of dropped objects; a later object at a reused address
/// then receives a fresh id.
pub struct IdentityRegistry {
	slots: DashMap<usize, Slot>,
	counter: AtomicU64,
}

impl IdentityRegistry {
	pub fn new() -> Self {
		Self {
			slots: DashMap::new(),
			counter: AtomicU64::new(NULL_IDENTITY + 1),
		}
	}

	/// Returns the id of `object`, assigning the next one on first sight.
	///
	/// The lookup and the assignment happen under the lock of the slot's
	/// shard, so concurrent callers observe a single id per object.
	pub fn id_of(&self, object: Option<&ObjectRef>) -> u64 {
		let Some(object) = object else {
			return NULL_IDENTITY;
		};

		let slot = self.slots.entry(object.address()).or_insert_with(|| {
			let id = self.counter.fetch_add(1, Ordering::Relaxed);
			trace!(id, object = ?object, "assigned object identity");
			Slot {
				id,
				owner: object.downgrade(),
			}
		});
		slot.id
	}

	/// Returns the id already assigned to `object`, if any.
	pub fn get(&self, object: &ObjectRef) -> Option<u64> {
		self.slots.get(&object.address()).map(|slot| slot.id)
	}

	/// Drops the slots of objects that are no longer alive.
	///
	/// Returns the number of released slots.
	pub fn purge(&self) -> usize {
		let before = self.slots.len();
		self.slots.retain(|_, slot| slot.owner.strong_count() > 0);
		let released = before.saturating_sub(self.slots.len());
		if released > 0 {
			trace!(released, "purged dead identity slots");
		}
		released
	}

	/// Number of slots held, including slots of dropped but unpurged objects.
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}
}

impl Default for IdentityRegistry {
	fn default() -> Self {
		Self::new()
	}
}
