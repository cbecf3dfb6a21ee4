//! Storage boundary for field values.

use polyfield_core::{Payload, StorageBinding, ValueTree};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Error surfaced by a datastore backend.
#[derive(Debug, Error)]
#[error("storage backend: {0}")]
pub struct StoreError(pub Box<str>);

impl StoreError {
	pub fn backend(message: impl Into<Box<str>>) -> Self {
		Self(message.into())
	}
}

/// Row storage for field values, keyed by (binding, field name).
///
/// Loads return payloads exactly as stored: a multilingual payload comes
/// back with every language segment intact. Narrowing to the active
/// language is an explicit read-side step
/// ([`translated_tree`](crate::display::translated_tree)), never something
/// a store does on the way out, because the save pipeline must see the full
/// stored encoding to merge against it.
pub trait Datastore {
	/// Stored tree of a composite field, `None` when nothing was ever saved.
	fn load_tree(&self, binding: &StorageBinding, field: &str) -> Result<Option<ValueTree>, StoreError>;

	/// Replaces the stored tree of a composite field.
	fn write_tree(
		&mut self,
		binding: &StorageBinding,
		field: &str,
		tree: &ValueTree,
	) -> Result<(), StoreError>;

	/// Stored payload of a leaf field, `None` when nothing was ever saved.
	fn load_leaf(&self, binding: &StorageBinding, field: &str) -> Result<Option<Payload>, StoreError>;

	/// Replaces the stored payload of a leaf field.
	fn write_leaf(
		&mut self,
		binding: &StorageBinding,
		field: &str,
		value: &Payload,
	) -> Result<(), StoreError>;

	/// Deletes every stored row of `field`. *When* this runs is the purge
	/// policy's decision, not the store's.
	fn purge(&mut self, binding: &StorageBinding, field: &str) -> Result<(), StoreError>;
}

type StoreKey = (Box<str>, Box<str>);

fn key(binding: &StorageBinding, field: &str) -> StoreKey {
	(binding.as_str().into(), field.into())
}

/// In-memory reference store. Infallible; the error type exists for real
/// backends behind the same trait.
#[derive(Debug, Default)]
pub struct MemoryStore {
	trees: FxHashMap<StoreKey, ValueTree>,
	leaves: FxHashMap<StoreKey, Payload>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self::default()
	}
}

impl Datastore for MemoryStore {
	fn load_tree(&self, binding: &StorageBinding, field: &str) -> Result<Option<ValueTree>, StoreError> {
		Ok(self.trees.get(&key(binding, field)).cloned())
	}

	fn write_tree(
		&mut self,
		binding: &StorageBinding,
		field: &str,
		tree: &ValueTree,
	) -> Result<(), StoreError> {
		self.trees.insert(key(binding, field), tree.clone());
		Ok(())
	}

	fn load_leaf(&self, binding: &StorageBinding, field: &str) -> Result<Option<Payload>, StoreError> {
		Ok(self.leaves.get(&key(binding, field)).cloned())
	}

	fn write_leaf(
		&mut self,
		binding: &StorageBinding,
		field: &str,
		value: &Payload,
	) -> Result<(), StoreError> {
		self.leaves.insert(key(binding, field), value.clone());
		Ok(())
	}

	fn purge(&mut self, binding: &StorageBinding, field: &str) -> Result<(), StoreError> {
		let key = key(binding, field);
		self.trees.remove(&key);
		self.leaves.remove(&key);
		Ok(())
	}
}
