//! The save pipeline: one field's submission carried through to storage.

use indexmap::IndexMap;
use polyfield_core::{
	Container, FieldKind, FieldNode, Payload, StorageBinding, Translator, ValueSlot, ValueTree,
};
use thiserror::Error;

use crate::assign::assign_identities;
use crate::index::NamedGroupIndex;
use crate::merge::merge_value_tree;
use crate::policy::{PurgeTiming, purge_timing, translatable};
use crate::store::{Datastore, StoreError};

/// Errors raised while saving.
#[derive(Debug, Error)]
pub enum SaveError {
	#[error(transparent)]
	Store(#[from] StoreError),

	/// A tree was submitted for a leaf field, or a leaf for a group
	/// container.
	#[error("field \"{field}\" ({kind:?}) was submitted with the wrong value shape")]
	ShapeMismatch { field: Box<str>, kind: FieldKind },

	#[error("container \"{container}\" has no field \"{field}\"")]
	UnknownField { container: Box<str>, field: Box<str> },
}

/// Phases of one composite save, in the only order they may run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePhase {
	/// Old tree read raw from storage.
	Loaded,
	/// Old tree flattened into the identity index.
	Indexed,
	/// Submitted tree given tokens where it lacked them.
	AssigningIdentities,
	/// Submitted tree merged leaf-by-leaf against the index.
	Merging,
	/// Deferred rows deleted, now that the old tree has been fully read.
	PurgingDeferred,
	/// Merged tree written back.
	Persisted,
}

impl SavePhase {
	/// The phase that must have completed immediately before `self`.
	pub fn predecessor(self) -> Option<SavePhase> {
		match self {
			SavePhase::Loaded => None,
			SavePhase::Indexed => Some(SavePhase::Loaded),
			SavePhase::AssigningIdentities => Some(SavePhase::Indexed),
			SavePhase::Merging => Some(SavePhase::AssigningIdentities),
			SavePhase::PurgingDeferred => Some(SavePhase::Merging),
			SavePhase::Persisted => Some(SavePhase::PurgingDeferred),
		}
	}
}

/// What one composite save did.
#[derive(Debug, Default)]
pub struct SaveOutcome {
	/// Completed phases, in execution order.
	pub phases: Vec<SavePhase>,
	/// Tokens freshly assigned to submitted instances.
	pub assigned_identities: usize,
	/// Duplicate tokens observed while indexing the old tree.
	pub duplicate_identities: usize,
}

impl SaveOutcome {
	fn advance(&mut self, phase: SavePhase) {
		debug_assert_eq!(
			self.phases.last().copied(),
			phase.predecessor(),
			"save phases must not be skipped"
		);
		self.phases.push(phase);
	}
}

/// One request's submitted values for a container, in form order.
#[derive(Debug, Clone, Default)]
pub struct Submission {
	values: IndexMap<Box<str>, ValueSlot>,
}

impl Submission {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder form of [`set`](Self::set).
	pub fn with(mut self, field: impl Into<Box<str>>, slot: ValueSlot) -> Self {
		self.set(field, slot);
		self
	}

	pub fn set(&mut self, field: impl Into<Box<str>>, slot: ValueSlot) {
		self.values.insert(field.into(), slot);
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &ValueSlot)> {
		self.values.iter().map(|(name, slot)| (name.as_ref(), slot))
	}

	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}
}

/// Per-field results of a whole-container save.
#[derive(Debug, Default)]
pub struct ContainerOutcome {
	/// Outcome of every composite field saved, in submission order.
	pub composites: Vec<(Box<str>, SaveOutcome)>,
	/// Every leaf field saved, with the payload actually written.
	pub leaves: Vec<(Box<str>, Payload)>,
}

/// Drives submissions through load, index, assign, merge, purge, and write.
///
/// One pipeline serves one request: it borrows the store and the translator
/// for that long, and each save runs to completion before the next field
/// starts.
pub struct SavePipeline<'a, S, T> {
	store: &'a mut S,
	translator: &'a T,
}

impl<'a, S: Datastore, T: Translator> SavePipeline<'a, S, T> {
	pub fn new(store: &'a mut S, translator: &'a T) -> Self {
		Self { store, translator }
	}

	/// Saves a composite field's submitted tree.
	///
	/// The previous tree is read raw and flattened by identity; the
	/// submission is given tokens where it lacks them, merged leaf-by-leaf
	/// against the flattening, and written back in submitted order. Rows
	/// are deleted only after the old tree has been read in full: purging
	/// earlier would leave the merger nothing to merge against.
	pub fn save_composite(
		&mut self,
		binding: &StorageBinding,
		field: &FieldNode,
		mut submitted: ValueTree,
	) -> Result<SaveOutcome, SaveError> {
		if !field.kind.is_container() {
			return Err(SaveError::ShapeMismatch { field: field.name.clone(), kind: field.kind });
		}
		let mut outcome = SaveOutcome::default();

		let old = self.store.load_tree(binding, &field.name)?.unwrap_or_default();
		outcome.advance(SavePhase::Loaded);

		let index = NamedGroupIndex::build(&old);
		outcome.duplicate_identities = index.duplicates().len();
		outcome.advance(SavePhase::Indexed);

		outcome.assigned_identities = assign_identities(&mut submitted);
		outcome.advance(SavePhase::AssigningIdentities);

		let merged = merge_value_tree(&submitted, &index, self.translator);
		outcome.advance(SavePhase::Merging);

		// Group rows always defer their purge; the rows were still
		// readable above because nothing was deleted before the load.
		self.store.purge(binding, &field.name)?;
		outcome.advance(SavePhase::PurgingDeferred);

		self.store.write_tree(binding, &field.name, &merged)?;
		outcome.advance(SavePhase::Persisted);

		tracing::debug!(
			field = %field.name,
			groups = merged.len(),
			assigned = outcome.assigned_identities,
			"composite field saved"
		);
		Ok(outcome)
	}

	/// Saves a top-level leaf field.
	///
	/// Translatable kinds merge the submitted text into the stored
	/// multilingual payload. Kinds with externally managed rows purge up
	/// front and store the submission as-is; their old rows are unreadable
	/// afterwards, which is the accepted cost of not leaking them. Returns
	/// the payload actually written.
	pub fn save_leaf(
		&mut self,
		binding: &StorageBinding,
		field: &FieldNode,
		submitted: Payload,
	) -> Result<Payload, SaveError> {
		if field.kind.is_container() {
			return Err(SaveError::ShapeMismatch { field: field.name.clone(), kind: field.kind });
		}
		let value = match purge_timing(field.kind) {
			PurgeTiming::Immediate => {
				self.store.purge(binding, &field.name)?;
				submitted
			}
			PurgeTiming::Deferred if translatable(field.kind) => {
				let old = self.store.load_leaf(binding, &field.name)?;
				let merged =
					self.translator.merge_language_value(old.as_ref(), submitted.as_str());
				self.store.purge(binding, &field.name)?;
				merged
			}
			PurgeTiming::Deferred => {
				self.store.purge(binding, &field.name)?;
				submitted
			}
		};
		self.store.write_leaf(binding, &field.name, &value)?;
		tracing::debug!(field = %field.name, kind = ?field.kind, "leaf field saved");
		Ok(value)
	}

	/// Loads a composite field's stored tree already narrowed for
	/// rendering. Saves never come through here; they read raw.
	pub fn load_for_display(
		&self,
		binding: &StorageBinding,
		field: &str,
	) -> Result<Option<ValueTree>, SaveError> {
		Ok(crate::display::load_for_display(
			&*self.store,
			self.translator,
			binding,
			field,
		)?)
	}

	/// Saves one whole container submission, dispatching every field
	/// through its kind's path in form order.
	pub fn save_container(
		&mut self,
		container: &Container,
		submission: &Submission,
	) -> Result<ContainerOutcome, SaveError> {
		let mut outcome = ContainerOutcome::default();
		for (name, slot) in submission.iter() {
			let field = container.field(name).ok_or_else(|| SaveError::UnknownField {
				container: container.name.clone(),
				field: name.into(),
			})?;
			let binding = field.effective_binding(&container.binding);
			match slot {
				ValueSlot::Tree(tree) if field.kind.is_container() => {
					let saved = self.save_composite(binding, field, tree.clone())?;
					outcome.composites.push((field.name.clone(), saved));
				}
				ValueSlot::Leaf(payload) if !field.kind.is_container() => {
					let written = self.save_leaf(binding, field, payload.clone())?;
					outcome.leaves.push((field.name.clone(), written));
				}
				_ => {
					return Err(SaveError::ShapeMismatch {
						field: field.name.clone(),
						kind: field.kind,
					});
				}
			}
		}
		Ok(outcome)
	}
}
