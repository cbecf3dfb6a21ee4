//! Common fixtures for engine integration tests.

use std::cell::RefCell;

use polyfield_core::{
	Container, FieldKind, FieldNode, GroupDef, GroupInstance, IDENTITY_FIELD, Payload,
	StorageBinding, ValueSlot, ValueTree,
};
use polyfield_engine::store::{Datastore, MemoryStore, StoreError};

/// One storage call, in the order the pipeline made it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreOp {
	LoadTree(String),
	WriteTree(String),
	LoadLeaf(String),
	WriteLeaf(String),
	Purge(String),
}

/// Datastore double that journals every call while delegating to an
/// in-memory store, so tests can assert on call ordering per field.
#[derive(Debug, Default)]
pub struct RecordingStore {
	pub inner: MemoryStore,
	journal: RefCell<Vec<StoreOp>>,
}

impl RecordingStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn ops(&self) -> Vec<StoreOp> {
		self.journal.borrow().clone()
	}
}

impl Datastore for RecordingStore {
	fn load_tree(
		&self,
		binding: &StorageBinding,
		field: &str,
	) -> Result<Option<ValueTree>, StoreError> {
		self.journal.borrow_mut().push(StoreOp::LoadTree(field.to_owned()));
		self.inner.load_tree(binding, field)
	}

	fn write_tree(
		&mut self,
		binding: &StorageBinding,
		field: &str,
		tree: &ValueTree,
	) -> Result<(), StoreError> {
		self.journal.borrow_mut().push(StoreOp::WriteTree(field.to_owned()));
		self.inner.write_tree(binding, field, tree)
	}

	fn load_leaf(
		&self,
		binding: &StorageBinding,
		field: &str,
	) -> Result<Option<Payload>, StoreError> {
		self.journal.borrow_mut().push(StoreOp::LoadLeaf(field.to_owned()));
		self.inner.load_leaf(binding, field)
	}

	fn write_leaf(
		&mut self,
		binding: &StorageBinding,
		field: &str,
		value: &Payload,
	) -> Result<(), StoreError> {
		self.journal.borrow_mut().push(StoreOp::WriteLeaf(field.to_owned()));
		self.inner.write_leaf(binding, field, value)
	}

	fn purge(&mut self, binding: &StorageBinding, field: &str) -> Result<(), StoreError> {
		self.journal.borrow_mut().push(StoreOp::Purge(field.to_owned()));
		self.inner.purge(binding, field)
	}
}

/// A page-options container with a translatable headline, an association
/// list, and a two-level slides complex. Mirrors the schemas this engine is
/// built for.
pub fn page_options() -> Container {
	Container::new(
		"page_options",
		StorageBinding::new("post_meta"),
		vec![
			FieldNode::leaf("headline", FieldKind::Text),
			FieldNode::leaf("related", FieldKind::Association),
			FieldNode::complex(
				"slides",
				vec![GroupDef::new(
					"slide",
					vec![
						FieldNode::leaf("title", FieldKind::Text),
						FieldNode::complex(
							"captions",
							vec![GroupDef::new(
								"caption",
								vec![FieldNode::leaf("text", FieldKind::Text)],
							)],
						),
					],
				)],
			),
		],
	)
}

/// One slide instance carrying a token and a title.
pub fn slide(token: &str, title: &str) -> GroupInstance {
	GroupInstance::new()
		.with("title", ValueSlot::leaf(title))
		.with(IDENTITY_FIELD, ValueSlot::leaf(token))
}

/// One caption instance carrying a token and a text.
pub fn caption(token: &str, text: &str) -> GroupInstance {
	GroupInstance::new()
		.with("text", ValueSlot::leaf(text))
		.with(IDENTITY_FIELD, ValueSlot::leaf(token))
}

/// Leaf text of `field` in the tree's `position`-th group.
pub fn leaf_text<'t>(tree: &'t ValueTree, position: usize, field: &str) -> &'t str {
	tree.groups()[position]
		.get(field)
		.and_then(ValueSlot::as_leaf)
		.map(Payload::as_str)
		.unwrap()
}
