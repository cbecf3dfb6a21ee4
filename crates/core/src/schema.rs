//! Field schema: containers, field nodes, and repeatable groups.
//!
//! A [`Container`] declares an ordered set of [`FieldNode`]s persisted through
//! one [`StorageBinding`]. Group-container fields ([`FieldKind::Complex`])
//! carry named [`GroupDef`]s, each an ordered field list of its own,
//! recursively. Schema values are plain data: registration-time augmentation
//! (identity injection) produces a new schema rather than mutating a shared
//! one.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Reserved name of the hidden identity slot injected into every repeatable
/// group. Never declared by users, never shown to them.
pub const IDENTITY_FIELD: &str = "__id__";

/// What a field holds and how its stored rows behave on rewrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
	/// Single-line text.
	Text,
	/// Formatted text.
	RichText,
	/// Attachment reference stored as a single value.
	Image,
	/// Hidden machine-managed value. Injected identity slots are hidden.
	Hidden,
	/// Free-form reference list; rows appear and disappear outside the save
	/// pipeline's control.
	Association,
	/// Media collection with externally managed cardinality.
	MediaGallery,
	/// Repeatable group container. The only kind that owns [`GroupDef`]s.
	Complex,
}

impl FieldKind {
	/// Whether this kind owns repeatable groups.
	pub fn is_container(self) -> bool {
		matches!(self, FieldKind::Complex)
	}
}

/// Opaque handle naming the storage channel a field's values persist through.
///
/// Injected identity fields are created outside the normal declaration flow,
/// so the injector copies the owning container's binding onto them explicitly
/// to keep their values flowing through ordinary persistence.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageBinding(Box<str>);

impl StorageBinding {
	pub fn new(id: impl Into<Box<str>>) -> Self {
		Self(id.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl fmt::Display for StorageBinding {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// One field declaration: a leaf, or a group container with named groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldNode {
	pub name: Box<str>,
	pub kind: FieldKind,
	/// Named repeatable groups; populated only for [`FieldKind::Complex`].
	#[serde(default, skip_serializing_if = "Vec::is_empty")]
	pub groups: Vec<GroupDef>,
	/// Explicit storage binding. `None` inherits the owning container's.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub binding: Option<StorageBinding>,
}

impl FieldNode {
	/// Declares a leaf field.
	pub fn leaf(name: impl Into<Box<str>>, kind: FieldKind) -> Self {
		debug_assert!(!kind.is_container(), "group containers are declared via FieldNode::complex");
		Self {
			name: name.into(),
			kind,
			groups: Vec::new(),
			binding: None,
		}
	}

	/// Declares a group-container field with its named groups.
	pub fn complex(name: impl Into<Box<str>>, groups: Vec<GroupDef>) -> Self {
		Self {
			name: name.into(),
			kind: FieldKind::Complex,
			groups,
			binding: None,
		}
	}

	/// Pins this field to an explicit storage binding.
	pub fn with_binding(mut self, binding: StorageBinding) -> Self {
		self.binding = Some(binding);
		self
	}

	/// Binding this field persists through, given the owning container's.
	pub fn effective_binding<'a>(&'a self, container: &'a StorageBinding) -> &'a StorageBinding {
		self.binding.as_ref().unwrap_or(container)
	}
}

/// One named group shape inside a complex field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupDef {
	pub name: Box<str>,
	pub fields: Vec<FieldNode>,
}

impl GroupDef {
	pub fn new(name: impl Into<Box<str>>, fields: Vec<FieldNode>) -> Self {
		Self {
			name: name.into(),
			fields,
		}
	}

	/// Whether this group already carries the hidden identity slot.
	pub fn has_identity_field(&self) -> bool {
		self.fields.iter().any(|f| f.name.as_ref() == IDENTITY_FIELD)
	}
}

/// A registered container: an ordered field set persisted through one binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Container {
	pub name: Box<str>,
	pub binding: StorageBinding,
	pub fields: Vec<FieldNode>,
}

impl Container {
	pub fn new(name: impl Into<Box<str>>, binding: StorageBinding, fields: Vec<FieldNode>) -> Self {
		Self {
			name: name.into(),
			binding,
			fields,
		}
	}

	/// Looks up a top-level field by name.
	pub fn field(&self, name: &str) -> Option<&FieldNode> {
		self.fields.iter().find(|f| f.name.as_ref() == name)
	}
}
