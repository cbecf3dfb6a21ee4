//! Runtime value trees for composite fields.
//!
//! A [`ValueTree`] is the submitted or stored data of one composite field: an
//! ordered sequence of [`GroupInstance`]s, each mapping field names to
//! [`ValueSlot`]s in schema order. Nested complex fields appear as nested
//! trees, so one value tree spans every nesting depth of its field.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::schema::IDENTITY_FIELD;

/// Opaque leaf payload.
///
/// For translatable fields this may carry an inline multilingual encoding;
/// nothing in this crate interprets it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Payload(String);

impl Payload {
	pub fn new(text: impl Into<String>) -> Self {
		Self(text.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn into_string(self) -> String {
		self.0
	}
}

impl From<&str> for Payload {
	fn from(text: &str) -> Self {
		Self(text.to_owned())
	}
}

impl From<String> for Payload {
	fn from(text: String) -> Self {
		Self(text)
	}
}

impl std::fmt::Display for Payload {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// One value slot of a group instance: a leaf payload or a nested tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValueSlot {
	Leaf(Payload),
	Tree(ValueTree),
}

impl ValueSlot {
	pub fn leaf(text: impl Into<String>) -> Self {
		Self::Leaf(Payload::new(text))
	}

	pub fn as_leaf(&self) -> Option<&Payload> {
		match self {
			Self::Leaf(payload) => Some(payload),
			Self::Tree(_) => None,
		}
	}

	pub fn as_tree(&self) -> Option<&ValueTree> {
		match self {
			Self::Leaf(_) => None,
			Self::Tree(tree) => Some(tree),
		}
	}
}

/// One repetition of a repeatable group: field name → slot, insertion order
/// matching schema order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupInstance {
	slots: IndexMap<Box<str>, ValueSlot>,
}

impl GroupInstance {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder form of [`set`], used heavily by fixtures.
	///
	/// [`set`]: GroupInstance::set
	pub fn with(mut self, name: impl Into<Box<str>>, slot: ValueSlot) -> Self {
		self.set(name, slot);
		self
	}

	pub fn get(&self, name: &str) -> Option<&ValueSlot> {
		self.slots.get(name)
	}

	/// Inserts or replaces a slot. A new name lands at the end, which is
	/// where schema order puts fields injected after user declarations.
	pub fn set(&mut self, name: impl Into<Box<str>>, slot: ValueSlot) {
		self.slots.insert(name.into(), slot);
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &ValueSlot)> {
		self.slots.iter().map(|(name, slot)| (name.as_ref(), slot))
	}

	pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut ValueSlot)> {
		self.slots.iter_mut().map(|(name, slot)| (name.as_ref(), slot))
	}

	pub fn len(&self) -> usize {
		self.slots.len()
	}

	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// Identity token of this instance, when present and non-empty.
	///
	/// Legacy data saved before identity injection has no token; an empty
	/// slot (injected but not yet assigned) counts as absent too.
	pub fn identity(&self) -> Option<&str> {
		match self.slots.get(IDENTITY_FIELD)? {
			ValueSlot::Leaf(payload) if !payload.is_empty() => Some(payload.as_str()),
			_ => None,
		}
	}
}

/// Ordered group instances for one composite field, nested groups included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueTree {
	groups: Vec<GroupInstance>,
}

impl ValueTree {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder form of [`push`], used heavily by fixtures.
	///
	/// [`push`]: ValueTree::push
	pub fn with(mut self, group: GroupInstance) -> Self {
		self.groups.push(group);
		self
	}

	pub fn push(&mut self, group: GroupInstance) {
		self.groups.push(group);
	}

	pub fn groups(&self) -> &[GroupInstance] {
		&self.groups
	}

	pub fn groups_mut(&mut self) -> &mut [GroupInstance] {
		&mut self.groups
	}

	pub fn len(&self) -> usize {
		self.groups.len()
	}

	pub fn is_empty(&self) -> bool {
		self.groups.is_empty()
	}
}

impl FromIterator<GroupInstance> for ValueTree {
	fn from_iter<I: IntoIterator<Item = GroupInstance>>(iter: I) -> Self {
		Self {
			groups: iter.into_iter().collect(),
		}
	}
}
