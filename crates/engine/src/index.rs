//! Identity-keyed flattening of previously stored value trees.

use polyfield_core::{IDENTITY_FIELD, IdentityToken, Payload, ValueSlot, ValueTree};
use rustc_hash::FxHashMap;

/// Transient identity-keyed view of one composite field's stored tree.
///
/// Maps every known group identity to that group's leaf payloads by field
/// name, flattened across all nesting depths into one namespace. Built per
/// save from the *old* tree, consulted by the merger, then dropped; it is
/// never persisted and never outlives the save that built it.
#[derive(Debug, Default)]
pub struct NamedGroupIndex {
	entries: FxHashMap<IdentityToken, FxHashMap<Box<str>, Payload>>,
	duplicates: Vec<IdentityToken>,
}

impl NamedGroupIndex {
	/// Flattens `old` into an identity-keyed index.
	///
	/// Instances without a usable token (legacy data saved before identity
	/// injection, or an empty slot) contribute no entries, but their nested
	/// trees are still descended: a nested group may carry a token even when
	/// its parent does not. When two instances claim the same token the
	/// later one in traversal order wins and the token is reported through
	/// [`duplicates`](Self::duplicates).
	pub fn build(old: &ValueTree) -> Self {
		let mut index = Self::default();
		index.collect(old);
		index
	}

	fn collect(&mut self, tree: &ValueTree) {
		for group in tree.groups() {
			let mut fields: FxHashMap<Box<str>, Payload> = FxHashMap::default();
			for (name, slot) in group.iter() {
				match slot {
					ValueSlot::Tree(nested) => self.collect(nested),
					ValueSlot::Leaf(payload) => {
						if name != IDENTITY_FIELD {
							fields.insert(name.into(), payload.clone());
						}
					}
				}
			}
			let Some(token) = group.identity() else { continue };
			let token = IdentityToken::from(token);
			if let Some(replaced) = self.entries.insert(token.clone(), fields) {
				tracing::warn!(
					%token,
					replaced_fields = ?replaced.keys().collect::<Vec<_>>(),
					"duplicate group identity in stored tree; keeping the later instance"
				);
				self.duplicates.push(token);
			}
		}
	}

	/// Stored payload for `(token, field)`, when the old tree had one.
	pub fn get(&self, token: &str, field: &str) -> Option<&Payload> {
		self.entries.get(token)?.get(field)
	}

	/// Whether any instance in the old tree carried `token`.
	pub fn contains(&self, token: &str) -> bool {
		self.entries.contains_key(token)
	}

	/// Tokens that appeared on more than one instance. Identity is generated
	/// once and never reused, so anything here points at hand-edited or
	/// corrupted storage.
	pub fn duplicates(&self) -> &[IdentityToken] {
		&self.duplicates
	}

	/// Number of distinct identities indexed.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
