//! The merge walk: correlating a submitted tree against the identity index.

use polyfield_core::{GroupInstance, IDENTITY_FIELD, Translator, ValueSlot, ValueTree};

use crate::index::NamedGroupIndex;

/// Produces the tree to persist: the submitted `new` tree, with every leaf
/// that correlates to a stored value replaced by the translator's merge of
/// (stored payload, submitted text).
///
/// Ordering, membership, and structure follow `new` alone; the old tree
/// takes part only through `index`. A leaf with no correlation (fresh token,
/// tokenless legacy group, field absent from the old instance) passes
/// through as submitted, and identity slots are always carried verbatim.
/// Neither input is mutated.
pub fn merge_value_tree<T: Translator>(
	new: &ValueTree,
	index: &NamedGroupIndex,
	translator: &T,
) -> ValueTree {
	new.groups()
		.iter()
		.map(|group| merge_group(group, index, translator))
		.collect()
}

fn merge_group<T: Translator>(
	group: &GroupInstance,
	index: &NamedGroupIndex,
	translator: &T,
) -> GroupInstance {
	let token = group.identity();
	let mut merged = GroupInstance::new();
	for (name, slot) in group.iter() {
		let slot = match slot {
			ValueSlot::Tree(nested) => {
				ValueSlot::Tree(merge_value_tree(nested, index, translator))
			}
			ValueSlot::Leaf(submitted) if name != IDENTITY_FIELD => {
				match token.and_then(|token| index.get(token, name)) {
					Some(old) => ValueSlot::Leaf(
						translator.merge_language_value(Some(old), submitted.as_str()),
					),
					None => ValueSlot::Leaf(submitted.clone()),
				}
			}
			identity_slot => identity_slot.clone(),
		};
		merged.set(name, slot);
	}
	merged
}
