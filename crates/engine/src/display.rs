//! Read-side narrowing of stored trees to the active language.

use polyfield_core::{
	GroupInstance, IDENTITY_FIELD, Payload, StorageBinding, Translator, ValueSlot, ValueTree,
};

use crate::store::{Datastore, StoreError};

/// Returns a copy of `tree` with every leaf narrowed to the active
/// language's text. Identity slots pass through untouched: they are machine
/// values, not content.
///
/// This is a rendering view. The save pipeline never goes through it; saves
/// read stored payloads raw so that no inactive language is lost.
pub fn translated_tree<T: Translator>(tree: &ValueTree, translator: &T) -> ValueTree {
	tree.groups()
		.iter()
		.map(|group| translated_group(group, translator))
		.collect()
}

fn translated_group<T: Translator>(group: &GroupInstance, translator: &T) -> GroupInstance {
	let mut narrowed = GroupInstance::new();
	for (name, slot) in group.iter() {
		let slot = match slot {
			ValueSlot::Tree(nested) => ValueSlot::Tree(translated_tree(nested, translator)),
			ValueSlot::Leaf(payload) if name != IDENTITY_FIELD => {
				ValueSlot::Leaf(Payload::new(translator.extract_current_language(payload)))
			}
			identity_slot => identity_slot.clone(),
		};
		narrowed.set(name, slot);
	}
	narrowed
}

/// Loads a composite field's stored tree already narrowed for rendering.
pub fn load_for_display<S, T>(
	store: &S,
	translator: &T,
	binding: &StorageBinding,
	field: &str,
) -> Result<Option<ValueTree>, StoreError>
where
	S: Datastore,
	T: Translator,
{
	let tree = store.load_tree(binding, field)?;
	Ok(tree.map(|tree| translated_tree(&tree, translator)))
}
