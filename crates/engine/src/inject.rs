//! Schema augmentation: giving every repeatable group an identity slot.

use polyfield_core::{Container, FieldKind, FieldNode, IDENTITY_FIELD, StorageBinding};

/// Returns a copy of `container` in which every repeatable group, at every
/// nesting depth, ends with a hidden identity field bound to the container's
/// storage binding.
///
/// Children are handled before their parent group is extended, so an injected
/// field always sits after every user-declared field of its own group and
/// after the fully augmented nested containers. Groups that already carry the
/// slot are left alone, which makes the transformation idempotent.
pub fn inject_identities(container: &Container) -> Container {
	let mut injected = container.clone();
	inject_into_fields(&mut injected.fields, &container.binding);
	injected
}

fn inject_into_fields(fields: &mut [FieldNode], binding: &StorageBinding) {
	for field in fields {
		if !field.kind.is_container() {
			continue;
		}
		for group in &mut field.groups {
			inject_into_fields(&mut group.fields, binding);
			if group.has_identity_field() {
				continue;
			}
			group.fields.push(
				FieldNode::leaf(IDENTITY_FIELD, FieldKind::Hidden).with_binding(binding.clone()),
			);
		}
	}
}
