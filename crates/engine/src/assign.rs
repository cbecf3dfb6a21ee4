//! Identity assignment for submitted value trees.

use polyfield_core::{IDENTITY_FIELD, IdentityToken, ValueSlot, ValueTree};

/// Ensures every group instance in `tree`, at every nesting depth, carries a
/// non-empty identity token, generating a fresh one where it is missing.
///
/// Returns the number of tokens assigned. A populated token is never
/// touched: identity is written once, on the first save that sees the
/// instance, and survives every later save, reorder, and re-parenting. An
/// empty slot counts as missing, since browsers submit the injected hidden
/// input as an empty string for instances created client-side.
pub fn assign_identities(tree: &mut ValueTree) -> usize {
	let mut assigned = 0;
	for group in tree.groups_mut() {
		let missing = match group.get(IDENTITY_FIELD) {
			None => true,
			Some(ValueSlot::Leaf(token)) => token.is_empty(),
			// A tree under the identity name is not a token slot. Leave it
			// for the merger to carry through untouched.
			Some(ValueSlot::Tree(_)) => false,
		};
		if missing {
			group.set(IDENTITY_FIELD, ValueSlot::Leaf(IdentityToken::generate().into()));
			assigned += 1;
		}
		for (_, slot) in group.iter_mut() {
			if let ValueSlot::Tree(nested) = slot {
				assigned += assign_identities(nested);
			}
		}
	}
	assigned
}
