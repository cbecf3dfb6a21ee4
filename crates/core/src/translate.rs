//! Boundary to the external translation subsystem.

use crate::value::Payload;

/// The two combine primitives the merge engine consumes.
///
/// Implementations own the multilingual encoding; the engine treats payloads
/// as opaque and stores whatever these return. Both primitives are total:
/// a subsystem with nothing useful to say still returns *something*, and the
/// engine has no corrective action to take either way.
pub trait Translator {
	/// Text of the active language inside `payload`.
	///
	/// A payload with no segment for the active language yields an empty
	/// string; a payload with no multilingual encoding at all passes through
	/// unchanged.
	fn extract_current_language(&self, payload: &Payload) -> String;

	/// Replaces only the active language's segment of `old` with `new_text`,
	/// preserving every other segment byte-for-byte.
	///
	/// `old` of `None` (or an empty payload) is a first-ever save: the result
	/// carries only the active language.
	fn merge_language_value(&self, old: Option<&Payload>, new_text: &str) -> Payload;
}

impl<T: Translator + ?Sized> Translator for &T {
	fn extract_current_language(&self, payload: &Payload) -> String {
		(**self).extract_current_language(payload)
	}

	fn merge_language_value(&self, old: Option<&Payload>, new_text: &str) -> Payload {
		(**self).merge_language_value(old, new_text)
	}
}
