//! Per-kind save policies.

use polyfield_core::FieldKind;

/// When previously stored rows of a field may be deleted during a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurgeTiming {
	/// Delete before anything else. Kinds whose row count is managed
	/// outside the form would otherwise leak rows dropped from the
	/// submission.
	Immediate,
	/// Keep rows until the old value has been read. The merge engine needs
	/// the pre-save payloads, so deletion runs between the read and the
	/// final write.
	Deferred,
}

/// Purge decision for one field kind, resolved once per field save.
///
/// Misclassifying a kind as [`PurgeTiming::Immediate`] silently erases
/// stored language segments (nothing left to merge against), so the match is
/// exhaustive: adding a kind forces a decision here.
pub fn purge_timing(kind: FieldKind) -> PurgeTiming {
	match kind {
		FieldKind::Association | FieldKind::MediaGallery => PurgeTiming::Immediate,
		FieldKind::Text
		| FieldKind::RichText
		| FieldKind::Image
		| FieldKind::Hidden
		| FieldKind::Complex => PurgeTiming::Deferred,
	}
}

/// Whether a top-level leaf of this kind takes the multilingual merge on
/// save. Machine-managed and set-like kinds never do.
pub fn translatable(kind: FieldKind) -> bool {
	matches!(kind, FieldKind::Text | FieldKind::RichText | FieldKind::Image)
}
