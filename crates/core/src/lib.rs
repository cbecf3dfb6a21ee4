//! Vocabulary for identity-keyed reconciliation of repeatable field groups.
//!
//! Repeatable groups are position-addressed by the storage framework: "third
//! slide" rather than "that slide". This crate provides the shared types the
//! reconciliation engine works over: field schemas and runtime value trees,
//! plus the write-once [`IdentityToken`] that lets a group be addressed
//! regardless of where it ends up after a reorder. The [`Translator`] trait
//! is the boundary through which multilingual payloads are combined.
//!
//! The types here are plain data. All behavior (identity injection, index
//! construction, tree merging, the save pipeline) lives in
//! `polyfield-engine`.

/// Stable group identity tokens.
pub mod identity;
/// Field schema: containers, kinds, repeatable groups.
pub mod schema;
/// Boundary to the external translation subsystem.
pub mod translate;
/// Runtime value trees for composite fields.
pub mod value;

pub use identity::IdentityToken;
pub use schema::{Container, FieldKind, FieldNode, GroupDef, IDENTITY_FIELD, StorageBinding};
pub use translate::Translator;
pub use value::{GroupInstance, Payload, ValueSlot, ValueTree};
