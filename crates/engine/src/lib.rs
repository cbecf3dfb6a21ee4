//! Identity-keyed reconciliation engine for repeatable field groups.
//!
//! Storage frameworks address repeated groups by position, so reordering the
//! groups in a form makes "the third slide" mean a different slide than it
//! did at load time. Any merge that reads old values positionally then
//! writes one group's stored languages into another. This crate removes the
//! positional addressing instead of patching around it:
//!
//! 1. [`inject_identities`] gives every repeatable group a hidden identity
//!    slot at registration time.
//! 2. [`assign_identities`] fills that slot with a write-once token on the
//!    first save that sees each instance.
//! 3. [`NamedGroupIndex`] flattens the previously stored tree into a
//!    token-keyed map, discarding positions entirely.
//! 4. [`merge_value_tree`] walks the submitted tree and merges every leaf
//!    against its own stored payload, found by token.
//!
//! [`SavePipeline`] sequences those steps per save, together with the
//! per-kind purge timing from [`policy`] that keeps old rows readable until
//! the merge no longer needs them.

#[cfg(test)]
use polyfield_multilang as _;

/// Identity assignment for submitted trees.
pub mod assign;
/// Read-side narrowing to the active language.
pub mod display;
/// Identity-keyed flattening of stored trees.
pub mod index;
/// Registration-time schema augmentation.
pub mod inject;
/// The merge walk.
pub mod merge;
/// The save pipeline.
pub mod pipeline;
/// Per-kind save policies.
pub mod policy;
/// Container registration and finalization.
pub mod registry;
/// Storage boundary.
pub mod store;

pub use assign::assign_identities;
pub use display::{load_for_display, translated_tree};
pub use index::NamedGroupIndex;
pub use inject::inject_identities;
pub use merge::merge_value_tree;
pub use pipeline::{
	ContainerOutcome, SaveError, SaveOutcome, SavePhase, SavePipeline, Submission,
};
pub use policy::{PurgeTiming, purge_timing, translatable};
pub use registry::{ContainerRegistry, RegistryError};
pub use store::{Datastore, MemoryStore, StoreError};
