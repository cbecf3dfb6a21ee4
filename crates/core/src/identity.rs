//! Stable group identity.

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value::Payload;

/// Opaque, write-once identifier correlating a group instance across saves.
///
/// Born on the first save where the enclosing instance lacks one; immutable
/// thereafter; never reused for another instance. Stored as an ordinary
/// hidden leaf under [`IDENTITY_FIELD`], so it persists and reloads like any
/// other value.
///
/// [`IDENTITY_FIELD`]: crate::schema::IDENTITY_FIELD
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityToken(Box<str>);

impl IdentityToken {
	/// Generates a fresh token.
	///
	/// Uniqueness within a field's scope is probabilistic (UUID v4); the save
	/// discipline needs collisions to be overwhelmingly unlikely, not
	/// coordinated away.
	pub fn generate() -> Self {
		Self(Uuid::new_v4().simple().to_string().into_boxed_str())
	}

	/// Wraps a token read back from storage.
	pub fn new(raw: impl Into<Box<str>>) -> Self {
		Self(raw.into())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for IdentityToken {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl From<&str> for IdentityToken {
	fn from(raw: &str) -> Self {
		Self::new(raw)
	}
}

/// Tokens persist as ordinary leaf payloads under the identity slot.
impl From<IdentityToken> for Payload {
	fn from(token: IdentityToken) -> Self {
		Payload::new(token.0)
	}
}

impl fmt::Display for IdentityToken {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
