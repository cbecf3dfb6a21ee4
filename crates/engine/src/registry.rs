//! Container registration and schema finalization.

use polyfield_core::{Container, FieldNode, IDENTITY_FIELD};
use thiserror::Error;

use crate::inject::inject_identities;

/// Errors raised while declaring containers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
	/// Late registration would let a user field sneak in behind the
	/// injected identity slots.
	#[error("container registry is sealed; \"{container}\" arrived after finalization")]
	Sealed { container: Box<str> },

	#[error("container \"{0}\" is already registered")]
	Duplicate(Box<str>),

	/// The identity slot's name belongs to the engine at every depth.
	#[error("container \"{container}\" declares the reserved field name \"{field}\"")]
	ReservedFieldName { container: Box<str>, field: &'static str },
}

/// Owns every declared container and applies identity injection exactly
/// once, after the last declaration.
///
/// Declaration order is absolute: user fields first, over any number of
/// [`register`](Self::register) calls, identity slots last, in one
/// [`finalize`](Self::finalize). After finalization the schema is sealed.
#[derive(Debug, Default)]
pub struct ContainerRegistry {
	containers: Vec<Container>,
	finalized: bool,
}

impl ContainerRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// Declares a container. The schema is taken as-is; identity injection
	/// waits for [`finalize`](Self::finalize).
	pub fn register(&mut self, container: Container) -> Result<(), RegistryError> {
		if self.finalized {
			return Err(RegistryError::Sealed { container: container.name });
		}
		if self.containers.iter().any(|c| c.name == container.name) {
			return Err(RegistryError::Duplicate(container.name));
		}
		if declares_identity_field(&container.fields) {
			return Err(RegistryError::ReservedFieldName {
				container: container.name,
				field: IDENTITY_FIELD,
			});
		}
		self.containers.push(container);
		Ok(())
	}

	/// Runs identity injection over every registered container and seals
	/// the registry.
	///
	/// Calling it twice is a logged no-op; injection itself also skips
	/// groups that already carry the slot, so even a buggy double run
	/// cannot stack identity fields.
	pub fn finalize(&mut self) {
		if self.finalized {
			tracing::warn!("container registry finalized twice; ignoring");
			return;
		}
		for container in &mut self.containers {
			*container = inject_identities(container);
		}
		self.finalized = true;
		tracing::debug!(containers = self.containers.len(), "identity fields injected");
	}

	pub fn is_finalized(&self) -> bool {
		self.finalized
	}

	/// Looks up a registered container by name.
	pub fn get(&self, name: &str) -> Option<&Container> {
		self.containers.iter().find(|c| c.name.as_ref() == name)
	}

	/// All containers, in registration order.
	pub fn containers(&self) -> &[Container] {
		&self.containers
	}
}

fn declares_identity_field(fields: &[FieldNode]) -> bool {
	fields.iter().any(|field| {
		field.name.as_ref() == IDENTITY_FIELD
			|| field
				.groups
				.iter()
				.any(|group| declares_identity_field(&group.fields))
	})
}
