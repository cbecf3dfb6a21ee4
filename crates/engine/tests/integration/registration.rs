//! Integration tests for container registration and identity injection.
//!
//! These exercise the full registration flow: user declarations first, one
//! finalization pass injecting the hidden identity slots, sealed afterwards.

use polyfield_core::{Container, FieldKind, FieldNode, GroupDef, IDENTITY_FIELD, StorageBinding};
use polyfield_engine::registry::{ContainerRegistry, RegistryError};
use pretty_assertions::assert_eq;

use crate::common::page_options;

fn identity_positions(fields: &[FieldNode]) -> Vec<Vec<&str>> {
	let mut groups = Vec::new();
	for field in fields {
		for group in &field.groups {
			groups.push(group.fields.iter().map(|f| f.name.as_ref()).collect());
			groups.extend(identity_positions(&group.fields));
		}
	}
	groups
}

#[test]
fn finalize_injects_identity_into_every_group_depth() {
	let mut registry = ContainerRegistry::new();
	registry.register(page_options()).unwrap();
	registry.finalize();

	let container = registry.get("page_options").unwrap();
	let groups = identity_positions(&container.fields);
	assert_eq!(groups.len(), 2, "slide and caption groups");
	for fields in groups {
		assert_eq!(fields.last().copied(), Some(IDENTITY_FIELD));
	}
}

#[test]
fn injected_fields_carry_the_container_binding() {
	let mut registry = ContainerRegistry::new();
	registry.register(page_options()).unwrap();
	registry.finalize();

	let container = registry.get("page_options").unwrap();
	let slide_group = &container.fields[2].groups[0];
	let id_field = slide_group.fields.last().unwrap();
	assert_eq!(id_field.kind, FieldKind::Hidden);
	assert_eq!(
		id_field.binding.as_ref().map(StorageBinding::as_str),
		Some("post_meta")
	);
}

#[test]
fn registration_closes_at_finalize() {
	let mut registry = ContainerRegistry::new();
	registry.register(page_options()).unwrap();
	registry.finalize();

	let late = Container::new("late", StorageBinding::new("post_meta"), Vec::new());
	assert_eq!(
		registry.register(late).unwrap_err(),
		RegistryError::Sealed { container: "late".into() }
	);
}

#[test]
fn double_finalize_does_not_stack_identity_fields() {
	let mut registry = ContainerRegistry::new();
	registry.register(page_options()).unwrap();
	registry.finalize();
	registry.finalize();

	let container = registry.get("page_options").unwrap();
	for fields in identity_positions(&container.fields) {
		let slots = fields.iter().filter(|&name| *name == IDENTITY_FIELD).count();
		assert_eq!(slots, 1);
	}
}

#[test]
fn user_schemas_cannot_claim_the_identity_name() {
	let bad = Container::new(
		"bad",
		StorageBinding::new("post_meta"),
		vec![FieldNode::complex(
			"rows",
			vec![GroupDef::new(
				"row",
				vec![FieldNode::leaf(IDENTITY_FIELD, FieldKind::Text)],
			)],
		)],
	);

	let mut registry = ContainerRegistry::new();
	assert_eq!(
		registry.register(bad).unwrap_err(),
		RegistryError::ReservedFieldName { container: "bad".into(), field: IDENTITY_FIELD }
	);
}
