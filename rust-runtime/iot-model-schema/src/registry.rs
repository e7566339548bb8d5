/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::{MemberSchema, Schema, SchemaError, ShapeId, ShapeType, StructureSchema};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Descriptor registry: maps type names to their structure schemas.
///
/// The registry is populated once and then shared read-only; it has no interior mutability,
/// so `&SchemaRegistry` can be handed to any number of threads.
///
/// Types are keyed by their short name (`CreateThingRequest`). Lookups accept either the
/// short name or the full shape ID.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Arc<StructureSchema>>,
}

impl SchemaRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema under its type name.
    pub fn register(&mut self, schema: StructureSchema) -> Result<Arc<StructureSchema>, SchemaError> {
        let type_name = schema.type_name().to_string();
        if self.schemas.contains_key(&type_name) {
            tracing::debug!(type_name = %type_name, "rejected duplicate schema registration");
            return Err(SchemaError::DuplicateType(type_name));
        }
        tracing::debug!(
            shape_id = %schema.shape_id(),
            members = schema.member_schemas().len(),
            "registered schema"
        );
        let schema = Arc::new(schema);
        self.schemas.insert(type_name, schema.clone());
        Ok(schema)
    }

    /// Registers every schema, stopping at the first error.
    pub fn register_all(
        &mut self,
        schemas: impl IntoIterator<Item = StructureSchema>,
    ) -> Result<(), SchemaError> {
        for schema in schemas {
            self.register(schema)?;
        }
        Ok(())
    }

    /// Looks up a schema by short type name or full shape ID.
    pub fn lookup(&self, type_name: &str) -> Result<Arc<StructureSchema>, SchemaError> {
        self.get(type_name)
            .cloned()
            .ok_or_else(|| SchemaError::UnknownType(type_name.to_string()))
    }

    /// Like [`lookup`](Self::lookup) but borrows instead of returning an error.
    pub fn get(&self, type_name: &str) -> Option<&Arc<StructureSchema>> {
        let id = ShapeId::new(type_name);
        let schema = self.schemas.get(id.shape_name())?;
        match id.namespace() {
            Some(_) if schema.shape_id() != &id => None,
            _ => Some(schema),
        }
    }

    /// Returns true if `type_name` is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.get(type_name).is_some()
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Iterates over registered schemas, sorted by type name.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<StructureSchema>> {
        self.schemas.values()
    }

    /// Checks that every nested-model member (including list elements and map values)
    /// targets a registered type.
    pub fn resolve_targets(&self) -> Result<(), SchemaError> {
        fn check(registry: &SchemaRegistry, member: &MemberSchema) -> Result<(), SchemaError> {
            if member.shape_type() == ShapeType::Structure {
                if let Some(target) = member.target() {
                    if !registry.contains(target.as_str()) {
                        return Err(SchemaError::UnresolvedTarget {
                            member: member.shape_id().to_string(),
                            target: target.to_string(),
                        });
                    }
                }
            }
            match member.element() {
                Some(element) => check(registry, element),
                None => Ok(()),
            }
        }

        for schema in self.schemas.values() {
            for member in schema.member_schemas() {
                check(self, member)?;
            }
        }
        Ok(())
    }
}
