/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! The IoT schema table.
//!
//! Constraints are written in the notation of the service documentation (`"1 - 128"`,
//! `" - 800"`) and parsed when the table is built.

use iot_model_schema::traits::{LengthTrait, RangeTrait};
use iot_model_schema::{
    SchemaError, SchemaRegistry, ShapeId, StructureSchema, StructureSchemaBuilder,
};
use std::sync::LazyLock;

mod audit;
mod errors;
mod jobs;
mod policies;
mod things;

/// Namespace of every IoT shape.
pub const NAMESPACE: &str = "com.amazonaws.iot";

fn shape(name: &str) -> ShapeId {
    ShapeId::from_parts(NAMESPACE, name)
}

fn structure(name: &str) -> StructureSchemaBuilder {
    StructureSchema::builder(shape(name))
}

fn length(notation: &str) -> Result<LengthTrait, SchemaError> {
    notation.parse()
}

fn range(notation: &str) -> Result<RangeTrait, SchemaError> {
    notation.parse()
}

/// Builds a fresh registry holding every IoT type.
///
/// Fails if a type is defined twice, a constraint is malformed or a nested type is not
/// registered.
pub fn build_registry() -> Result<SchemaRegistry, SchemaError> {
    let mut registry = SchemaRegistry::new();
    registry.register_all(things::schemas()?)?;
    registry.register_all(audit::schemas()?)?;
    registry.register_all(policies::schemas()?)?;
    registry.register_all(jobs::schemas()?)?;
    registry.register_all(errors::schemas()?)?;
    registry.resolve_targets()?;
    tracing::debug!(types = registry.len(), "built IoT schema registry");
    Ok(registry)
}

static REGISTRY: LazyLock<Result<SchemaRegistry, SchemaError>> = LazyLock::new(build_registry);

/// The process-wide IoT registry, built on first use.
pub fn iot_registry() -> Result<&'static SchemaRegistry, &'static SchemaError> {
    REGISTRY.as_ref()
}
