/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Prelude schemas for the built-in simple types.

use std::sync::LazyLock;

use crate::{Schema, ShapeId, ShapeType, TraitMap};

/// A simple schema implementation for prelude types.
#[derive(Debug)]
pub struct PreludeSchema {
    id: ShapeId,
    shape_type: ShapeType,
}

impl PreludeSchema {
    /// Creates a new prelude schema.
    pub const fn new(id: ShapeId, shape_type: ShapeType) -> Self {
        Self { id, shape_type }
    }
}

impl Schema for PreludeSchema {
    fn shape_id(&self) -> &ShapeId {
        &self.id
    }

    fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    fn traits(&self) -> &TraitMap {
        static MAP: LazyLock<TraitMap> = LazyLock::new(TraitMap::empty);

        &MAP
    }
}

/// Schema for `smithy.api#String`
pub static STRING: PreludeSchema = PreludeSchema::new(
    ShapeId::from_static("smithy.api#String"),
    ShapeType::String,
);

/// Schema for `smithy.api#Boolean`
pub static BOOLEAN: PreludeSchema = PreludeSchema::new(
    ShapeId::from_static("smithy.api#Boolean"),
    ShapeType::Boolean,
);

/// Schema for `smithy.api#Integer`
pub static INTEGER: PreludeSchema = PreludeSchema::new(
    ShapeId::from_static("smithy.api#Integer"),
    ShapeType::Integer,
);

/// Schema for `smithy.api#Long`
pub static LONG: PreludeSchema = PreludeSchema::new(
    ShapeId::from_static("smithy.api#Long"),
    ShapeType::Long,
);

/// Schema for `smithy.api#Double`
pub static DOUBLE: PreludeSchema = PreludeSchema::new(
    ShapeId::from_static("smithy.api#Double"),
    ShapeType::Double,
);

/// Schema for `smithy.api#Timestamp`
pub static TIMESTAMP: PreludeSchema = PreludeSchema::new(
    ShapeId::from_static("smithy.api#Timestamp"),
    ShapeType::Timestamp,
);

/// Returns the prelude schema for a simple shape type.
///
/// Enums are strings on the wire and map to [`STRING`]. Aggregate types have no prelude
/// schema.
pub fn schema_for(shape_type: ShapeType) -> Option<&'static PreludeSchema> {
    match shape_type {
        ShapeType::String | ShapeType::Enum => Some(&STRING),
        ShapeType::Boolean => Some(&BOOLEAN),
        ShapeType::Integer => Some(&INTEGER),
        ShapeType::Long => Some(&LONG),
        ShapeType::Double => Some(&DOUBLE),
        ShapeType::Timestamp => Some(&TIMESTAMP),
        ShapeType::List | ShapeType::Map | ShapeType::Structure => None,
    }
}
