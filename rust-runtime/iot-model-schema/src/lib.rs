/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Runtime schema types for the IoT control-plane model layer.
//!
//! A schema is data, not code: every request, result and nested type is described by a
//! [`StructureSchema`] whose members are [`MemberSchema`] field descriptors. Descriptors carry
//! their constraints (required, length, pattern, allowed values, range) and HTTP binding
//! metadata as [`Trait`]s. Schemas are registered once in a [`SchemaRegistry`] and shared
//! read-only afterwards.

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

mod error;
mod member;
mod registry;
mod shape_type;
mod structure;
mod trait_map;
mod trait_type;

pub mod codec;
pub mod prelude;
pub mod serde;
pub mod traits;

pub use error::SchemaError;
pub use iot_model_types::date_time::Format as TimestampFormat;
pub use iot_model_types::{DateTime, ShapeId};
pub use member::{HttpBinding, MemberBuilder, MemberSchema};
pub use registry::SchemaRegistry;
pub use shape_type::ShapeType;
pub use structure::{StructureSchema, StructureSchemaBuilder};
pub use trait_map::TraitMap;
pub use trait_type::{StaticTrait, Trait};

/// Core trait representing a schema at runtime.
///
/// A schema is a lightweight runtime representation of a shape, containing the shape's ID,
/// type, traits, and references to member schemas.
pub trait Schema: Send + Sync {
    /// Returns the Shape ID of this schema.
    fn shape_id(&self) -> &ShapeId;

    /// Returns the shape type.
    ///
    /// For member schemas this is the type of the member's target.
    fn shape_type(&self) -> ShapeType;

    /// Returns the traits associated with this schema.
    fn traits(&self) -> &TraitMap;

    /// Returns the member name if this is a member schema.
    fn member_name(&self) -> Option<&str> {
        None
    }

    /// Returns the member schema by name (for structures).
    fn member_schema(&self, _name: &str) -> Option<&dyn Schema> {
        None
    }

    /// Returns the member schema by position index (for structures).
    fn member_schema_by_index(&self, _index: usize) -> Option<&dyn Schema> {
        None
    }

    /// Returns the element schema for collections (list member or map value).
    fn member(&self) -> Option<&dyn Schema> {
        None
    }

    /// Returns an iterator over member schemas (for structures).
    fn members(&self) -> Box<dyn Iterator<Item = &dyn Schema> + '_> {
        Box::new(std::iter::empty())
    }

    /// Returns the member's position within its structure, or `None` if this is not a
    /// structure member.
    fn member_index(&self) -> Option<usize> {
        None
    }
}

/// Helper methods for [`Schema`].
pub trait SchemaExt: Schema {
    /// Returns true if this is a structure schema.
    fn is_structure(&self) -> bool {
        self.shape_type() == ShapeType::Structure
    }

    /// Returns true if this is a list schema.
    fn is_list(&self) -> bool {
        self.shape_type() == ShapeType::List
    }

    /// Returns true if this is a map schema.
    fn is_map(&self) -> bool {
        self.shape_type() == ShapeType::Map
    }

    /// Returns true if this is a string schema. Enums are strings on the wire.
    fn is_string(&self) -> bool {
        matches!(self.shape_type(), ShapeType::String | ShapeType::Enum)
    }

    /// Returns the trait of type `T` attached to this schema, if any.
    fn get_trait<T: StaticTrait>(&self) -> Option<&T> {
        self.traits().get_as::<T>()
    }
}

impl<T: Schema + ?Sized> SchemaExt for T {}

#[cfg(test)]
mod test {
    use crate::traits::RequiredTrait;
    use crate::{Schema, SchemaExt, ShapeId, ShapeType, TraitMap};

    struct TestSchema {
        id: ShapeId,
        shape_type: ShapeType,
        traits: TraitMap,
    }

    impl Schema for TestSchema {
        fn shape_id(&self) -> &ShapeId {
            &self.id
        }

        fn shape_type(&self) -> ShapeType {
            self.shape_type
        }

        fn traits(&self) -> &TraitMap {
            &self.traits
        }
    }

    #[test]
    fn test_schema_defaults() {
        let schema = TestSchema {
            id: ShapeId::new("com.example#Thing"),
            shape_type: ShapeType::Structure,
            traits: TraitMap::new(),
        };

        assert_eq!(schema.shape_id().as_str(), "com.example#Thing");
        assert!(schema.is_structure());
        assert!(!schema.is_list());
        assert!(schema.member_name().is_none());
        assert!(schema.member_schema("name").is_none());
        assert!(schema.member_schema_by_index(0).is_none());
        assert_eq!(schema.members().count(), 0);
    }

    #[test]
    fn test_get_trait() {
        let mut traits = TraitMap::new();
        traits.insert(Box::new(RequiredTrait));
        let schema = TestSchema {
            id: ShapeId::new("com.example#Thing$name"),
            shape_type: ShapeType::Enum,
            traits,
        };

        assert!(schema.is_string());
        assert!(schema.get_trait::<RequiredTrait>().is_some());
    }
}
