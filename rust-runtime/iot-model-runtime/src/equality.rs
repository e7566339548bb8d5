/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Structural equality and hashing.
//!
//! Two instances are equal when they share a type and every field is pairwise equal, with
//! absent equal only to absent. Doubles compare by bit pattern after collapsing every NaN
//! to one value, so `NaN == NaN` and `0.0 != -0.0`; this keeps `Eq` and `Hash` lawful.
//!
//! The hash folds fields in declaration order as `h = 31 * h + field_hash`, starting from 1,
//! with 0 standing in for an absent field.

use crate::{ModelInstance, Value};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const MULTIPLIER: u64 = 31;

fn canonical_bits(value: f64) -> u64 {
    if value.is_nan() {
        f64::NAN.to_bits()
    } else {
        value.to_bits()
    }
}

fn leaf_hash<T: Hash + ?Sized>(tag: u8, value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    tag.hash(&mut hasher);
    value.hash(&mut hasher);
    hasher.finish()
}

impl Value {
    /// Hash of this value, consistent with its `PartialEq` implementation.
    pub(crate) fn structural_hash(&self) -> u64 {
        match self {
            Value::String(value) => leaf_hash(0, value.as_str()),
            Value::Integer(value) => leaf_hash(1, value),
            Value::Long(value) => leaf_hash(2, value),
            Value::Double(value) => leaf_hash(3, &canonical_bits(*value)),
            Value::Boolean(value) => leaf_hash(4, value),
            Value::Timestamp(value) => leaf_hash(5, value),
            Value::List(elements) => elements.iter().fold(1, |hash: u64, element| {
                hash.wrapping_mul(MULTIPLIER)
                    .wrapping_add(element.structural_hash())
            }),
            // Map iteration order must not matter
            Value::Map(entries) => entries.iter().fold(0, |hash: u64, (key, value)| {
                hash.wrapping_add(leaf_hash(0, key.as_str()) ^ value.structural_hash())
            }),
            Value::Structure(instance) => instance.structural_hash(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Long(a), Value::Long(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => canonical_bits(*a) == canonical_bits(*b),
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Timestamp(a), Value::Timestamp(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Map(a), Value::Map(b)) => a == b,
            (Value::Structure(a), Value::Structure(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}

impl ModelInstance {
    /// Hash over the type and every field, in declaration order.
    ///
    /// Equal instances always have equal hashes.
    pub fn structural_hash(&self) -> u64 {
        self.fields().iter().fold(1, |hash: u64, field| {
            let field_hash = field.as_ref().map_or(0, Value::structural_hash);
            hash.wrapping_mul(MULTIPLIER).wrapping_add(field_hash)
        })
    }
}

impl PartialEq for ModelInstance {
    fn eq(&self, other: &Self) -> bool {
        self.shape_id() == other.shape_id() && self.fields() == other.fields()
    }
}

impl Eq for ModelInstance {}

impl Hash for ModelInstance {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.structural_hash());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iot_model_schema::{MemberSchema, StructureSchema};
    use std::collections::{BTreeMap, HashSet};
    use std::sync::Arc;

    fn schema() -> Arc<StructureSchema> {
        Arc::new(
            StructureSchema::builder("com.example#Rate")
                .member(MemberSchema::string("name"))
                .member(MemberSchema::double("incrementFactor"))
                .member(MemberSchema::map("tags", MemberSchema::string("v")))
                .build()
                .unwrap(),
        )
    }

    fn hash_of<T: Hash>(value: &T) -> u64 {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn equal_instances_hash_equally() {
        let schema = schema();
        let build = |factor: f64| {
            ModelInstance::builder(schema.clone())
                .with("name", "rate")
                .with("incrementFactor", factor)
                .put_entry("tags", "b", "2")
                .put_entry("tags", "a", "1")
                .build()
                .unwrap()
        };
        let a = build(1.5);
        let b = build(1.5);
        assert_eq!(a, b);
        assert_eq!(a.structural_hash(), b.structural_hash());
        assert_eq!(hash_of(&a), hash_of(&b));
        assert_ne!(a, build(2.0));

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn absent_differs_from_empty() {
        let schema = schema();
        let absent = ModelInstance::new(schema.clone());
        let mut empty = ModelInstance::new(schema);
        empty.set("name", "").unwrap();
        assert_ne!(absent, empty);

        let mut empty_map = ModelInstance::new(absent.schema().clone());
        empty_map
            .set("tags", BTreeMap::<String, String>::new())
            .unwrap();
        assert_ne!(absent, empty_map);
    }

    #[test]
    fn empty_instance_hash_is_stable() {
        // Three absent fields: ((1 * 31 + 0) * 31 + 0) * 31 + 0
        assert_eq!(ModelInstance::new(schema()).structural_hash(), 29791);
    }

    #[test]
    fn nan_equals_nan_and_zero_signs_differ() {
        assert_eq!(Value::Double(f64::NAN), Value::Double(-f64::NAN));
        assert_ne!(Value::Double(0.0), Value::Double(-0.0));
        assert_eq!(
            Value::Double(f64::NAN).structural_hash(),
            Value::Double(f64::NAN).structural_hash()
        );
    }

    #[test]
    fn instances_of_different_types_differ() {
        let other = Arc::new(
            StructureSchema::builder("com.example#Other")
                .member(MemberSchema::string("name"))
                .member(MemberSchema::double("incrementFactor"))
                .member(MemberSchema::map("tags", MemberSchema::string("v")))
                .build()
                .unwrap(),
        );
        assert_ne!(ModelInstance::new(schema()), ModelInstance::new(other));
    }

    proptest::proptest! {
        #[test]
        fn map_insertion_order_does_not_matter(
            entries in proptest::collection::btree_map("[a-z]{1,8}", "[a-z0-9]{0,8}", 0..8),
            name in proptest::option::of(".{0,16}"),
            factor in proptest::num::f64::ANY,
        ) {
            let schema = schema();
            let mut forward = ModelInstance::new(schema.clone());
            let mut backward = ModelInstance::new(schema);
            for (key, value) in &entries {
                forward.put_entry("tags", key.as_str(), value.as_str()).unwrap();
            }
            for (key, value) in entries.iter().rev() {
                backward.put_entry("tags", key.as_str(), value.as_str()).unwrap();
            }
            if let Some(name) = name {
                forward.set("name", name.as_str()).unwrap();
                backward.set("name", name).unwrap();
            }
            forward.set("incrementFactor", factor).unwrap();
            backward.set("incrementFactor", factor).unwrap();

            proptest::prop_assert_eq!(&forward, &backward);
            proptest::prop_assert_eq!(forward.structural_hash(), backward.structural_hash());
        }
    }
}
