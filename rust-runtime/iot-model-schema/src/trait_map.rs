/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::{ShapeId, StaticTrait, Trait};
use std::collections::HashMap;

/// A map of traits keyed by their Shape ID.
///
/// Traits are attached when a schema is defined and never change afterwards.
#[derive(Debug)]
pub struct TraitMap {
    traits: HashMap<ShapeId, Box<dyn Trait>>,
}

impl Default for TraitMap {
    fn default() -> Self {
        Self::new()
    }
}

impl TraitMap {
    /// Creates a new empty TraitMap.
    pub fn new() -> Self {
        Self {
            traits: HashMap::new(),
        }
    }

    /// Creates a TraitMap with zero allocated space for prelude schemas.
    pub(crate) fn empty() -> Self {
        Self {
            traits: HashMap::with_capacity(0),
        }
    }

    /// Inserts a trait into the map, replacing any trait with the same Shape ID.
    pub fn insert(&mut self, trait_obj: Box<dyn Trait>) {
        let id = trait_obj.trait_id().clone();
        self.traits.insert(id, trait_obj);
    }

    /// Gets a trait by its Shape ID.
    pub fn get(&self, id: &ShapeId) -> Option<&dyn Trait> {
        self.traits.get(id).map(|t| t.as_ref())
    }

    /// Gets a trait by its concrete type.
    pub fn get_as<T: StaticTrait>(&self) -> Option<&T> {
        self.get(&T::ID)
            .and_then(|t| t.as_any().downcast_ref::<T>())
    }

    /// Returns true if the map contains a trait with the given Shape ID.
    pub fn contains(&self, id: &ShapeId) -> bool {
        self.traits.contains_key(id)
    }

    /// Returns an iterator over all traits.
    pub fn iter(&self) -> impl Iterator<Item = (&ShapeId, &dyn Trait)> {
        self.traits.iter().map(|(s, t)| (s, t.as_ref()))
    }

    /// Returns the number of traits in the map.
    pub fn len(&self) -> usize {
        self.traits.len()
    }

    /// Returns true if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.traits.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{LengthTrait, RequiredTrait};

    #[test]
    fn test_trait_map() {
        let mut map = TraitMap::new();
        assert!(map.is_empty());

        map.insert(Box::new(RequiredTrait));
        map.insert(Box::new(LengthTrait::between(1, 128)));
        assert_eq!(map.len(), 2);
        assert!(map.contains(&ShapeId::new("smithy.api#required")));
        assert_eq!(
            map.get_as::<LengthTrait>(),
            Some(&LengthTrait::between(1, 128))
        );
    }

    #[test]
    fn test_insert_replaces_same_id() {
        let mut map = TraitMap::new();
        map.insert(Box::new(LengthTrait::at_least(1)));
        map.insert(Box::new(LengthTrait::at_most(10)));
        assert_eq!(map.len(), 1);
        assert_eq!(map.get_as::<LengthTrait>(), Some(&LengthTrait::at_most(10)));
    }
}
