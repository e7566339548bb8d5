/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::ShapeId;
use std::any::Any;
use std::fmt;

/// Trait representing a shape trait at runtime.
///
/// Traits provide additional metadata about shapes that affect validation,
/// serialization and HTTP binding.
pub trait Trait: Any + Send + Sync + fmt::Debug {
    /// Returns the Shape ID of this trait.
    fn trait_id(&self) -> &ShapeId;

    /// Returns this trait as `&dyn Any` for downcasting.
    fn as_any(&self) -> &dyn Any;
}

/// A [`Trait`] whose Shape ID is known at compile time.
///
/// Implementors can be looked up by type with [`TraitMap::get_as`](crate::TraitMap::get_as).
pub trait StaticTrait: Trait + Sized {
    /// The Shape ID every instance of this trait is registered under.
    const ID: ShapeId;
}
