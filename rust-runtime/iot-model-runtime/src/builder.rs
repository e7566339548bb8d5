/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::{ModelError, ModelInstance, Value};

/// By-value builder for a [`ModelInstance`].
///
/// Each call consumes and returns the builder. The first structural error is kept and
/// returned by [`build`](ModelBuilder::build); later calls are ignored once an error is
/// recorded. Like [`ModelInstance::set`], the builder never checks constraints.
#[derive(Debug)]
#[must_use]
pub struct ModelBuilder {
    instance: ModelInstance,
    error: Option<ModelError>,
}

impl ModelBuilder {
    pub(crate) fn new(instance: ModelInstance) -> Self {
        Self {
            instance,
            error: None,
        }
    }

    fn apply(
        mut self,
        op: impl FnOnce(&mut ModelInstance) -> Result<(), ModelError>,
    ) -> Self {
        if self.error.is_none() {
            if let Err(err) = op(&mut self.instance) {
                self.error = Some(err);
            }
        }
        self
    }

    /// Sets a field.
    pub fn with(self, name: &str, value: impl Into<Value>) -> Self {
        self.apply(|instance| instance.set(name, value))
    }

    /// Makes a field absent.
    pub fn unset(self, name: &str) -> Self {
        self.apply(|instance| instance.unset(name))
    }

    /// Appends one element to a list field.
    pub fn append(self, name: &str, element: impl Into<Value>) -> Self {
        self.apply(|instance| instance.append(name, element))
    }

    /// Appends elements to a list field.
    pub fn append_all<I, V>(self, name: &str, elements: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.apply(|instance| instance.append_all(name, elements))
    }

    /// Adds one entry to a map field.
    pub fn put_entry(self, name: &str, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.apply(|instance| instance.put_entry(name, key, value))
    }

    /// Clears a map field.
    pub fn clear_entries(self, name: &str) -> Self {
        self.apply(|instance| instance.clear_entries(name))
    }

    /// Returns the instance, or the first error recorded while building it.
    pub fn build(self) -> Result<ModelInstance, ModelError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.instance),
        }
    }
}
