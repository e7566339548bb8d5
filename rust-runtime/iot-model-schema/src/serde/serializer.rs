/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Shape serialization interfaces.

use crate::Schema;
use iot_model_types::DateTime;
use std::error::Error;

/// Serializes shapes to a target format.
///
/// The serializer accepts a schema along with the value to provide additional information
/// about how to serialize it (member name, timestamp format).
///
/// Inside [`write_struct`](ShapeSerializer::write_struct), every value is written with the
/// schema of the member it belongs to, so formats that key members by name can read the
/// name from [`Schema::member_name`]. Inside [`write_map`](ShapeSerializer::write_map),
/// each entry is a [`write_map_key`](ShapeSerializer::write_map_key) followed by one value.
///
/// # Example
///
/// ```ignore
/// let mut serializer = codec.create_serializer();
/// serializer.write_string(&STRING, "sensor-01")?;
/// let bytes = serializer.finish()?;
/// ```
pub trait ShapeSerializer {
    /// The serialization target type (e.g., `Vec<u8>`, `String`).
    type Output;

    /// The error type returned by serialization operations.
    type Error: Error;

    /// Finalizes the serialization and returns the serialized output.
    fn finish(self) -> Result<Self::Output, Self::Error>;

    /// Writes a structure; `write_members` writes each present member.
    fn write_struct<F>(&mut self, schema: &dyn Schema, write_members: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>;

    /// Writes a list; `write_elements` writes each element with the list's element schema.
    fn write_list<F>(&mut self, schema: &dyn Schema, write_elements: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>;

    /// Writes a map; `write_entries` writes each key and value pair.
    fn write_map<F>(&mut self, schema: &dyn Schema, write_entries: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>;

    /// Writes the key of the next map entry.
    fn write_map_key(&mut self, key: &str) -> Result<(), Self::Error>;

    /// Writes a boolean value.
    fn write_boolean(&mut self, schema: &dyn Schema, value: bool) -> Result<(), Self::Error>;

    /// Writes an integer (i32) value.
    fn write_integer(&mut self, schema: &dyn Schema, value: i32) -> Result<(), Self::Error>;

    /// Writes a long (i64) value.
    fn write_long(&mut self, schema: &dyn Schema, value: i64) -> Result<(), Self::Error>;

    /// Writes a double (f64) value.
    fn write_double(&mut self, schema: &dyn Schema, value: f64) -> Result<(), Self::Error>;

    /// Writes a string value. Enum values are written as strings.
    fn write_string(&mut self, schema: &dyn Schema, value: &str) -> Result<(), Self::Error>;

    /// Writes a timestamp value.
    fn write_timestamp(&mut self, schema: &dyn Schema, value: &DateTime)
        -> Result<(), Self::Error>;
}

/// Trait for structures that can be serialized.
///
/// # Example
///
/// ```ignore
/// impl SerializableStruct for Tag {
///     fn serialize<S: ShapeSerializer>(&self, serializer: &mut S) -> Result<(), S::Error> {
///         serializer.write_struct(&TAG, |ser| {
///             ser.write_string(&TAG_KEY, &self.key)?;
///             if let Some(value) = &self.value {
///                 ser.write_string(&TAG_VALUE, value)?;
///             }
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait SerializableStruct {
    /// Serializes this structure using the provided serializer.
    fn serialize<S: ShapeSerializer>(&self, serializer: &mut S) -> Result<(), S::Error>;
}
