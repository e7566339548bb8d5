/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Shape deserialization interfaces.

use crate::Schema;
use iot_model_types::DateTime;
use std::error::Error;

/// Deserializes shapes from a serial format.
///
/// The deserializer uses a consumer pattern for aggregate types (structures, lists, maps).
/// For each member, element or entry it calls a consumer function that receives the current
/// state and returns the updated state.
///
/// Members present in the input but unknown to the structure schema are never passed to the
/// consumer; whether they are skipped or rejected is up to the format's settings.
///
/// # Example
///
/// ```ignore
/// let tag = deserializer.read_struct(&TAG, Tag::default(), |mut tag, member, deser| {
///     match member.member_name() {
///         Some("Key") => tag.key = deser.read_string(member)?,
///         Some("Value") => tag.value = Some(deser.read_string(member)?),
///         _ => {}
///     }
///     Ok(tag)
/// })?;
/// ```
pub trait ShapeDeserializer {
    /// The error type returned by deserialization operations.
    type Error: Error;

    /// Reads a structure, invoking `consumer` with `(state, member_schema, deserializer)` for
    /// each member present in the input.
    fn read_struct<T, F>(
        &mut self,
        schema: &dyn Schema,
        state: T,
        consumer: F,
    ) -> Result<T, Self::Error>
    where
        F: FnMut(T, &dyn Schema, &mut Self) -> Result<T, Self::Error>;

    /// Reads a list, invoking `consumer` with `(state, deserializer)` for each element.
    fn read_list<T, F>(
        &mut self,
        schema: &dyn Schema,
        state: T,
        consumer: F,
    ) -> Result<T, Self::Error>
    where
        F: FnMut(T, &mut Self) -> Result<T, Self::Error>;

    /// Reads a map, invoking `consumer` with `(state, key, deserializer)` for each entry.
    fn read_map<T, F>(
        &mut self,
        schema: &dyn Schema,
        state: T,
        consumer: F,
    ) -> Result<T, Self::Error>
    where
        F: FnMut(T, String, &mut Self) -> Result<T, Self::Error>;

    /// Reads a boolean value.
    fn read_boolean(&mut self, schema: &dyn Schema) -> Result<bool, Self::Error>;

    /// Reads an integer (i32) value.
    fn read_integer(&mut self, schema: &dyn Schema) -> Result<i32, Self::Error>;

    /// Reads a long (i64) value.
    fn read_long(&mut self, schema: &dyn Schema) -> Result<i64, Self::Error>;

    /// Reads a double (f64) value.
    fn read_double(&mut self, schema: &dyn Schema) -> Result<f64, Self::Error>;

    /// Reads a string value.
    fn read_string(&mut self, schema: &dyn Schema) -> Result<String, Self::Error>;

    /// Reads a timestamp value.
    fn read_timestamp(&mut self, schema: &dyn Schema) -> Result<DateTime, Self::Error>;

    /// Returns true if the current value is null.
    ///
    /// Null values are treated as absent.
    fn is_null(&self) -> bool;
}
