/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! String serializer for HTTP bindings (headers, query params, URI labels).
//!
//! Values are written as plain text; list elements are comma-separated. Timestamps use the
//! member's `timestampFormat` trait, falling back to RFC 3339 date-time.

use crate::serde::ShapeSerializer;
use crate::traits::TimestampFormatTrait;
use crate::{Schema, SchemaExt, TimestampFormat};
use iot_model_types::DateTime;
use std::error::Error;
use std::fmt;

/// Error type for HTTP string serialization.
#[derive(Debug)]
pub struct HttpStringCodecError {
    message: String,
}

impl HttpStringCodecError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for HttpStringCodecError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP string codec error: {}", self.message)
    }
}

impl Error for HttpStringCodecError {}

fn timestamp_format(schema: &dyn Schema) -> TimestampFormat {
    schema
        .get_trait::<TimestampFormatTrait>()
        .map(|format| format.0)
        .unwrap_or(TimestampFormat::DateTime)
}

/// Serializer for converting simple values to strings.
#[derive(Debug, Default)]
pub struct HttpStringSerializer {
    output: String,
    wrote_value: bool,
}

impl HttpStringSerializer {
    /// Creates a new HTTP string serializer.
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, value: &str) {
        if self.wrote_value {
            self.output.push(',');
        }
        self.output.push_str(value);
        self.wrote_value = true;
    }
}

impl ShapeSerializer for HttpStringSerializer {
    type Output = String;
    type Error = HttpStringCodecError;

    fn finish(self) -> Result<Self::Output, Self::Error> {
        Ok(self.output)
    }

    fn write_struct<F>(
        &mut self,
        _schema: &dyn Schema,
        _write_members: F,
    ) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        Err(HttpStringCodecError::new(
            "structures cannot be serialized to strings",
        ))
    }

    fn write_list<F>(&mut self, _schema: &dyn Schema, write_elements: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        write_elements(self)
    }

    fn write_map<F>(&mut self, _schema: &dyn Schema, _write_entries: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        Err(HttpStringCodecError::new(
            "maps cannot be serialized to strings",
        ))
    }

    fn write_map_key(&mut self, _key: &str) -> Result<(), Self::Error> {
        Err(HttpStringCodecError::new(
            "maps cannot be serialized to strings",
        ))
    }

    fn write_boolean(&mut self, _schema: &dyn Schema, value: bool) -> Result<(), Self::Error> {
        self.push(if value { "true" } else { "false" });
        Ok(())
    }

    fn write_integer(&mut self, _schema: &dyn Schema, value: i32) -> Result<(), Self::Error> {
        self.push(&value.to_string());
        Ok(())
    }

    fn write_long(&mut self, _schema: &dyn Schema, value: i64) -> Result<(), Self::Error> {
        self.push(&value.to_string());
        Ok(())
    }

    fn write_double(&mut self, _schema: &dyn Schema, value: f64) -> Result<(), Self::Error> {
        if value.is_nan() {
            self.push("NaN");
        } else if value.is_infinite() {
            self.push(if value.is_sign_positive() {
                "Infinity"
            } else {
                "-Infinity"
            });
        } else {
            self.push(&value.to_string());
        }
        Ok(())
    }

    fn write_string(&mut self, _schema: &dyn Schema, value: &str) -> Result<(), Self::Error> {
        self.push(value);
        Ok(())
    }

    fn write_timestamp(
        &mut self,
        schema: &dyn Schema,
        value: &DateTime,
    ) -> Result<(), Self::Error> {
        let formatted = value
            .fmt(timestamp_format(schema))
            .map_err(|e| HttpStringCodecError::new(format!("failed to format timestamp: {e}")))?;
        self.push(&formatted);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use crate::{MemberSchema, ShapeId};

    #[test]
    fn test_serialize_simple_values() {
        let mut ser = HttpStringSerializer::new();
        ser.write_boolean(&BOOLEAN, true).unwrap();
        assert_eq!(ser.finish().unwrap(), "true");

        let mut ser = HttpStringSerializer::new();
        ser.write_long(&LONG, 9876543210).unwrap();
        assert_eq!(ser.finish().unwrap(), "9876543210");

        let mut ser = HttpStringSerializer::new();
        ser.write_double(&DOUBLE, f64::NEG_INFINITY).unwrap();
        assert_eq!(ser.finish().unwrap(), "-Infinity");
    }

    #[test]
    fn test_serialize_list() {
        let mut ser = HttpStringSerializer::new();
        ser.write_list(&STRING, |s| {
            s.write_string(&STRING, "")?;
            s.write_string(&STRING, "b")?;
            s.write_string(&STRING, "c")?;
            Ok(())
        })
        .unwrap();
        assert_eq!(ser.finish().unwrap(), ",b,c");
    }

    #[test]
    fn test_structures_and_maps_are_rejected() {
        let mut ser = HttpStringSerializer::new();
        assert!(ser.write_struct(&STRING, |_| Ok(())).is_err());
        assert!(ser.write_map(&STRING, |_| Ok(())).is_err());
    }

    #[test]
    fn test_timestamp_format_override() {
        let date = DateTime::from_secs(1576540098);

        let mut ser = HttpStringSerializer::new();
        ser.write_timestamp(&TIMESTAMP, &date).unwrap();
        assert_eq!(ser.finish().unwrap(), "2019-12-16T23:48:18Z");

        let structure = crate::StructureSchema::builder(ShapeId::new("com.example#Audit"))
            .member(
                MemberSchema::timestamp("startTime").timestamp_format(TimestampFormat::EpochSeconds),
            )
            .build()
            .unwrap();
        let member = structure.get_member("startTime").unwrap();
        let mut ser = HttpStringSerializer::new();
        ser.write_timestamp(member, &date).unwrap();
        assert_eq!(ser.finish().unwrap(), "1576540098");
    }
}
