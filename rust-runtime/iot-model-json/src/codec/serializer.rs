/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! JSON serializer implementation.

use iot_model_schema::serde::ShapeSerializer;
use iot_model_schema::{Schema, TimestampFormat};
use iot_model_types::DateTime;
use std::fmt;
use std::fmt::Write;

use crate::codec::JsonCodecSettings;
use crate::escape::escape_string;

/// Error type for JSON serialization.
#[derive(Debug)]
pub enum JsonSerializerError {
    /// An error occurred during JSON writing.
    WriteError(String),
    /// A structure member was written with a schema that has no member name.
    MissingMemberName(String),
    /// A map value was written without a preceding key, or a key outside a map.
    MisplacedMapKey,
}

impl fmt::Display for JsonSerializerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteError(msg) => write!(f, "JSON write error: {msg}"),
            Self::MissingMemberName(shape) => {
                write!(f, "cannot write `{shape}` inside a structure: it has no member name")
            }
            Self::MisplacedMapKey => write!(f, "map keys and values must alternate"),
        }
    }
}

impl std::error::Error for JsonSerializerError {}

impl From<fmt::Error> for JsonSerializerError {
    fn from(err: fmt::Error) -> Self {
        Self::WriteError(err.to_string())
    }
}

#[derive(Debug)]
enum Frame {
    Struct { first: bool },
    List { first: bool },
    Map { first: bool, key_pending: bool },
}

/// JSON serializer that implements the ShapeSerializer trait.
///
/// Structure members are keyed by [`Schema::member_name`]; absent members are simply never
/// written.
#[derive(Debug)]
pub struct JsonSerializer {
    output: String,
    settings: JsonCodecSettings,
    frames: Vec<Frame>,
}

impl JsonSerializer {
    /// Creates a new JSON serializer with the given settings.
    pub fn new(settings: JsonCodecSettings) -> Self {
        Self {
            output: String::new(),
            settings,
            frames: Vec::new(),
        }
    }

    /// Writes the separator and, inside a structure, the member key for the next value.
    fn begin_value(&mut self, schema: &dyn Schema) -> Result<(), JsonSerializerError> {
        match self.frames.last_mut() {
            None => {}
            Some(Frame::Struct { first }) => {
                let name = schema.member_name().ok_or_else(|| {
                    JsonSerializerError::MissingMemberName(schema.shape_id().to_string())
                })?;
                if !std::mem::replace(first, false) {
                    self.output.push(',');
                }
                self.output.push('"');
                self.output.push_str(&escape_string(name));
                self.output.push_str("\":");
            }
            Some(Frame::List { first }) => {
                if !std::mem::replace(first, false) {
                    self.output.push(',');
                }
            }
            Some(Frame::Map { key_pending, .. }) => {
                if !std::mem::replace(key_pending, false) {
                    return Err(JsonSerializerError::MisplacedMapKey);
                }
            }
        }
        Ok(())
    }

    fn write_container<F>(
        &mut self,
        schema: &dyn Schema,
        frame: Frame,
        delimiters: (char, char),
        write_contents: F,
    ) -> Result<(), JsonSerializerError>
    where
        F: FnOnce(&mut Self) -> Result<(), JsonSerializerError>,
    {
        self.begin_value(schema)?;
        self.output.push(delimiters.0);
        self.frames.push(frame);
        write_contents(self)?;
        if let Some(Frame::Map {
            key_pending: true, ..
        }) = self.frames.pop()
        {
            return Err(JsonSerializerError::MisplacedMapKey);
        }
        self.output.push(delimiters.1);
        Ok(())
    }

    fn write_display(
        &mut self,
        schema: &dyn Schema,
        value: impl fmt::Display,
    ) -> Result<(), JsonSerializerError> {
        self.begin_value(schema)?;
        write!(&mut self.output, "{value}")?;
        Ok(())
    }
}

impl ShapeSerializer for JsonSerializer {
    type Output = Vec<u8>;
    type Error = JsonSerializerError;

    fn finish(self) -> Result<Self::Output, Self::Error> {
        Ok(self.output.into_bytes())
    }

    fn write_struct<F>(&mut self, schema: &dyn Schema, write_members: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        self.write_container(schema, Frame::Struct { first: true }, ('{', '}'), write_members)
    }

    fn write_list<F>(&mut self, schema: &dyn Schema, write_elements: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        self.write_container(schema, Frame::List { first: true }, ('[', ']'), write_elements)
    }

    fn write_map<F>(&mut self, schema: &dyn Schema, write_entries: F) -> Result<(), Self::Error>
    where
        F: FnOnce(&mut Self) -> Result<(), Self::Error>,
    {
        let frame = Frame::Map {
            first: true,
            key_pending: false,
        };
        self.write_container(schema, frame, ('{', '}'), write_entries)
    }

    fn write_map_key(&mut self, key: &str) -> Result<(), Self::Error> {
        match self.frames.last_mut() {
            Some(Frame::Map { first, key_pending }) if !*key_pending => {
                if !std::mem::replace(first, false) {
                    self.output.push(',');
                }
                *key_pending = true;
            }
            _ => return Err(JsonSerializerError::MisplacedMapKey),
        }
        self.output.push('"');
        self.output.push_str(&escape_string(key));
        self.output.push_str("\":");
        Ok(())
    }

    fn write_boolean(&mut self, schema: &dyn Schema, value: bool) -> Result<(), Self::Error> {
        self.write_display(schema, value)
    }

    fn write_integer(&mut self, schema: &dyn Schema, value: i32) -> Result<(), Self::Error> {
        self.write_display(schema, value)
    }

    fn write_long(&mut self, schema: &dyn Schema, value: i64) -> Result<(), Self::Error> {
        self.write_display(schema, value)
    }

    fn write_double(&mut self, schema: &dyn Schema, value: f64) -> Result<(), Self::Error> {
        if value.is_nan() {
            self.write_string(schema, "NaN")
        } else if value.is_infinite() {
            let name = if value.is_sign_positive() {
                "Infinity"
            } else {
                "-Infinity"
            };
            self.write_string(schema, name)
        } else {
            self.write_display(schema, value)
        }
    }

    fn write_string(&mut self, schema: &dyn Schema, value: &str) -> Result<(), Self::Error> {
        self.begin_value(schema)?;
        self.output.push('"');
        self.output.push_str(&escape_string(value));
        self.output.push('"');
        Ok(())
    }

    fn write_timestamp(
        &mut self,
        schema: &dyn Schema,
        value: &DateTime,
    ) -> Result<(), Self::Error> {
        let format = self.settings.timestamp_format(schema);
        let formatted = value.fmt(format).map_err(|e| {
            JsonSerializerError::WriteError(format!("Failed to format timestamp: {e}"))
        })?;

        match format {
            // Epoch seconds as number
            TimestampFormat::EpochSeconds => self.write_display(schema, formatted),
            TimestampFormat::DateTime => self.write_string(schema, &formatted),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iot_model_schema::prelude::*;
    use iot_model_schema::{MemberSchema, StructureSchema};
    use pretty_assertions::assert_eq;

    fn output(ser: JsonSerializer) -> String {
        String::from_utf8(ser.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_write_simple_values() {
        let mut ser = JsonSerializer::new(JsonCodecSettings::default());
        ser.write_boolean(&BOOLEAN, true).unwrap();
        assert_eq!(output(ser), "true");

        let mut ser = JsonSerializer::new(JsonCodecSettings::default());
        ser.write_string(&STRING, "say \"hi\"").unwrap();
        assert_eq!(output(ser), r#""say \"hi\"""#);

        let mut ser = JsonSerializer::new(JsonCodecSettings::default());
        ser.write_long(&LONG, -42).unwrap();
        assert_eq!(output(ser), "-42");
    }

    #[test]
    fn test_non_finite_doubles_are_strings() {
        let mut ser = JsonSerializer::new(JsonCodecSettings::default());
        ser.write_list(&DOUBLE, |s| {
            s.write_double(&DOUBLE, f64::NAN)?;
            s.write_double(&DOUBLE, f64::INFINITY)?;
            s.write_double(&DOUBLE, f64::NEG_INFINITY)?;
            s.write_double(&DOUBLE, 2.5)
        })
        .unwrap();
        assert_eq!(output(ser), r#"["NaN","Infinity","-Infinity",2.5]"#);
    }

    #[test]
    fn test_timestamps() {
        let schema = StructureSchema::builder("test#Times")
            .member(MemberSchema::timestamp("epoch"))
            .member(MemberSchema::timestamp("rfc").timestamp_format(TimestampFormat::DateTime))
            .build()
            .unwrap();
        let value = DateTime::from_millis(1_576_540_098_500);
        let mut ser = JsonSerializer::new(JsonCodecSettings::default());
        ser.write_struct(&schema, |s| {
            s.write_timestamp(schema.get_member("epoch").unwrap(), &value)?;
            s.write_timestamp(schema.get_member("rfc").unwrap(), &value)
        })
        .unwrap();
        assert_eq!(
            output(ser),
            r#"{"epoch":1576540098.5,"rfc":"2019-12-16T23:48:18.5Z"}"#
        );
    }

    #[test]
    fn test_nested_containers() {
        let schema = StructureSchema::builder("test#User")
            .member(MemberSchema::long("id"))
            .member(MemberSchema::list("scores", MemberSchema::double("score")))
            .member(MemberSchema::map(
                "tags",
                MemberSchema::list("values", MemberSchema::string("value")),
            ))
            .build()
            .unwrap();
        let scores = schema.get_member("scores").unwrap();
        let tags = schema.get_member("tags").unwrap();

        let mut ser = JsonSerializer::new(JsonCodecSettings::default());
        ser.write_struct(&schema, |s| {
            s.write_long(schema.get_member("id").unwrap(), 12345)?;
            s.write_list(scores, |ls| {
                ls.write_double(scores.element().unwrap(), 95.5)?;
                ls.write_double(scores.element().unwrap(), 87.0)
            })?;
            s.write_map(tags, |ms| {
                let values = tags.element().unwrap();
                ms.write_map_key("role")?;
                ms.write_list(values, |ls| ls.write_string(&STRING, "admin"))?;
                ms.write_map_key("empty")?;
                ms.write_list(values, |_| Ok(()))
            })
        })
        .unwrap();
        assert_eq!(
            output(ser),
            r#"{"id":12345,"scores":[95.5,87],"tags":{"role":["admin"],"empty":[]}}"#
        );
    }

    #[test]
    fn test_struct_members_need_names() {
        let schema = StructureSchema::builder("test#Empty").build().unwrap();
        let mut ser = JsonSerializer::new(JsonCodecSettings::default());
        let err = ser
            .write_struct(&schema, |s| s.write_integer(&INTEGER, 1))
            .unwrap_err();
        assert!(matches!(err, JsonSerializerError::MissingMemberName(_)), "{err}");
    }

    #[test]
    fn test_map_keys_and_values_alternate() {
        let mut ser = JsonSerializer::new(JsonCodecSettings::default());
        let err = ser
            .write_map(&STRING, |s| s.write_string(&STRING, "orphan"))
            .unwrap_err();
        assert!(matches!(err, JsonSerializerError::MisplacedMapKey), "{err}");

        let mut ser = JsonSerializer::new(JsonCodecSettings::default());
        let err = ser.write_map(&STRING, |s| s.write_map_key("k")).unwrap_err();
        assert!(matches!(err, JsonSerializerError::MisplacedMapKey), "{err}");
    }
}
