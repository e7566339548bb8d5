/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! JSON deserializer implementation.

use iot_model_schema::serde::ShapeDeserializer;
use iot_model_schema::{Schema, TimestampFormat};
use iot_model_types::DateTime;
use serde_json::Value;
use std::fmt;

use crate::codec::JsonCodecSettings;

/// Error type for JSON deserialization.
#[derive(Debug)]
pub enum JsonDeserializerError {
    /// An error occurred during JSON parsing.
    ParseError(String),
    /// The JSON value has a different type than the schema expects.
    UnexpectedType {
        /// What the schema expected.
        expected: &'static str,
        /// What the input held.
        found: &'static str,
    },
    /// A number does not fit the schema's numeric type.
    NumberOutOfRange(String),
    /// A timestamp could not be parsed.
    InvalidTimestamp(String),
    /// The input holds a member the structure does not define, and unknown members are not
    /// allowed.
    UnknownMember {
        /// The structure being read.
        shape: String,
        /// The unknown member name.
        member: String,
    },
}

impl fmt::Display for JsonDeserializerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseError(msg) => write!(f, "JSON parse error: {msg}"),
            Self::UnexpectedType { expected, found } => {
                write!(f, "expected {expected}, found {found}")
            }
            Self::NumberOutOfRange(number) => write!(f, "number {number} is out of range"),
            Self::InvalidTimestamp(msg) => write!(f, "invalid timestamp: {msg}"),
            Self::UnknownMember { shape, member } => {
                write!(f, "`{shape}` has no member named `{member}`")
            }
        }
    }
}

impl std::error::Error for JsonDeserializerError {}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn unexpected(expected: &'static str, found: &Value) -> JsonDeserializerError {
    JsonDeserializerError::UnexpectedType {
        expected,
        found: type_name(found),
    }
}

/// JSON deserializer that implements the ShapeDeserializer trait.
///
/// The input is parsed up front. Aggregate reads walk the parsed tree, making each member,
/// element or entry the current value before handing it to the consumer.
#[derive(Debug)]
pub struct JsonDeserializer {
    current: Value,
    parse_error: Option<String>,
    settings: JsonCodecSettings,
}

impl JsonDeserializer {
    /// Creates a new JSON deserializer with the given settings.
    ///
    /// Parse errors are reported by the first read.
    pub fn new(input: &[u8], settings: JsonCodecSettings) -> Self {
        let (current, parse_error) = match serde_json::from_slice(input) {
            Ok(value) => (value, None),
            Err(err) => (Value::Null, Some(err.to_string())),
        };
        Self {
            current,
            parse_error,
            settings,
        }
    }

    fn take_current(&mut self) -> Result<Value, JsonDeserializerError> {
        if let Some(msg) = &self.parse_error {
            return Err(JsonDeserializerError::ParseError(msg.clone()));
        }
        Ok(std::mem::take(&mut self.current))
    }

    fn current(&self) -> Result<&Value, JsonDeserializerError> {
        match &self.parse_error {
            Some(msg) => Err(JsonDeserializerError::ParseError(msg.clone())),
            None => Ok(&self.current),
        }
    }

    fn read_i64(&self, expected: &'static str) -> Result<i64, JsonDeserializerError> {
        match self.current()? {
            Value::Number(number) => number
                .as_i64()
                .ok_or_else(|| JsonDeserializerError::NumberOutOfRange(number.to_string())),
            other => Err(unexpected(expected, other)),
        }
    }
}

impl ShapeDeserializer for JsonDeserializer {
    type Error = JsonDeserializerError;

    fn read_struct<T, F>(
        &mut self,
        schema: &dyn Schema,
        mut state: T,
        mut consumer: F,
    ) -> Result<T, Self::Error>
    where
        F: FnMut(T, &dyn Schema, &mut Self) -> Result<T, Self::Error>,
    {
        let members = match self.take_current()? {
            Value::Object(members) => members,
            other => return Err(unexpected("object", &other)),
        };
        for (name, value) in members {
            match schema.member_schema(&name) {
                Some(member) => {
                    self.current = value;
                    state = consumer(state, member, self)?;
                }
                None if self.settings.allow_unknown_members => {
                    tracing::debug!(
                        shape = %schema.shape_id(),
                        member = %name,
                        "skipping unknown member"
                    );
                }
                None => {
                    return Err(JsonDeserializerError::UnknownMember {
                        shape: schema.shape_id().to_string(),
                        member: name,
                    })
                }
            }
        }
        self.current = Value::Null;
        Ok(state)
    }

    fn read_list<T, F>(
        &mut self,
        _schema: &dyn Schema,
        mut state: T,
        mut consumer: F,
    ) -> Result<T, Self::Error>
    where
        F: FnMut(T, &mut Self) -> Result<T, Self::Error>,
    {
        let elements = match self.take_current()? {
            Value::Array(elements) => elements,
            other => return Err(unexpected("array", &other)),
        };
        for element in elements {
            self.current = element;
            state = consumer(state, self)?;
        }
        self.current = Value::Null;
        Ok(state)
    }

    fn read_map<T, F>(
        &mut self,
        _schema: &dyn Schema,
        mut state: T,
        mut consumer: F,
    ) -> Result<T, Self::Error>
    where
        F: FnMut(T, String, &mut Self) -> Result<T, Self::Error>,
    {
        let entries = match self.take_current()? {
            Value::Object(entries) => entries,
            other => return Err(unexpected("object", &other)),
        };
        for (key, value) in entries {
            self.current = value;
            state = consumer(state, key, self)?;
        }
        self.current = Value::Null;
        Ok(state)
    }

    fn read_boolean(&mut self, _schema: &dyn Schema) -> Result<bool, Self::Error> {
        match self.current()? {
            Value::Bool(value) => Ok(*value),
            other => Err(unexpected("boolean", other)),
        }
    }

    fn read_integer(&mut self, _schema: &dyn Schema) -> Result<i32, Self::Error> {
        let value = self.read_i64("integer")?;
        i32::try_from(value).map_err(|_| JsonDeserializerError::NumberOutOfRange(value.to_string()))
    }

    fn read_long(&mut self, _schema: &dyn Schema) -> Result<i64, Self::Error> {
        self.read_i64("long")
    }

    fn read_double(&mut self, _schema: &dyn Schema) -> Result<f64, Self::Error> {
        match self.current()? {
            Value::Number(number) => number
                .as_f64()
                .ok_or_else(|| JsonDeserializerError::NumberOutOfRange(number.to_string())),
            Value::String(name) => match name.as_str() {
                "NaN" => Ok(f64::NAN),
                "Infinity" => Ok(f64::INFINITY),
                "-Infinity" => Ok(f64::NEG_INFINITY),
                _ => Err(unexpected("double", &self.current)),
            },
            other => Err(unexpected("double", other)),
        }
    }

    fn read_string(&mut self, _schema: &dyn Schema) -> Result<String, Self::Error> {
        match self.take_current()? {
            Value::String(value) => Ok(value),
            other => {
                let err = unexpected("string", &other);
                self.current = other;
                Err(err)
            }
        }
    }

    fn read_timestamp(&mut self, schema: &dyn Schema) -> Result<DateTime, Self::Error> {
        let invalid = |err: iot_model_types::date_time::DateTimeParseError| {
            JsonDeserializerError::InvalidTimestamp(err.to_string())
        };
        match self.current()? {
            Value::Number(number) => {
                DateTime::from_str(&number.to_string(), TimestampFormat::EpochSeconds)
                    .map_err(invalid)
            }
            Value::String(text) => {
                DateTime::from_str(text, self.settings.timestamp_format(schema)).map_err(invalid)
            }
            other => Err(unexpected("timestamp", other)),
        }
    }

    fn is_null(&self) -> bool {
        self.parse_error.is_none() && self.current.is_null()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iot_model_schema::prelude::*;
    use iot_model_schema::{MemberSchema, StructureSchema};
    use pretty_assertions::assert_eq;

    fn deserializer(input: &str) -> JsonDeserializer {
        JsonDeserializer::new(input.as_bytes(), JsonCodecSettings::default())
    }

    #[test]
    fn test_simple_values() {
        assert!(deserializer("true").read_boolean(&BOOLEAN).unwrap());
        assert_eq!(deserializer("-7").read_integer(&INTEGER).unwrap(), -7);
        assert_eq!(
            deserializer("9007199254740993").read_long(&LONG).unwrap(),
            9_007_199_254_740_993
        );
        assert_eq!(deserializer("2").read_double(&DOUBLE).unwrap(), 2.0);
        assert!(deserializer(r#""NaN""#).read_double(&DOUBLE).unwrap().is_nan());
        assert_eq!(
            deserializer(r#""-Infinity""#).read_double(&DOUBLE).unwrap(),
            f64::NEG_INFINITY
        );
        assert_eq!(
            deserializer(r#""a\nb""#).read_string(&STRING).unwrap(),
            "a\nb"
        );
    }

    #[test]
    fn test_type_and_range_errors() {
        let err = deserializer("4294967296").read_integer(&INTEGER).unwrap_err();
        assert!(matches!(err, JsonDeserializerError::NumberOutOfRange(_)), "{err}");

        let err = deserializer("1.5").read_long(&LONG).unwrap_err();
        assert!(matches!(err, JsonDeserializerError::NumberOutOfRange(_)), "{err}");

        let err = deserializer(r#""x""#).read_boolean(&BOOLEAN).unwrap_err();
        assert_eq!(err.to_string(), "expected boolean, found string");

        let err = deserializer("{").read_string(&STRING).unwrap_err();
        assert!(matches!(err, JsonDeserializerError::ParseError(_)), "{err}");
    }

    #[test]
    fn test_timestamps() {
        let schema = StructureSchema::builder("test#Times")
            .member(MemberSchema::timestamp("rfc").timestamp_format(TimestampFormat::DateTime))
            .build()
            .unwrap();
        let expected = DateTime::from_millis(1_576_540_098_123);
        assert_eq!(
            deserializer("1576540098.123").read_timestamp(&TIMESTAMP).unwrap(),
            expected
        );
        assert_eq!(
            deserializer(r#""2019-12-16T23:48:18.123Z""#)
                .read_timestamp(schema.get_member("rfc").unwrap())
                .unwrap(),
            expected
        );
        let err = deserializer(r#""yesterday""#)
            .read_timestamp(&TIMESTAMP)
            .unwrap_err();
        assert!(matches!(err, JsonDeserializerError::InvalidTimestamp(_)), "{err}");
    }

    #[test]
    fn test_epoch_seconds_keep_every_digit() {
        assert_eq!(
            deserializer("4611686018427387.904").read_timestamp(&TIMESTAMP).unwrap(),
            DateTime::from_millis(1 << 62)
        );
        assert_eq!(
            deserializer("-9223372036854775.808").read_timestamp(&TIMESTAMP).unwrap(),
            DateTime::from_millis(i64::MIN)
        );
        let err = deserializer("9223372036854775.808")
            .read_timestamp(&TIMESTAMP)
            .unwrap_err();
        assert!(matches!(err, JsonDeserializerError::InvalidTimestamp(_)), "{err}");
    }

    #[test]
    fn test_read_struct_visits_known_members() {
        let schema = StructureSchema::builder("test#Thing")
            .member(MemberSchema::string("name"))
            .member(MemberSchema::list("ids", MemberSchema::integer("id")))
            .member(MemberSchema::map("tags", MemberSchema::string("tag")))
            .build()
            .unwrap();
        let input = r#"{"name":"n","ids":[1,null,3],"tags":{"a":"x"},"other":{"x":1}}"#;
        let mut de = deserializer(input);
        let seen = de
            .read_struct(&schema, Vec::new(), |mut seen, member, de| {
                match member.member_name() {
                    Some("name") => seen.push(de.read_string(member)?),
                    Some("ids") => {
                        let ids = de.read_list(member, Vec::new(), |mut ids, de| {
                            if !de.is_null() {
                                ids.push(de.read_integer(&INTEGER)?.to_string());
                            }
                            Ok(ids)
                        })?;
                        seen.push(ids.join("+"));
                    }
                    Some("tags") => {
                        de.read_map(member, (), |(), key, de| {
                            seen.push(format!("{key}={}", de.read_string(&STRING)?));
                            Ok(())
                        })?;
                    }
                    other => panic!("unexpected member {other:?}"),
                }
                Ok(seen)
            })
            .unwrap();
        assert_eq!(seen, vec!["1+3", "n", "a=x"]);
    }

    #[test]
    fn test_unknown_members_can_be_rejected() {
        let schema = StructureSchema::builder("test#Thing")
            .member(MemberSchema::string("name"))
            .build()
            .unwrap();
        let settings = JsonCodecSettings {
            allow_unknown_members: false,
            ..Default::default()
        };
        let mut de = JsonDeserializer::new(br#"{"other":1}"#, settings);
        let err = de
            .read_struct(&schema, (), |(), _, _| Ok(()))
            .unwrap_err();
        assert_eq!(err.to_string(), "`test#Thing` has no member named `other`");
    }
}
