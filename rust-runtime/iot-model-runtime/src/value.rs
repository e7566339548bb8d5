/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::{ModelError, ModelInstance};
use iot_model_schema::{MemberSchema, Schema, ShapeType};
use iot_model_types::DateTime;
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// A present field value.
///
/// Absence is represented by the field not holding a `Value` at all. Enum members hold
/// [`Value::String`].
#[derive(Debug, Clone)]
pub enum Value {
    /// A string or enum value.
    String(String),
    /// A 32-bit integer.
    Integer(i32),
    /// A 64-bit integer.
    Long(i64),
    /// A double.
    Double(f64),
    /// A boolean.
    Boolean(bool),
    /// A timestamp.
    Timestamp(DateTime),
    /// An ordered list.
    List(Vec<Value>),
    /// A map keyed by string.
    Map(BTreeMap<String, Value>),
    /// A nested model instance.
    Structure(ModelInstance),
}

impl Value {
    /// Returns the string if this is a `String`.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the value if this is an `Integer`.
    pub fn as_i32(&self) -> Option<i32> {
        match self {
            Self::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value if this is a `Long`.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Long(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value if this is a `Double`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Double(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value if this is a `Boolean`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the value if this is a `Timestamp`.
    pub fn as_timestamp(&self) -> Option<DateTime> {
        match self {
            Self::Timestamp(value) => Some(*value),
            _ => None,
        }
    }

    /// Returns the elements if this is a `List`.
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(elements) => Some(elements),
            _ => None,
        }
    }

    /// Returns the entries if this is a `Map`.
    pub fn as_map(&self) -> Option<&BTreeMap<String, Value>> {
        match self {
            Self::Map(entries) => Some(entries),
            _ => None,
        }
    }

    /// Returns the instance if this is a `Structure`.
    pub fn as_structure(&self) -> Option<&ModelInstance> {
        match self {
            Self::Structure(instance) => Some(instance),
            _ => None,
        }
    }

    /// Short description of the value's kind, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Integer(_) => "integer",
            Self::Long(_) => "long",
            Self::Double(_) => "double",
            Self::Boolean(_) => "boolean",
            Self::Timestamp(_) => "timestamp",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Structure(_) => "structure",
        }
    }

    /// Checks that this value matches the kind of `member`, recursing into list elements and
    /// map values. Integers widen to longs and doubles.
    pub(crate) fn conform(self, member: &MemberSchema, path: &str) -> Result<Value, ModelError> {
        let expected = member.shape_type();
        let mismatch = |found: String| ModelError::KindMismatch {
            member: path.to_string(),
            expected,
            found,
        };
        match (expected, self) {
            (ShapeType::String | ShapeType::Enum, value @ Value::String(_))
            | (ShapeType::Integer, value @ Value::Integer(_))
            | (ShapeType::Long, value @ Value::Long(_))
            | (ShapeType::Double, value @ Value::Double(_))
            | (ShapeType::Boolean, value @ Value::Boolean(_))
            | (ShapeType::Timestamp, value @ Value::Timestamp(_)) => Ok(value),
            (ShapeType::Long, Value::Integer(value)) => Ok(Value::Long(value.into())),
            (ShapeType::Double, Value::Integer(value)) => Ok(Value::Double(value.into())),
            (ShapeType::Structure, Value::Structure(instance)) => {
                match member.target() {
                    Some(target) if target != instance.shape_id() => {
                        Err(mismatch(format!("structure `{}`", instance.shape_id())))
                    }
                    _ => Ok(Value::Structure(instance)),
                }
            }
            (ShapeType::List, Value::List(elements)) => {
                let element = member.element().unwrap_or(member);
                elements
                    .into_iter()
                    .enumerate()
                    .map(|(index, value)| value.conform(element, &format!("{path}[{index}]")))
                    .collect::<Result<_, _>>()
                    .map(Value::List)
            }
            (ShapeType::Map, Value::Map(entries)) => {
                let element = member.element().unwrap_or(member);
                entries
                    .into_iter()
                    .map(|(key, value)| {
                        let value = value.conform(element, &format!("{path}[{key}]"))?;
                        Ok((key, value))
                    })
                    .collect::<Result<_, _>>()
                    .map(Value::Map)
            }
            (_, value) => Err(mismatch(value.kind().to_string())),
        }
    }
}

/// Renders values the way model instances print their fields: strings unquoted, lists as
/// `[a, b]`, maps as `{k=v, ...}`.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Long(value) => write!(f, "{value}"),
            Self::Double(value) => write!(f, "{value}"),
            Self::Boolean(value) => write!(f, "{value}"),
            Self::Timestamp(value) => write!(f, "{value}"),
            Self::List(elements) => {
                f.write_str("[")?;
                for (index, element) in elements.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
            Self::Map(entries) => {
                f.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}={value}")?;
                }
                f.write_str("}")
            }
            Self::Structure(instance) => write!(f, "{instance}"),
        }
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Integer(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Long(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Double(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

impl From<DateTime> for Value {
    fn from(value: DateTime) -> Self {
        Self::Timestamp(value)
    }
}

impl From<ModelInstance> for Value {
    fn from(value: ModelInstance) -> Self {
        Self::Structure(value)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<K: Into<String>, V: Into<Value>> From<BTreeMap<K, V>> for Value {
    fn from(entries: BTreeMap<K, V>) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<Value>> From<HashMap<K, V>> for Value {
    fn from(entries: HashMap<K, V>) -> Self {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
