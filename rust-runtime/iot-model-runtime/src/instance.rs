/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::{ModelBuilder, ModelError, Value};
use iot_model_schema::{MemberSchema, Schema, ShapeId, ShapeType, StructureSchema};
use iot_model_types::DateTime;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// One request, result or nested-model value.
///
/// Every field starts absent. Setters store a value after checking it against the member's
/// kind; constraints are only checked by [`validate`](ModelInstance::validate).
///
/// ```
/// # use std::sync::Arc;
/// # use iot_model_schema::{MemberSchema, StructureSchema};
/// # use iot_model_runtime::ModelInstance;
/// let schema = StructureSchema::builder("com.example#Thing")
///     .member(MemberSchema::string("thingName"))
///     .build()
///     .unwrap();
/// let mut thing = ModelInstance::new(Arc::new(schema));
/// thing.set("thingName", "sensor-01").unwrap();
/// assert_eq!(thing.get_str("thingName"), Some("sensor-01"));
/// assert_eq!(thing.to_string(), "{ThingName: sensor-01}");
/// ```
#[derive(Clone)]
pub struct ModelInstance {
    schema: Arc<StructureSchema>,
    fields: Vec<Option<Value>>,
}

impl ModelInstance {
    /// Creates an instance with every field absent.
    pub fn new(schema: Arc<StructureSchema>) -> Self {
        let fields = vec![None; schema.member_schemas().len()];
        Self { schema, fields }
    }

    /// Creates a builder for an instance of `schema`.
    pub fn builder(schema: Arc<StructureSchema>) -> ModelBuilder {
        ModelBuilder::new(Self::new(schema))
    }

    /// The schema this instance is bound to.
    pub fn schema(&self) -> &Arc<StructureSchema> {
        &self.schema
    }

    /// Shape ID of the instance's type.
    pub fn shape_id(&self) -> &ShapeId {
        self.schema.shape_id()
    }

    /// Short name of the instance's type.
    pub fn type_name(&self) -> &str {
        self.schema.type_name()
    }

    fn member(&self, name: &str) -> Result<&MemberSchema, ModelError> {
        self.schema
            .get_member(name)
            .ok_or_else(|| ModelError::UnknownMember {
                type_name: self.type_name().to_string(),
                member: name.to_string(),
            })
    }

    /// Sets a field, replacing any previous value.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), ModelError> {
        let member = self.member(name)?;
        let index = member.index();
        let value = value.into().conform(member, name)?;
        self.fields[index] = Some(value);
        Ok(())
    }

    /// Sets a field and returns the instance, for chaining.
    pub fn with(&mut self, name: &str, value: impl Into<Value>) -> Result<&mut Self, ModelError> {
        self.set(name, value)?;
        Ok(self)
    }

    /// Makes a field absent.
    pub fn unset(&mut self, name: &str) -> Result<(), ModelError> {
        let index = self.member(name)?.index();
        self.fields[index] = None;
        Ok(())
    }

    /// Appends one element to a list field, creating the list if the field is absent.
    pub fn append(&mut self, name: &str, element: impl Into<Value>) -> Result<(), ModelError> {
        self.append_all(name, [element])
    }

    /// Appends elements to a list field, creating the list if the field is absent.
    ///
    /// Nothing is appended if any element has the wrong kind.
    pub fn append_all<I, V>(&mut self, name: &str, elements: I) -> Result<(), ModelError>
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let member = self.member(name)?;
        if member.shape_type() != ShapeType::List {
            return Err(ModelError::NotAList {
                member: name.to_string(),
            });
        }
        let index = member.index();
        let element_schema = member.element().unwrap_or(member);
        let start = self.fields[index]
            .as_ref()
            .and_then(Value::as_list)
            .map_or(0, <[Value]>::len);
        let elements = elements
            .into_iter()
            .enumerate()
            .map(|(offset, element)| {
                element
                    .into()
                    .conform(element_schema, &format!("{name}[{}]", start + offset))
            })
            .collect::<Result<Vec<_>, _>>()?;

        match &mut self.fields[index] {
            Some(Value::List(existing)) => existing.extend(elements),
            slot => *slot = Some(Value::List(elements)),
        }
        Ok(())
    }

    /// Adds one entry to a map field, creating the map if the field is absent.
    ///
    /// Fails with [`ModelError::DuplicateKey`] if the key is already present; the existing
    /// entry is left unchanged.
    pub fn put_entry(
        &mut self,
        name: &str,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), ModelError> {
        let member = self.member(name)?;
        if member.shape_type() != ShapeType::Map {
            return Err(ModelError::NotAMap {
                member: name.to_string(),
            });
        }
        let index = member.index();
        let key = key.into();
        let value = value
            .into()
            .conform(member.element().unwrap_or(member), &format!("{name}[{key}]"))?;

        match &mut self.fields[index] {
            Some(Value::Map(entries)) => {
                if entries.contains_key(&key) {
                    return Err(ModelError::DuplicateKey {
                        member: name.to_string(),
                        key,
                    });
                }
                entries.insert(key, value);
            }
            slot => *slot = Some(Value::Map(BTreeMap::from([(key, value)]))),
        }
        Ok(())
    }

    /// Clears a map field. The field becomes absent, not empty.
    pub fn clear_entries(&mut self, name: &str) -> Result<(), ModelError> {
        let member = self.member(name)?;
        if member.shape_type() != ShapeType::Map {
            return Err(ModelError::NotAMap {
                member: name.to_string(),
            });
        }
        let index = member.index();
        self.fields[index] = None;
        Ok(())
    }

    /// Returns the value of a field, or `None` if it is absent or unknown.
    pub fn get(&self, name: &str) -> Option<&Value> {
        let member = self.schema.get_member(name)?;
        self.fields[member.index()].as_ref()
    }

    /// Returns the value of the member at `index`.
    pub(crate) fn get_by_index(&self, index: usize) -> Option<&Value> {
        self.fields.get(index).and_then(Option::as_ref)
    }

    /// Returns true if the field holds a value.
    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates over present fields in declaration order.
    pub fn present_fields(&self) -> impl Iterator<Item = (&MemberSchema, &Value)> {
        self.schema
            .member_schemas()
            .iter()
            .zip(&self.fields)
            .filter_map(|(member, value)| value.as_ref().map(|value| (member, value)))
    }

    /// Makes absent every field whose member does not satisfy `keep`.
    pub(crate) fn retain_fields(&mut self, mut keep: impl FnMut(&MemberSchema) -> bool) {
        for (member, field) in self.schema.member_schemas().iter().zip(&mut self.fields) {
            if !keep(member) {
                *field = None;
            }
        }
    }

    pub(crate) fn fields(&self) -> &[Option<Value>] {
        &self.fields
    }

    /// Returns a string or enum field.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns an integer field.
    pub fn get_i32(&self, name: &str) -> Option<i32> {
        self.get(name).and_then(Value::as_i32)
    }

    /// Returns a long field.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Returns a double field.
    pub fn get_f64(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    /// Returns a boolean field.
    pub fn get_bool(&self, name: &str) -> Option<bool> {
        self.get(name).and_then(Value::as_bool)
    }

    /// Returns a timestamp field.
    pub fn get_timestamp(&self, name: &str) -> Option<DateTime> {
        self.get(name).and_then(Value::as_timestamp)
    }

    /// Returns a list field.
    pub fn get_list(&self, name: &str) -> Option<&[Value]> {
        self.get(name).and_then(Value::as_list)
    }

    /// Returns a map field.
    pub fn get_map(&self, name: &str) -> Option<&BTreeMap<String, Value>> {
        self.get(name).and_then(Value::as_map)
    }

    /// Returns a nested-model field.
    pub fn get_structure(&self, name: &str) -> Option<&ModelInstance> {
        self.get(name).and_then(Value::as_structure)
    }
}

impl fmt::Debug for ModelInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut debug = f.debug_struct(self.type_name());
        for (member, value) in self.present_fields() {
            debug.field(member.name(), value);
        }
        debug.finish_non_exhaustive()
    }
}

fn capitalized(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Renders present fields as `{MemberName: value, ...}` in declaration order.
impl fmt::Display for ModelInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (position, (member, value)) in self.present_fields().enumerate() {
            if position > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}: {value}", capitalized(member.name()))?;
        }
        f.write_str("}")
    }
}
