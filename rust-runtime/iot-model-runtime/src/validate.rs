/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Constraint validation.
//!
//! Members are checked in declaration order. For each member:
//!
//! 1. An absent required member yields [`Rule::RequiredMissing`] and nothing else.
//! 2. A present string, list or map is checked against its length bounds. String length
//!    counts Unicode scalar values.
//! 3. A string that passed its length check is matched against its pattern.
//! 4. An enum value must be one of the allowed values (case-sensitive).
//! 5. A numeric value is checked against its range.
//! 6. Nested models, list elements and map values are checked recursively, with paths
//!    `parent.child`, `parent[index]` and `parent[key]`.

use crate::{ModelBuilder, ModelError, ModelInstance, ValidationFailed, Value};
use iot_model_schema::{MemberSchema, SchemaError, SchemaRegistry};
use std::collections::BTreeMap;
use std::fmt;

/// The constraint a [`Violation`] breaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// A required member is absent.
    RequiredMissing,
    /// A string, list or map is outside its length bounds.
    LengthOutOfRange,
    /// A string does not match its pattern.
    PatternMismatch,
    /// An enum value is not one of the allowed values.
    EnumInvalid,
    /// A number is outside its range.
    RangeOutOfBounds,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rule::RequiredMissing => "required member missing",
            Rule::LengthOutOfRange => "length out of range",
            Rule::PatternMismatch => "pattern mismatch",
            Rule::EnumInvalid => "invalid enum value",
            Rule::RangeOutOfBounds => "value out of range",
        })
    }
}

/// One failed constraint.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Violation {
    field: String,
    rule: Rule,
    details: String,
}

impl Violation {
    fn new(field: &str, rule: Rule, details: String) -> Self {
        Self {
            field: field.to_string(),
            rule,
            details,
        }
    }

    /// Path of the offending field, e.g. `target.findingIds[0]`.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The broken rule.
    pub fn rule(&self) -> Rule {
        self.rule
    }

    /// Human-readable description of the failure.
    pub fn details(&self) -> &str {
        &self.details
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.field, self.rule, self.details)
    }
}

fn check_instance(instance: &ModelInstance, prefix: &str, out: &mut Vec<Violation>) {
    for member in instance.schema().member_schemas() {
        let path = if prefix.is_empty() {
            member.name().to_string()
        } else {
            format!("{prefix}.{}", member.name())
        };
        match instance.get_by_index(member.index()) {
            Some(value) => check_value(member, value, &path, out),
            None if member.is_required() => out.push(Violation::new(
                &path,
                Rule::RequiredMissing,
                "member is required".to_string(),
            )),
            None => {}
        }
    }
}

fn check_value(member: &MemberSchema, value: &Value, path: &str, out: &mut Vec<Violation>) {
    let mut length_ok = true;
    if let Some(length) = member.length() {
        let len = match value {
            Value::String(value) => Some(value.chars().count()),
            Value::List(elements) => Some(elements.len()),
            Value::Map(entries) => Some(entries.len()),
            _ => None,
        };
        if let Some(len) = len {
            if !length.contains(len) {
                length_ok = false;
                out.push(Violation::new(
                    path,
                    Rule::LengthOutOfRange,
                    format!("length {len} is outside `{length}`"),
                ));
            }
        }
    }

    if let Value::String(text) = value {
        if let Some(pattern) = member.pattern() {
            if length_ok && !pattern.is_match(text) {
                out.push(Violation::new(
                    path,
                    Rule::PatternMismatch,
                    format!("value does not match `{}`", pattern.pattern()),
                ));
            }
        }
        if let Some(allowed) = member.enum_values() {
            if !allowed.contains(text) {
                out.push(Violation::new(
                    path,
                    Rule::EnumInvalid,
                    format!("`{text}` is not one of {:?}", allowed.values()),
                ));
            }
        }
    }

    if let Some(range) = member.range() {
        let number = match value {
            Value::Integer(value) => Some(f64::from(*value)),
            Value::Long(value) => Some(*value as f64),
            Value::Double(value) => Some(*value),
            _ => None,
        };
        if let Some(number) = number {
            if !range.contains(number) {
                out.push(Violation::new(
                    path,
                    Rule::RangeOutOfBounds,
                    format!("{number} is outside `{range}`"),
                ));
            }
        }
    }

    match value {
        Value::Structure(nested) => check_instance(nested, path, out),
        Value::List(elements) => {
            if let Some(element) = member.element() {
                for (index, value) in elements.iter().enumerate() {
                    check_value(element, value, &format!("{path}[{index}]"), out);
                }
            }
        }
        Value::Map(entries) => {
            if let Some(element) = member.element() {
                for (key, value) in entries {
                    check_value(element, value, &format!("{path}[{key}]"), out);
                }
            }
        }
        _ => {}
    }
}

impl ModelInstance {
    /// Checks every constraint and returns the violations, in member declaration order.
    pub fn violations(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        check_instance(self, "", &mut violations);
        tracing::trace!(
            type_name = self.type_name(),
            violations = violations.len(),
            "validated model instance"
        );
        violations
    }

    /// Checks every constraint, failing if any is violated.
    pub fn validate(&self) -> Result<(), ValidationFailed> {
        let violations = self.violations();
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationFailed::new(self.type_name(), violations))
        }
    }
}

/// Instance construction and validation by type name.
pub trait RegistryExt {
    /// Creates an empty instance of a registered type.
    fn new_instance(&self, type_name: &str) -> Result<ModelInstance, SchemaError>;

    /// Creates a builder for a registered type.
    fn builder(&self, type_name: &str) -> Result<ModelBuilder, SchemaError>;

    /// Validates a set of field values against a registered type.
    ///
    /// Fields missing from `fields` are absent. Structural errors (unknown type, unknown
    /// member, wrong kind) are returned as errors; constraint failures as violations.
    fn validate(
        &self,
        type_name: &str,
        fields: &BTreeMap<String, Value>,
    ) -> Result<Vec<Violation>, ModelError>;
}

impl RegistryExt for SchemaRegistry {
    fn new_instance(&self, type_name: &str) -> Result<ModelInstance, SchemaError> {
        self.lookup(type_name).map(ModelInstance::new)
    }

    fn builder(&self, type_name: &str) -> Result<ModelBuilder, SchemaError> {
        self.lookup(type_name).map(ModelInstance::builder)
    }

    fn validate(
        &self,
        type_name: &str,
        fields: &BTreeMap<String, Value>,
    ) -> Result<Vec<Violation>, ModelError> {
        let mut instance = self.new_instance(type_name)?;
        for (name, value) in fields {
            instance.set(name, value.clone())?;
        }
        Ok(instance.violations())
    }
}
