/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::traits::{
    EnumTrait, HttpHeaderTrait, HttpLabelTrait, HttpQueryTrait, LengthTrait, PatternTrait,
    RangeTrait, RequiredTrait, TimestampFormatTrait,
};
use crate::{prelude, Schema, SchemaError, ShapeId, ShapeType, TimestampFormat, TraitMap};

/// Field descriptor: the schema of one member of a structure.
///
/// A member knows its name, its position within the structure, the kind of value it holds
/// and the constraints attached to it. List and map members also carry the schema of their
/// element (named `member`) or value (named `value`), which may have constraints of its own.
///
/// Members are built through [`MemberBuilder`] and added to a
/// [`StructureSchema`](crate::StructureSchema); they are immutable afterwards.
#[derive(Debug)]
pub struct MemberSchema {
    id: ShapeId,
    name: String,
    index: usize,
    shape_type: ShapeType,
    target: Option<ShapeId>,
    element: Option<Box<MemberSchema>>,
    traits: TraitMap,
}

/// Where a member is placed when its structure is bound to an HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpBinding<'a> {
    /// Substituted into a `{label}` of the URI template.
    Label,
    /// Sent as the named query parameter.
    Query(&'a str),
    /// Sent as the named header.
    Header(&'a str),
    /// Serialized into the request body.
    Body,
}

impl MemberSchema {
    /// A string member.
    pub fn string(name: impl Into<String>) -> MemberBuilder {
        MemberBuilder::new(name, ShapeType::String)
    }

    /// A 32-bit integer member.
    pub fn integer(name: impl Into<String>) -> MemberBuilder {
        MemberBuilder::new(name, ShapeType::Integer)
    }

    /// A 64-bit integer member.
    pub fn long(name: impl Into<String>) -> MemberBuilder {
        MemberBuilder::new(name, ShapeType::Long)
    }

    /// A double member.
    pub fn double(name: impl Into<String>) -> MemberBuilder {
        MemberBuilder::new(name, ShapeType::Double)
    }

    /// A boolean member.
    pub fn boolean(name: impl Into<String>) -> MemberBuilder {
        MemberBuilder::new(name, ShapeType::Boolean)
    }

    /// A timestamp member.
    pub fn timestamp(name: impl Into<String>) -> MemberBuilder {
        MemberBuilder::new(name, ShapeType::Timestamp)
    }

    /// A string member restricted to `values`.
    pub fn enumeration<I, S>(name: impl Into<String>, values: I) -> MemberBuilder
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = MemberBuilder::new(name, ShapeType::Enum);
        builder.enum_values = Some(EnumTrait::new(values));
        builder
    }

    /// A nested-model member holding an instance of the structure `target`.
    pub fn structure(name: impl Into<String>, target: impl Into<ShapeId>) -> MemberBuilder {
        let mut builder = MemberBuilder::new(name, ShapeType::Structure);
        builder.target = Some(target.into());
        builder
    }

    /// A list member. The element builder is renamed to `member`.
    pub fn list(name: impl Into<String>, element: MemberBuilder) -> MemberBuilder {
        let mut builder = MemberBuilder::new(name, ShapeType::List);
        builder.element = Some(Box::new(element.renamed("member")));
        builder
    }

    /// A map member with string keys. The value builder is renamed to `value`.
    pub fn map(name: impl Into<String>, value: MemberBuilder) -> MemberBuilder {
        let mut builder = MemberBuilder::new(name, ShapeType::Map);
        builder.element = Some(Box::new(value.renamed("value")));
        builder
    }

    /// The member name, unique within its structure.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the member in declaration order.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The shape this member targets: the nested structure for nested-model members, the
    /// prelude shape for simple members, `None` for lists and maps.
    pub fn target(&self) -> Option<&ShapeId> {
        match &self.target {
            Some(target) => Some(target),
            None => prelude::schema_for(self.shape_type).map(|schema| schema.shape_id()),
        }
    }

    /// Element schema of a list, or value schema of a map.
    pub fn element(&self) -> Option<&MemberSchema> {
        self.element.as_deref()
    }

    /// Returns true if the member must be present.
    pub fn is_required(&self) -> bool {
        self.traits.get_as::<RequiredTrait>().is_some()
    }

    /// Length constraint, if any.
    pub fn length(&self) -> Option<&LengthTrait> {
        self.traits.get_as()
    }

    /// Pattern constraint, if any.
    pub fn pattern(&self) -> Option<&PatternTrait> {
        self.traits.get_as()
    }

    /// Allowed values of an enum member.
    pub fn enum_values(&self) -> Option<&EnumTrait> {
        self.traits.get_as()
    }

    /// Numeric range constraint, if any.
    pub fn range(&self) -> Option<&RangeTrait> {
        self.traits.get_as()
    }

    /// Timestamp format override, if any.
    pub fn timestamp_format(&self) -> Option<TimestampFormat> {
        self.traits
            .get_as::<TimestampFormatTrait>()
            .map(|format| format.0)
    }

    /// Where this member goes when its structure is bound to an HTTP request.
    pub fn http_binding(&self) -> HttpBinding<'_> {
        if self.traits.get_as::<HttpLabelTrait>().is_some() {
            HttpBinding::Label
        } else if let Some(query) = self.traits.get_as::<HttpQueryTrait>() {
            HttpBinding::Query(query.name())
        } else if let Some(header) = self.traits.get_as::<HttpHeaderTrait>() {
            HttpBinding::Header(header.name())
        } else {
            HttpBinding::Body
        }
    }
}

impl Schema for MemberSchema {
    fn shape_id(&self) -> &ShapeId {
        &self.id
    }

    fn shape_type(&self) -> ShapeType {
        self.shape_type
    }

    fn traits(&self) -> &TraitMap {
        &self.traits
    }

    fn member_name(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn member(&self) -> Option<&dyn Schema> {
        self.element.as_deref().map(|element| element as &dyn Schema)
    }

    fn member_index(&self) -> Option<usize> {
        Some(self.index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Binding {
    Label,
    Query(String),
    Header(String),
}

/// Builder for [`MemberSchema`], created by the kind constructors on `MemberSchema`.
///
/// Constraints are checked against the member's kind when the enclosing structure is built.
#[derive(Debug)]
#[must_use]
pub struct MemberBuilder {
    name: String,
    shape_type: ShapeType,
    target: Option<ShapeId>,
    element: Option<Box<MemberBuilder>>,
    required: bool,
    length: Option<LengthTrait>,
    range: Option<RangeTrait>,
    pattern: Option<String>,
    enum_values: Option<EnumTrait>,
    timestamp_format: Option<TimestampFormat>,
    binding: Option<Binding>,
}

impl MemberBuilder {
    fn new(name: impl Into<String>, shape_type: ShapeType) -> Self {
        Self {
            name: name.into(),
            shape_type,
            target: None,
            element: None,
            required: false,
            length: None,
            range: None,
            pattern: None,
            enum_values: None,
            timestamp_format: None,
            binding: None,
        }
    }

    fn renamed(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// The member name this builder was created with.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Marks the member as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Constrains the length of a string, list or map.
    pub fn length(mut self, length: LengthTrait) -> Self {
        self.length = Some(length);
        self
    }

    /// Constrains the value of a numeric member.
    pub fn range(mut self, range: RangeTrait) -> Self {
        self.range = Some(range);
        self
    }

    /// Requires the whole string value to match `pattern`.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.pattern = Some(pattern.into());
        self
    }

    /// Overrides the codec's default format for a timestamp member.
    pub fn timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.timestamp_format = Some(format);
        self
    }

    /// Binds the member to the URI label of the same name.
    pub fn http_label(mut self) -> Self {
        self.binding = Some(Binding::Label);
        self
    }

    /// Binds the member to the query parameter `name`.
    pub fn http_query(mut self, name: impl Into<String>) -> Self {
        self.binding = Some(Binding::Query(name.into()));
        self
    }

    /// Binds the member to the header `name`.
    pub fn http_header(mut self, name: impl Into<String>) -> Self {
        self.binding = Some(Binding::Header(name.into()));
        self
    }

    pub(crate) fn build(self, parent: &ShapeId, index: usize) -> Result<MemberSchema, SchemaError> {
        let id = parent.with_member(&self.name);
        let invalid = |reason: String| SchemaError::InvalidConstraint {
            member: id.to_string(),
            reason,
        };
        let shape_type = self.shape_type;
        let mut traits = TraitMap::new();

        if self.required {
            traits.insert(Box::new(RequiredTrait));
        }
        if let Some(length) = self.length {
            if !matches!(
                shape_type,
                ShapeType::String | ShapeType::Enum | ShapeType::List | ShapeType::Map
            ) {
                return Err(invalid(format!(
                    "length applies to strings, lists and maps, not {shape_type}"
                )));
            }
            if let (Some(min), Some(max)) = (length.min(), length.max()) {
                if min > max {
                    return Err(invalid(format!("length bounds `{length}` are inverted")));
                }
            }
            traits.insert(Box::new(length));
        }
        if let Some(range) = self.range {
            if !shape_type.is_numeric() {
                return Err(invalid(format!(
                    "range applies to numeric members, not {shape_type}"
                )));
            }
            if let (Some(min), Some(max)) = (range.min(), range.max()) {
                if min > max {
                    return Err(invalid(format!("range bounds `{range}` are inverted")));
                }
            }
            traits.insert(Box::new(range));
        }
        if let Some(pattern) = self.pattern {
            if !matches!(shape_type, ShapeType::String | ShapeType::Enum) {
                return Err(invalid(format!(
                    "pattern applies to strings, not {shape_type}"
                )));
            }
            let compiled =
                PatternTrait::new(pattern.as_str()).map_err(|source| SchemaError::InvalidPattern {
                    member: id.to_string(),
                    pattern,
                    source,
                })?;
            traits.insert(Box::new(compiled));
        }
        if let Some(values) = self.enum_values {
            traits.insert(Box::new(values));
        }
        if let Some(format) = self.timestamp_format {
            if shape_type != ShapeType::Timestamp {
                return Err(invalid(format!(
                    "timestamp format applies to timestamps, not {shape_type}"
                )));
            }
            traits.insert(Box::new(TimestampFormatTrait(format)));
        }

        let element = match self.element {
            Some(element) => Some(Box::new(element.build(&id, 0)?)),
            None => None,
        };

        if let Some(binding) = self.binding {
            let element_is_simple = element
                .as_ref()
                .is_some_and(|element| element.shape_type.is_simple());
            match binding {
                Binding::Label | Binding::Header(_) if !shape_type.is_simple() => {
                    return Err(invalid(format!(
                        "labels and headers must be simple values, not {shape_type}"
                    )));
                }
                Binding::Query(_)
                    if !(shape_type.is_simple()
                        || (shape_type == ShapeType::List && element_is_simple)) =>
                {
                    return Err(invalid(format!(
                        "query parameters must be simple values or lists of them, not {shape_type}"
                    )));
                }
                Binding::Label => traits.insert(Box::new(HttpLabelTrait)),
                Binding::Query(name) => traits.insert(Box::new(HttpQueryTrait::new(name))),
                Binding::Header(name) => traits.insert(Box::new(HttpHeaderTrait::new(name))),
            }
        }

        Ok(MemberSchema {
            id,
            name: self.name,
            index,
            shape_type,
            target: self.target,
            element,
            traits,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::LengthTrait;

    fn parent() -> ShapeId {
        ShapeId::new("com.example#Thing")
    }

    #[test]
    fn builds_constraints_into_traits() {
        let member = MemberSchema::string("thingName")
            .required()
            .length(LengthTrait::between(1, 128))
            .pattern("[a-zA-Z0-9:_-]+")
            .http_label()
            .build(&parent(), 0)
            .unwrap();

        assert_eq!(member.shape_id().as_str(), "com.example#Thing$thingName");
        assert_eq!(member.name(), "thingName");
        assert!(member.is_required());
        assert_eq!(member.length(), Some(&LengthTrait::between(1, 128)));
        assert!(member.pattern().unwrap().is_match("sensor-01"));
        assert_eq!(member.http_binding(), HttpBinding::Label);
        assert_eq!(member.target().map(ShapeId::as_str), Some("smithy.api#String"));
    }

    #[test]
    fn list_and_map_elements_are_named() {
        let list = MemberSchema::list(
            "findingIds",
            MemberSchema::string("id").length(LengthTrait::between(1, 128)),
        )
        .build(&parent(), 1)
        .unwrap();
        let element = list.element().unwrap();
        assert_eq!(element.name(), "member");
        assert_eq!(element.shape_id().as_str(), "com.example#Thing$findingIds$member");
        assert_eq!(element.length(), Some(&LengthTrait::between(1, 128)));
        assert!(list.target().is_none());

        let map = MemberSchema::map("attributes", MemberSchema::string("v"))
            .build(&parent(), 2)
            .unwrap();
        assert_eq!(map.element().unwrap().name(), "value");
        assert_eq!(map.member().and_then(|m| m.member_name()), Some("value"));
    }

    #[test]
    fn rejects_constraints_on_the_wrong_kind() {
        let err = MemberSchema::boolean("merge")
            .length(LengthTrait::at_least(1))
            .build(&parent(), 0)
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidConstraint { .. }), "{err}");

        let err = MemberSchema::string("name")
            .range(RangeTrait::at_least(1.0))
            .build(&parent(), 0)
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidConstraint { .. }), "{err}");

        let err = MemberSchema::structure("payload", "com.example#Payload")
            .http_label()
            .build(&parent(), 0)
            .unwrap_err();
        assert!(matches!(err, SchemaError::InvalidConstraint { .. }), "{err}");

        let err = MemberSchema::string("name")
            .length(LengthTrait::between(5, 1))
            .build(&parent(), 0)
            .unwrap_err();
        assert!(err.to_string().contains("inverted"), "{err}");
    }

    #[test]
    fn rejects_invalid_pattern() {
        let err = MemberSchema::string("name")
            .pattern("[a-z")
            .build(&parent(), 0)
            .unwrap_err();
        match err {
            SchemaError::InvalidPattern {
                member, pattern, ..
            } => {
                assert_eq!(member, "com.example#Thing$name");
                assert_eq!(pattern, "[a-z");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn query_lists_and_headers() {
        let query = MemberSchema::list("statuses", MemberSchema::string("member"))
            .http_query("status")
            .build(&parent(), 0)
            .unwrap();
        assert_eq!(query.http_binding(), HttpBinding::Query("status"));

        let header = MemberSchema::string("token")
            .http_header("x-amz-token")
            .build(&parent(), 1)
            .unwrap();
        assert_eq!(header.http_binding(), HttpBinding::Header("x-amz-token"));

        let body = MemberSchema::integer("count").build(&parent(), 2).unwrap();
        assert_eq!(body.http_binding(), HttpBinding::Body);
        assert_eq!(body.member_index(), Some(2));
    }

    #[test]
    fn enum_members_carry_their_values() {
        let member = MemberSchema::enumeration("targetSelection", ["CONTINUOUS", "SNAPSHOT"])
            .timestamp_format(TimestampFormat::DateTime)
            .build(&parent(), 0);
        assert!(member.is_err());

        let member = MemberSchema::enumeration("targetSelection", ["CONTINUOUS", "SNAPSHOT"])
            .build(&parent(), 0)
            .unwrap();
        assert!(member.enum_values().unwrap().contains("CONTINUOUS"));
        assert_eq!(member.shape_type(), ShapeType::Enum);
    }
}
