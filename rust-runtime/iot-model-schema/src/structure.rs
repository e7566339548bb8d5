/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::traits::{ErrorFault, ErrorTrait, HttpTrait};
use crate::{MemberBuilder, MemberSchema, Schema, SchemaError, ShapeId, ShapeType, TraitMap};
use std::collections::HashMap;

/// Schema of a request, result or nested model type: an ordered set of field descriptors.
#[derive(Debug)]
pub struct StructureSchema {
    id: ShapeId,
    members: Vec<MemberSchema>,
    by_name: HashMap<String, usize>,
    traits: TraitMap,
}

impl StructureSchema {
    /// Starts defining the structure `id`.
    ///
    /// # Examples
    /// ```
    /// use iot_model_schema::traits::LengthTrait;
    /// use iot_model_schema::{MemberSchema, StructureSchema};
    ///
    /// let schema = StructureSchema::builder("com.amazonaws.iot#Tag")
    ///     .member(MemberSchema::string("Key").required().length(LengthTrait::between(1, 128)))
    ///     .member(MemberSchema::string("Value").length(LengthTrait::at_most(256)))
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(schema.type_name(), "Tag");
    /// assert_eq!(schema.member_schemas().len(), 2);
    /// ```
    pub fn builder(id: impl Into<ShapeId>) -> StructureSchemaBuilder {
        StructureSchemaBuilder {
            id: id.into(),
            members: Vec::new(),
            http: None,
            error: None,
        }
    }

    /// The short type name, e.g. `CreateThingRequest`.
    pub fn type_name(&self) -> &str {
        self.id.shape_name()
    }

    /// Members in declaration order.
    pub fn member_schemas(&self) -> &[MemberSchema] {
        &self.members
    }

    /// Looks up a member by name.
    pub fn get_member(&self, name: &str) -> Option<&MemberSchema> {
        self.by_name.get(name).map(|&index| &self.members[index])
    }

    /// HTTP routing metadata, if this is a request type.
    pub fn http(&self) -> Option<&HttpTrait> {
        self.traits.get_as()
    }

    /// Fault of a service error type, or `None` for any other type.
    pub fn error(&self) -> Option<ErrorFault> {
        self.traits.get_as::<ErrorTrait>().map(|error| error.0)
    }
}

impl Schema for StructureSchema {
    fn shape_id(&self) -> &ShapeId {
        &self.id
    }

    fn shape_type(&self) -> ShapeType {
        ShapeType::Structure
    }

    fn traits(&self) -> &TraitMap {
        &self.traits
    }

    fn member_schema(&self, name: &str) -> Option<&dyn Schema> {
        self.get_member(name).map(|member| member as &dyn Schema)
    }

    fn member_schema_by_index(&self, index: usize) -> Option<&dyn Schema> {
        self.members.get(index).map(|member| member as &dyn Schema)
    }

    fn members(&self) -> Box<dyn Iterator<Item = &dyn Schema> + '_> {
        Box::new(self.members.iter().map(|member| member as &dyn Schema))
    }
}

/// Builder for [`StructureSchema`].
#[derive(Debug)]
#[must_use]
pub struct StructureSchemaBuilder {
    id: ShapeId,
    members: Vec<MemberBuilder>,
    http: Option<HttpTrait>,
    error: Option<ErrorTrait>,
}

impl StructureSchemaBuilder {
    /// Appends a member. Declaration order is preserved.
    pub fn member(mut self, member: MemberBuilder) -> Self {
        self.members.push(member);
        self
    }

    /// Attaches HTTP routing metadata.
    pub fn http(mut self, method: impl Into<String>, uri: impl Into<String>) -> Self {
        self.http = Some(HttpTrait::new(method, uri));
        self
    }

    /// Marks the structure as a service error.
    pub fn error(mut self, fault: ErrorFault) -> Self {
        self.error = Some(ErrorTrait(fault));
        self
    }

    /// Builds the schema, compiling patterns and checking each constraint against its member.
    pub fn build(self) -> Result<StructureSchema, SchemaError> {
        let mut members = Vec::with_capacity(self.members.len());
        let mut by_name = HashMap::with_capacity(self.members.len());
        for (index, member) in self.members.into_iter().enumerate() {
            if by_name.insert(member.name().to_string(), index).is_some() {
                return Err(SchemaError::DuplicateMember {
                    structure: self.id.to_string(),
                    member: member.name().to_string(),
                });
            }
            members.push(member.build(&self.id, index)?);
        }
        let mut traits = TraitMap::new();
        if let Some(http) = self.http {
            traits.insert(Box::new(http));
        }
        if let Some(error) = self.error {
            traits.insert(Box::new(error));
        }
        Ok(StructureSchema {
            id: self.id,
            members,
            by_name,
            traits,
        })
    }
}
