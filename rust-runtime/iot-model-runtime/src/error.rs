/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use crate::Violation;
use iot_model_schema::{SchemaError, ShapeType};
use std::error::Error as StdError;
use thiserror::Error;

type BoxError = Box<dyn StdError + Send + Sync + 'static>;

/// Structural errors raised while mutating a [`ModelInstance`](crate::ModelInstance).
///
/// Constraint violations are never reported here; see [`Violation`].
#[derive(Debug, Error)]
pub enum ModelError {
    /// The structure has no member with this name.
    #[error("`{type_name}` has no member named `{member}`")]
    UnknownMember {
        /// Short type name of the structure.
        type_name: String,
        /// The requested member name.
        member: String,
    },

    /// The value's kind does not match the member's kind.
    #[error("member `{member}` expects a {expected} value but got {found}")]
    KindMismatch {
        /// Path of the offending value, e.g. `tags[0]`.
        member: String,
        /// The kind the member holds.
        expected: ShapeType,
        /// Description of the supplied value.
        found: String,
    },

    /// A map entry with this key already exists. The existing entry is left unchanged.
    #[error("member `{member}` already has an entry for key `{key}`")]
    DuplicateKey {
        /// The map member.
        member: String,
        /// The repeated key.
        key: String,
    },

    /// A list operation was applied to a member that is not a list.
    #[error("member `{member}` is not a list")]
    NotAList {
        /// The member name.
        member: String,
    },

    /// A map operation was applied to a member that is not a map.
    #[error("member `{member}` is not a map")]
    NotAMap {
        /// The member name.
        member: String,
    },

    /// The type name could not be resolved against the registry.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// Returned by [`ModelInstance::validate`](crate::ModelInstance::validate) when at least one
/// constraint is violated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("`{type_name}` failed validation with {} violation(s)", .violations.len())]
pub struct ValidationFailed {
    type_name: String,
    violations: Vec<Violation>,
}

impl ValidationFailed {
    pub(crate) fn new(type_name: impl Into<String>, violations: Vec<Violation>) -> Self {
        Self {
            type_name: type_name.into(),
            violations,
        }
    }

    /// Short name of the type that failed validation.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The violations, in member declaration order.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes the error, returning the violations.
    pub fn into_violations(self) -> Vec<Violation> {
        self.violations
    }
}

/// Failure to encode a model instance.
#[derive(Debug, Error)]
#[error("failed to encode `{type_name}`")]
pub struct EncodeError {
    type_name: String,
    #[source]
    source: BoxError,
}

impl EncodeError {
    pub(crate) fn new(type_name: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            type_name: type_name.into(),
            source: source.into(),
        }
    }
}

/// Failure to decode a model instance.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The requested type, or a nested type, is not registered.
    #[error("cannot decode: {0}")]
    Schema(#[from] SchemaError),

    /// A decoded value could not be stored in the instance.
    #[error("decoded value was rejected")]
    Model(#[from] ModelError),

    /// The codec failed to read the input.
    #[error("failed to read input")]
    Codec(#[source] BoxError),

    /// A list or map member has no element schema.
    #[error("member `{0}` has no element schema")]
    MissingElementSchema(String),
}

impl DecodeError {
    pub(crate) fn codec(source: impl Into<BoxError>) -> Self {
        Self::Codec(source.into())
    }
}

/// Failure to bind a model instance to an HTTP request.
#[derive(Debug, Error)]
pub enum BindingError {
    /// The structure carries no HTTP routing metadata.
    #[error("`{0}` has no HTTP binding")]
    MissingHttpTrait(String),

    /// A URI label has no value.
    #[error("URI label `{0}` is absent")]
    MissingLabel(String),

    /// A URI label is present but empty.
    #[error("URI label `{0}` is empty")]
    EmptyLabel(String),

    /// The URI template references a member that is not label-bound.
    #[error("URI template references `{0}`, which is not a label member")]
    UnboundLabel(String),

    /// The URI template is malformed.
    #[error("invalid URI template `{0}`")]
    InvalidTemplate(String),

    /// A bound value could not be written as a string.
    #[error("failed to serialize member `{member}`")]
    Serialize {
        /// The member being serialized.
        member: String,
        /// The underlying error.
        #[source]
        source: BoxError,
    },
}
