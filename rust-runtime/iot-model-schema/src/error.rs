/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use thiserror::Error;

/// Errors raised while defining schemas or looking them up in a
/// [`SchemaRegistry`](crate::SchemaRegistry).
#[derive(Debug, Error)]
pub enum SchemaError {
    /// A type with the same name is already registered.
    #[error("type `{0}` is already registered")]
    DuplicateType(String),

    /// No type with this name is registered.
    #[error("type `{0}` is not registered")]
    UnknownType(String),

    /// A member's pattern failed to compile.
    #[error("member `{member}` has an invalid pattern `{pattern}`")]
    InvalidPattern {
        /// Shape ID of the member.
        member: String,
        /// The pattern as written.
        pattern: String,
        /// The regex compilation error.
        #[source]
        source: regex::Error,
    },

    /// A constraint does not apply to the member's kind, or its bounds are inverted.
    #[error("member `{member}` has an invalid constraint: {reason}")]
    InvalidConstraint {
        /// Shape ID of the member.
        member: String,
        /// What is wrong with the constraint.
        reason: String,
    },

    /// Two members of one structure share a name.
    #[error("structure `{structure}` defines member `{member}` more than once")]
    DuplicateMember {
        /// Shape ID of the structure.
        structure: String,
        /// The repeated member name.
        member: String,
    },

    /// A nested-model member targets a type that is not registered.
    #[error("member `{member}` targets `{target}`, which is not registered")]
    UnresolvedTarget {
        /// Shape ID of the member.
        member: String,
        /// Shape ID of the missing target.
        target: String,
    },

    /// A length or range constraint could not be parsed from its `min - max` notation.
    #[error("malformed constraint `{0}`: expected `min - max` with at least one bound")]
    MalformedConstraint(String),
}
