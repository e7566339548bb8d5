/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::fmt;

/// Enumeration of the shape types a model field can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeType {
    // Simple types
    /// Boolean type
    Boolean,
    /// 32-bit signed integer
    Integer,
    /// 64-bit signed integer
    Long,
    /// 64-bit floating point
    Double,
    /// UTF-8 string
    String,
    /// String restricted to a closed set of values
    Enum,
    /// Timestamp
    Timestamp,

    // Aggregate types
    /// List type
    List,
    /// Map type with string keys
    Map,
    /// Structure type
    Structure,
}

impl ShapeType {
    /// Returns true if this is a simple type.
    #[inline]
    pub fn is_simple(&self) -> bool {
        matches!(
            self,
            Self::Boolean
                | Self::Integer
                | Self::Long
                | Self::Double
                | Self::String
                | Self::Enum
                | Self::Timestamp
        )
    }

    /// Returns true if this is an aggregate type.
    #[inline]
    pub fn is_aggregate(&self) -> bool {
        matches!(self, Self::List | Self::Map | Self::Structure)
    }

    /// Returns true if values of this type are numbers.
    #[inline]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Integer | Self::Long | Self::Double)
    }

    /// Returns the lowercase name of this shape type.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Long => "long",
            Self::Double => "double",
            Self::String => "string",
            Self::Enum => "enum",
            Self::Timestamp => "timestamp",
            Self::List => "list",
            Self::Map => "map",
            Self::Structure => "structure",
        }
    }
}

impl fmt::Display for ShapeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::ShapeType;

    #[test]
    fn test_shape_type_simple() {
        assert!(ShapeType::String.is_simple());
        assert!(ShapeType::Enum.is_simple());
        assert!(ShapeType::Timestamp.is_simple());
        assert!(!ShapeType::Structure.is_simple());
        assert!(!ShapeType::List.is_simple());
    }

    #[test]
    fn test_shape_type_aggregate() {
        assert!(ShapeType::Structure.is_aggregate());
        assert!(ShapeType::List.is_aggregate());
        assert!(ShapeType::Map.is_aggregate());
        assert!(!ShapeType::String.is_aggregate());
    }

    #[test]
    fn test_shape_type_numeric() {
        assert!(ShapeType::Integer.is_numeric());
        assert!(ShapeType::Double.is_numeric());
        assert!(!ShapeType::Boolean.is_numeric());
        assert_eq!(ShapeType::Long.to_string(), "long");
    }
}
