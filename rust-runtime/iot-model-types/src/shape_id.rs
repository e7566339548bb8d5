/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use std::borrow::Cow;
use std::fmt;

/// A Shape ID.
///
/// Shape IDs uniquely identify model types and their members.
/// Format: `namespace#ShapeName` or `namespace#ShapeName$memberName`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId {
    value: Cow<'static, str>,
}

impl ShapeId {
    /// Creates a new ShapeId from a string.
    ///
    /// # Examples
    /// ```
    /// use iot_model_types::ShapeId;
    ///
    /// let shape_id = ShapeId::new("com.amazonaws.iot#CreateThingRequest");
    /// ```
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Cow::Owned(value.into()),
        }
    }

    /// Creates a ShapeId from a static string, usable in `const` and `static` items.
    pub const fn from_static(value: &'static str) -> Self {
        Self {
            value: Cow::Borrowed(value),
        }
    }

    /// Creates a ShapeId from a namespace and a shape name.
    pub fn from_parts(namespace: &str, shape_name: &str) -> Self {
        Self::new(format!("{namespace}#{shape_name}"))
    }

    /// Returns the ShapeId of a member of this shape.
    ///
    /// # Examples
    /// ```
    /// use iot_model_types::ShapeId;
    ///
    /// let member = ShapeId::new("com.example#Thing").with_member("name");
    /// assert_eq!(member.as_str(), "com.example#Thing$name");
    /// ```
    pub fn with_member(&self, member_name: &str) -> Self {
        Self::new(format!("{}${}", self.value, member_name))
    }

    /// Returns the string representation of this ShapeId.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Returns the namespace portion of the ShapeId.
    ///
    /// # Examples
    /// ```
    /// use iot_model_types::ShapeId;
    ///
    /// let shape_id = ShapeId::new("smithy.api#String");
    /// assert_eq!(shape_id.namespace(), Some("smithy.api"));
    /// ```
    pub fn namespace(&self) -> Option<&str> {
        self.value.split_once('#').map(|(ns, _)| ns)
    }

    /// Returns the shape name portion of the ShapeId.
    ///
    /// A value without a namespace is treated as a bare shape name.
    ///
    /// # Examples
    /// ```
    /// use iot_model_types::ShapeId;
    ///
    /// assert_eq!(ShapeId::new("smithy.api#String").shape_name(), "String");
    /// assert_eq!(ShapeId::new("com.example#Thing$name").shape_name(), "Thing");
    /// assert_eq!(ShapeId::new("Thing").shape_name(), "Thing");
    /// ```
    pub fn shape_name(&self) -> &str {
        let rest = self
            .value
            .split_once('#')
            .map(|(_, rest)| rest)
            .unwrap_or(&self.value);
        rest.split_once('$').map(|(name, _)| name).unwrap_or(rest)
    }

    /// Returns the member name if this is a member shape ID.
    pub fn member_name(&self) -> Option<&str> {
        self.value
            .split_once('#')
            .and_then(|(_, rest)| rest.split_once('$').map(|(_, member)| member))
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl From<String> for ShapeId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for ShapeId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
