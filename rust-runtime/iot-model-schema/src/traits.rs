/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Constraint and binding traits attached to member and structure schemas.
//!
//! Constraint traits (`required`, `length`, `pattern`, `enum`, `range`) drive validation.
//! `timestampFormat` and the HTTP traits drive serialization and request binding.

use crate::{SchemaError, ShapeId, StaticTrait, TimestampFormat, Trait};
use regex::Regex;
use std::any::Any;
use std::fmt;
use std::str::FromStr;

macro_rules! static_trait {
    ($ty:ty, $id:literal) => {
        impl Trait for $ty {
            fn trait_id(&self) -> &ShapeId {
                static ID: ShapeId = <$ty as StaticTrait>::ID;
                &ID
            }

            fn as_any(&self) -> &dyn Any {
                self
            }
        }

        impl StaticTrait for $ty {
            const ID: ShapeId = ShapeId::from_static($id);
        }
    };
}

/// Marks a member that must be present for its structure to be valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredTrait;

static_trait!(RequiredTrait, "smithy.api#required");

/// Inclusive bounds on the length of a string, list or map.
///
/// Either side may be unspecified, in which case that side is unbounded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthTrait {
    min: Option<usize>,
    max: Option<usize>,
}

static_trait!(LengthTrait, "smithy.api#length");

impl LengthTrait {
    /// Creates a length constraint from optional bounds.
    pub const fn new(min: Option<usize>, max: Option<usize>) -> Self {
        Self { min, max }
    }

    /// Length must be within `min..=max`.
    pub const fn between(min: usize, max: usize) -> Self {
        Self::new(Some(min), Some(max))
    }

    /// Length must be at least `min`.
    pub const fn at_least(min: usize) -> Self {
        Self::new(Some(min), None)
    }

    /// Length must be at most `max`.
    pub const fn at_most(max: usize) -> Self {
        Self::new(None, Some(max))
    }

    /// The lower bound, if any.
    pub fn min(&self) -> Option<usize> {
        self.min
    }

    /// The upper bound, if any.
    pub fn max(&self) -> Option<usize> {
        self.max
    }

    /// Returns true if `len` satisfies both bounds.
    pub fn contains(&self, len: usize) -> bool {
        self.min.is_none_or(|min| len >= min) && self.max.is_none_or(|max| len <= max)
    }
}

/// Parses the `"min - max"` notation, e.g. `"1 - 128"`, `" - 10000"` or `"1 - "`.
impl FromStr for LengthTrait {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = split_bounds(s)?;
        let parse = |bound: Option<&str>| {
            bound
                .map(|b| {
                    b.parse::<usize>()
                        .map_err(|_| SchemaError::MalformedConstraint(s.to_string()))
                })
                .transpose()
        };
        Ok(Self::new(parse(min)?, parse(max)?))
    }
}

impl fmt::Display for LengthTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bounds(f, self.min, self.max)
    }
}

/// Inclusive bounds on a numeric value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeTrait {
    min: Option<f64>,
    max: Option<f64>,
}

static_trait!(RangeTrait, "smithy.api#range");

impl RangeTrait {
    /// Creates a range constraint from optional bounds.
    pub const fn new(min: Option<f64>, max: Option<f64>) -> Self {
        Self { min, max }
    }

    /// Value must be within `min..=max`.
    pub const fn between(min: f64, max: f64) -> Self {
        Self::new(Some(min), Some(max))
    }

    /// Value must be at least `min`.
    pub const fn at_least(min: f64) -> Self {
        Self::new(Some(min), None)
    }

    /// The lower bound, if any.
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    /// The upper bound, if any.
    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Returns true if `value` satisfies both bounds. NaN never does.
    pub fn contains(&self, value: f64) -> bool {
        !value.is_nan()
            && self.min.is_none_or(|min| value >= min)
            && self.max.is_none_or(|max| value <= max)
    }
}

/// Parses the `"min - max"` notation, e.g. `"1 - 2147483647"`.
impl FromStr for RangeTrait {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (min, max) = split_bounds(s)?;
        let parse = |bound: Option<&str>| {
            bound
                .map(|b| match b.parse::<f64>() {
                    Ok(value) if value.is_finite() => Ok(value),
                    _ => Err(SchemaError::MalformedConstraint(s.to_string())),
                })
                .transpose()
        };
        Ok(Self::new(parse(min)?, parse(max)?))
    }
}

impl fmt::Display for RangeTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_bounds(f, self.min, self.max)
    }
}

fn split_bounds(s: &str) -> Result<(Option<&str>, Option<&str>), SchemaError> {
    // Negative lower bounds contain a '-' of their own, so split on the spaced separator.
    let (min, max) = s
        .split_once(" - ")
        .or_else(|| s.strip_prefix("- ").map(|max| ("", max)))
        .or_else(|| s.strip_suffix(" -").map(|min| (min, "")))
        .ok_or_else(|| SchemaError::MalformedConstraint(s.to_string()))?;
    fn bound(b: &str) -> Option<&str> {
        Some(b.trim()).filter(|b| !b.is_empty())
    }
    let (min, max) = (bound(min), bound(max));
    if min.is_none() && max.is_none() {
        return Err(SchemaError::MalformedConstraint(s.to_string()));
    }
    Ok((min, max))
}

fn write_bounds<T: fmt::Display>(
    f: &mut fmt::Formatter<'_>,
    min: Option<T>,
    max: Option<T>,
) -> fmt::Result {
    if let Some(min) = min {
        write!(f, "{min}")?;
    }
    f.write_str(" - ")?;
    if let Some(max) = max {
        write!(f, "{max}")?;
    }
    Ok(())
}

/// A regular expression the whole string value must match.
#[derive(Debug, Clone)]
pub struct PatternTrait {
    pattern: String,
    regex: Regex,
}

static_trait!(PatternTrait, "smithy.api#pattern");

impl PatternTrait {
    /// Compiles `pattern`. Matching is anchored at both ends.
    pub fn new(pattern: impl Into<String>) -> Result<Self, regex::Error> {
        let pattern = pattern.into();
        let regex = Regex::new(&format!(r"\A(?:{pattern})\z"))?;
        Ok(Self { pattern, regex })
    }

    /// The pattern as written in the schema, without anchors.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns true if the entire `value` matches the pattern.
    pub fn is_match(&self, value: &str) -> bool {
        self.regex.is_match(value)
    }
}

/// The closed set of values an enum member accepts. Membership is case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumTrait {
    values: Vec<String>,
}

static_trait!(EnumTrait, "smithy.api#enum");

impl EnumTrait {
    /// Creates an enum constraint.
    pub fn new<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// The allowed values, in declaration order.
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// Returns true if `value` is one of the allowed values.
    pub fn contains(&self, value: &str) -> bool {
        self.values.iter().any(|v| v == value)
    }
}

/// Overrides the codec's default timestamp format for one member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimestampFormatTrait(pub TimestampFormat);

static_trait!(TimestampFormatTrait, "smithy.api#timestampFormat");

/// HTTP routing metadata for a request structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpTrait {
    method: String,
    uri: String,
}

static_trait!(HttpTrait, "smithy.api#http");

impl HttpTrait {
    /// Creates routing metadata for `method` and the URI template `uri`, e.g.
    /// `/things/{thingName}`.
    pub fn new(method: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            uri: uri.into(),
        }
    }

    /// The HTTP method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// The URI template, possibly with a literal query string.
    pub fn uri(&self) -> &str {
        &self.uri
    }
}

/// Which party a modeled service error blames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorFault {
    /// The request was rejected; retrying it unchanged fails again.
    Client,
    /// The service failed to handle a valid request.
    Server,
}

/// Marks a structure as a service error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorTrait(pub ErrorFault);

static_trait!(ErrorTrait, "smithy.api#error");

/// Binds a member to a `{label}` in the URI template of its structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpLabelTrait;

static_trait!(HttpLabelTrait, "smithy.api#httpLabel");

/// Binds a member to a query string parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpQueryTrait {
    name: String,
}

static_trait!(HttpQueryTrait, "smithy.api#httpQuery");

impl HttpQueryTrait {
    /// Creates a query binding for parameter `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The query parameter name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Binds a member to an HTTP header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpHeaderTrait {
    name: String,
}

static_trait!(HttpHeaderTrait, "smithy.api#httpHeader");

impl HttpHeaderTrait {
    /// Creates a header binding for header `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The header name.
    pub fn name(&self) -> &str {
        &self.name
    }
}
