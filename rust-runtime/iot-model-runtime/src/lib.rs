/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Generic model engine for schema-described request, result and nested types.
//!
//! A [`ModelInstance`] is a typed field bag bound to one
//! [`StructureSchema`](iot_model_schema::StructureSchema). Fields are either absent or hold a
//! [`Value`] matching the member's kind; present-but-empty values (`""`, `[]`, `{}`) are
//! distinct from absence.
//!
//! Instances can be mutated in place ([`ModelInstance::set`], [`ModelInstance::with`]) or
//! assembled by value with a [`ModelBuilder`]. Neither path checks constraints: call
//! [`ModelInstance::validate`] to collect [`Violation`]s. Instances compare and hash
//! structurally, and are converted to and from wire formats through any
//! [`Codec`](iot_model_schema::codec::Codec) with [`encode`] and [`decode`].

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

mod builder;
mod equality;
mod error;
mod instance;
mod serde;
mod validate;
mod value;

pub mod http;

pub use builder::ModelBuilder;
pub use error::{BindingError, DecodeError, EncodeError, ModelError, ValidationFailed};
pub use instance::ModelInstance;
pub use serde::{decode, encode};
pub use validate::{RegistryExt, Rule, Violation};
pub use value::Value;
