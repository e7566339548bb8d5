/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Request, result and nested model types for the AWS IoT control-plane API.
//!
//! Types are described by a schema table rather than generated code. Look a type up by
//! name, build an instance, validate it and encode it:
//!
//! ```
//! use iot_model::{iot_registry, encode, JsonCodec, RegistryExt};
//!
//! let registry = iot_registry().expect("schema table is valid");
//! let request = registry
//!     .builder("CreateThingRequest")?
//!     .with("thingName", "sensor-01")
//!     .with("billingGroupName", "default")
//!     .build()?;
//! request.validate()?;
//!
//! let body = encode(&JsonCodec::default(), &request)?;
//! assert_eq!(body, br#"{"thingName":"sensor-01","billingGroupName":"default"}"#);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    missing_debug_implementations,
    rust_2018_idioms,
    unreachable_pub
)]

mod error;
pub mod schema;

pub use error::{decode_error, GenericError, ServiceError};
pub use iot_model_json::codec::{JsonCodec, JsonCodecSettings};
pub use iot_model_runtime::http::{bind_request, encode_body, HttpRequestParts};
pub use iot_model_runtime::{
    decode, encode, BindingError, DecodeError, EncodeError, ModelBuilder, ModelError,
    ModelInstance, RegistryExt, Rule, ValidationFailed, Value, Violation,
};
pub use iot_model_schema::traits::ErrorFault;
pub use iot_model_schema::{SchemaError, SchemaRegistry, ShapeId, StructureSchema};
pub use iot_model_types::DateTime;
pub use schema::{build_registry, iot_registry, NAMESPACE};
