/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Decoding of error responses.
//!
//! The error code is taken from the `__type` field of the body, or from `code` when there is
//! no `__type`. Codes naming a registered error type decode into an instance of that type;
//! anything else becomes a [`GenericError`].

use iot_model_runtime::{decode, DecodeError, ModelInstance};
use iot_model_schema::codec::Codec;
use iot_model_schema::prelude::{PreludeSchema, STRING};
use iot_model_schema::serde::ShapeDeserializer;
use iot_model_schema::traits::ErrorFault;
use iot_model_schema::{SchemaRegistry, ShapeId, ShapeType};
use std::error::Error;
use std::fmt;

static ERROR_BODY: PreludeSchema = PreludeSchema::new(
    ShapeId::from_static("com.amazonaws.iot#ErrorBody"),
    ShapeType::Map,
);

/// An error the service reported that has no registered type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenericError {
    /// The error code, without namespace prefix or URL suffix.
    pub code: Option<String>,
    /// The message the service sent with the error.
    pub message: Option<String>,
}

impl fmt::Display for GenericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code.as_deref().unwrap_or("unknown service error"))?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

impl Error for GenericError {}

/// An error response from the service.
#[derive(Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// An error with a registered type, such as `ResourceAlreadyExistsException`.
    Modeled(ModelInstance),
    /// An error code the schema table does not describe, or no code at all.
    Generic(GenericError),
}

impl ServiceError {
    /// The error code.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Modeled(error) => Some(error.type_name()),
            Self::Generic(error) => error.code.as_deref(),
        }
    }

    /// The message the service sent with the error.
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::Modeled(error) => error.get_str("message"),
            Self::Generic(error) => error.message.as_deref(),
        }
    }

    /// Whether the caller or the service is at fault. Unknown for generic errors.
    pub fn fault(&self) -> Option<ErrorFault> {
        match self {
            Self::Modeled(error) => error.schema().error(),
            Self::Generic(_) => None,
        }
    }

    /// The decoded error instance, if the code names a registered error type.
    pub fn as_modeled(&self) -> Option<&ModelInstance> {
        match self {
            Self::Modeled(error) => Some(error),
            Self::Generic(_) => None,
        }
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code().unwrap_or("unknown service error"))?;
        if let Some(message) = self.message() {
            write!(f, ": {message}")?;
        }
        Ok(())
    }
}

impl Error for ServiceError {}

/// Removes a trailing URL (after `:`) and a namespace prefix (before `#`) from an error code.
fn sanitize_error_code(error_code: &str) -> &str {
    let error_code = match error_code.find(':') {
        Some(idx) => &error_code[..idx],
        None => error_code,
    };
    match error_code.find('#') {
        Some(idx) => &error_code[idx + 1..],
        None => error_code,
    }
}

#[derive(Default)]
struct ErrorFields {
    type_field: Option<String>,
    code: Option<String>,
    message: Option<String>,
}

fn read_error_fields<D: ShapeDeserializer>(deserializer: &mut D) -> Result<GenericError, D::Error> {
    let fields = deserializer.read_map(
        &ERROR_BODY,
        ErrorFields::default(),
        |mut fields, key, deserializer| {
            if deserializer.is_null() {
                return Ok(fields);
            }
            match key.as_str() {
                "__type" => fields.type_field = Some(deserializer.read_string(&STRING)?),
                "code" | "Code" => fields.code = Some(deserializer.read_string(&STRING)?),
                "message" | "Message" | "errorMessage" => {
                    fields.message = Some(deserializer.read_string(&STRING)?)
                }
                _ => {}
            }
            Ok(fields)
        },
    )?;
    Ok(GenericError {
        code: fields
            .type_field
            .or(fields.code)
            .map(|code| sanitize_error_code(&code).to_string()),
        message: fields.message,
    })
}

/// Decodes the body of an error response.
///
/// An empty body yields a [`GenericError`] with neither code nor message. The codec's
/// unknown-member policy applies when the body is decoded into a registered error type, so
/// a strict codec rejects bodies that carry the code as a field.
///
/// ```
/// use iot_model::{decode_error, iot_registry, JsonCodec};
///
/// let body = br#"{"__type":"ThrottlingException","message":"Rate exceeded"}"#;
/// let error = decode_error(&JsonCodec::default(), iot_registry().unwrap(), body)?;
/// assert_eq!(error.code(), Some("ThrottlingException"));
/// assert_eq!(error.message(), Some("Rate exceeded"));
/// # Ok::<(), iot_model::DecodeError>(())
/// ```
pub fn decode_error<C>(
    codec: &C,
    registry: &SchemaRegistry,
    input: &[u8],
) -> Result<ServiceError, DecodeError>
where
    C: Codec,
    <C::Deserializer as ShapeDeserializer>::Error: Send + Sync + 'static,
{
    let generic = if input.trim_ascii().is_empty() {
        GenericError::default()
    } else {
        read_error_fields(&mut codec.create_deserializer(input))
            .map_err(|err| DecodeError::Codec(Box::new(err)))?
    };
    let schema = generic
        .code
        .as_deref()
        .and_then(|code| registry.get(code))
        .filter(|schema| schema.error().is_some());
    let Some(schema) = schema else {
        tracing::debug!(code = ?generic.code, "service error has no registered type");
        return Ok(ServiceError::Generic(generic));
    };

    let mut error = decode(codec, registry, schema.type_name(), input)?;
    if let Some(message) = generic.message {
        if !error.is_present("message") {
            error.set("message", message)?;
        }
    }
    tracing::debug!(code = error.type_name(), "decoded service error");
    Ok(ServiceError::Modeled(error))
}
