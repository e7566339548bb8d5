/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! JSON codec implementation for schema-based serialization.

use iot_model_schema::codec::Codec;
use iot_model_schema::traits::TimestampFormatTrait;
use iot_model_schema::{Schema, SchemaExt, TimestampFormat};

mod deserializer;
mod serializer;

pub use deserializer::{JsonDeserializer, JsonDeserializerError};
pub use serializer::{JsonSerializer, JsonSerializerError};

/// Configuration for JSON codec behavior.
#[derive(Debug, Clone)]
pub struct JsonCodecSettings {
    /// Default timestamp format to use when a member has no timestamp format of its own.
    pub default_timestamp_format: TimestampFormat,
    /// Whether members missing from the structure schema are skipped during
    /// deserialization. When false they are rejected.
    pub allow_unknown_members: bool,
}

impl Default for JsonCodecSettings {
    fn default() -> Self {
        Self {
            default_timestamp_format: TimestampFormat::EpochSeconds,
            allow_unknown_members: true,
        }
    }
}

impl JsonCodecSettings {
    /// The timestamp format for `schema`, respecting its timestamp format trait.
    pub(crate) fn timestamp_format(&self, schema: &dyn Schema) -> TimestampFormat {
        schema
            .get_trait::<TimestampFormatTrait>()
            .map(|format| format.0)
            .unwrap_or(self.default_timestamp_format)
    }
}

/// JSON codec for schema-based serialization and deserialization.
///
/// # Examples
///
/// ```
/// use iot_model_json::codec::{JsonCodec, JsonCodecSettings};
/// use iot_model_schema::codec::Codec;
/// use iot_model_schema::TimestampFormat;
///
/// // Epoch-second timestamps, unknown members skipped
/// let codec = JsonCodec::new(JsonCodecSettings::default());
///
/// // RFC 3339 timestamps, unknown members rejected
/// let codec = JsonCodec::new(JsonCodecSettings {
///     default_timestamp_format: TimestampFormat::DateTime,
///     allow_unknown_members: false,
/// });
///
/// let _serializer = codec.create_serializer();
/// let _deserializer = codec.create_deserializer(b"{}");
/// ```
#[derive(Debug, Clone)]
pub struct JsonCodec {
    settings: JsonCodecSettings,
}

impl JsonCodec {
    /// Creates a new JSON codec with the given settings.
    pub fn new(settings: JsonCodecSettings) -> Self {
        Self { settings }
    }

    /// Returns the codec settings.
    pub fn settings(&self) -> &JsonCodecSettings {
        &self.settings
    }
}

impl Default for JsonCodec {
    fn default() -> Self {
        Self::new(JsonCodecSettings::default())
    }
}

impl Codec for JsonCodec {
    type Serializer = JsonSerializer;
    type Deserializer = JsonDeserializer;

    fn create_serializer(&self) -> Self::Serializer {
        JsonSerializer::new(self.settings.clone())
    }

    fn create_deserializer(&self, input: &[u8]) -> Self::Deserializer {
        JsonDeserializer::new(input, self.settings.clone())
    }
}
