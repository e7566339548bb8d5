/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Codec-driven encoding and decoding of model instances.

use crate::{DecodeError, EncodeError, ModelInstance, Value};
use iot_model_schema::codec::Codec;
use iot_model_schema::serde::{SerializableStruct, ShapeDeserializer, ShapeSerializer};
use iot_model_schema::{MemberSchema, Schema, SchemaRegistry, ShapeType, StructureSchema};
use std::collections::BTreeMap;
use std::sync::Arc;

type SerializerOutput<C> = <<C as Codec>::Serializer as ShapeSerializer>::Output;

fn write_members<S: ShapeSerializer>(
    serializer: &mut S,
    instance: &ModelInstance,
) -> Result<(), S::Error> {
    for (member, value) in instance.present_fields() {
        write_value(serializer, member, value)?;
    }
    Ok(())
}

pub(crate) fn write_value<S: ShapeSerializer>(
    serializer: &mut S,
    member: &MemberSchema,
    value: &Value,
) -> Result<(), S::Error> {
    match value {
        Value::String(value) => serializer.write_string(member, value),
        Value::Integer(value) => serializer.write_integer(member, *value),
        Value::Long(value) => serializer.write_long(member, *value),
        Value::Double(value) => serializer.write_double(member, *value),
        Value::Boolean(value) => serializer.write_boolean(member, *value),
        Value::Timestamp(value) => serializer.write_timestamp(member, value),
        Value::List(elements) => {
            let element = member.element().unwrap_or(member);
            serializer.write_list(member, |ser| {
                for value in elements {
                    write_value(ser, element, value)?;
                }
                Ok(())
            })
        }
        Value::Map(entries) => {
            let element = member.element().unwrap_or(member);
            serializer.write_map(member, |ser| {
                for (key, value) in entries {
                    ser.write_map_key(key)?;
                    write_value(ser, element, value)?;
                }
                Ok(())
            })
        }
        Value::Structure(nested) => serializer.write_struct(member, |ser| write_members(ser, nested)),
    }
}

/// Absent fields are skipped; they are never written as null.
impl SerializableStruct for ModelInstance {
    fn serialize<S: ShapeSerializer>(&self, serializer: &mut S) -> Result<(), S::Error> {
        let schema: &StructureSchema = self.schema();
        serializer.write_struct(schema, |ser| write_members(ser, self))
    }
}

/// Encodes `instance` with `codec`.
pub fn encode<C>(codec: &C, instance: &ModelInstance) -> Result<SerializerOutput<C>, EncodeError>
where
    C: Codec,
    <C::Serializer as ShapeSerializer>::Error: Send + Sync + 'static,
{
    let mut serializer = codec.create_serializer();
    instance
        .serialize(&mut serializer)
        .map_err(|err| EncodeError::new(instance.type_name(), err))?;
    serializer
        .finish()
        .map_err(|err| EncodeError::new(instance.type_name(), err))
}

/// Decodes an instance of the registered type `type_name` from `input`.
///
/// Members missing from the input, or explicitly null, stay absent. Nested structures are
/// resolved against `registry`.
pub fn decode<C>(
    codec: &C,
    registry: &SchemaRegistry,
    type_name: &str,
    input: &[u8],
) -> Result<ModelInstance, DecodeError>
where
    C: Codec,
    <C::Deserializer as ShapeDeserializer>::Error: Send + Sync + 'static,
{
    let schema = registry.lookup(type_name)?;
    let mut deserializer = codec.create_deserializer(input);
    let instance = read_instance(&mut deserializer, registry, schema)?;
    tracing::trace!(
        type_name = instance.type_name(),
        present = instance.present_fields().count(),
        "decoded model instance"
    );
    Ok(instance)
}

fn read_instance<D>(
    deserializer: &mut D,
    registry: &SchemaRegistry,
    schema: Arc<StructureSchema>,
) -> Result<ModelInstance, DecodeError>
where
    D: ShapeDeserializer,
    D::Error: Send + Sync + 'static,
{
    let mut failure: Option<DecodeError> = None;
    let result = deserializer.read_struct(
        &*schema,
        ModelInstance::new(schema.clone()),
        |mut instance, member, de| {
            if failure.is_some() || de.is_null() {
                return Ok(instance);
            }
            let member = match member
                .member_index()
                .and_then(|index| schema.member_schemas().get(index))
            {
                Some(member) => member,
                None => return Ok(instance),
            };
            let stored = read_value(de, registry, member)
                .and_then(|value| instance.set(member.name(), value).map_err(Into::into));
            if let Err(err) = stored {
                failure = Some(err);
            }
            Ok(instance)
        },
    );
    if let Some(failure) = failure {
        return Err(failure);
    }
    result.map_err(DecodeError::codec)
}

fn read_value<D>(
    deserializer: &mut D,
    registry: &SchemaRegistry,
    member: &MemberSchema,
) -> Result<Value, DecodeError>
where
    D: ShapeDeserializer,
    D::Error: Send + Sync + 'static,
{
    let value = match member.shape_type() {
        ShapeType::Boolean => Value::Boolean(
            deserializer
                .read_boolean(member)
                .map_err(DecodeError::codec)?,
        ),
        ShapeType::Integer => Value::Integer(
            deserializer
                .read_integer(member)
                .map_err(DecodeError::codec)?,
        ),
        ShapeType::Long => Value::Long(deserializer.read_long(member).map_err(DecodeError::codec)?),
        ShapeType::Double => Value::Double(
            deserializer
                .read_double(member)
                .map_err(DecodeError::codec)?,
        ),
        ShapeType::String | ShapeType::Enum => Value::String(
            deserializer
                .read_string(member)
                .map_err(DecodeError::codec)?,
        ),
        ShapeType::Timestamp => Value::Timestamp(
            deserializer
                .read_timestamp(member)
                .map_err(DecodeError::codec)?,
        ),
        ShapeType::List => {
            let element = element_of(member)?;
            let mut failure = None;
            let result = deserializer.read_list(member, Vec::new(), |mut elements, de| {
                if failure.is_some() || de.is_null() {
                    return Ok(elements);
                }
                match read_value(de, registry, element) {
                    Ok(value) => elements.push(value),
                    Err(err) => failure = Some(err),
                }
                Ok(elements)
            });
            if let Some(failure) = failure {
                return Err(failure);
            }
            Value::List(result.map_err(DecodeError::codec)?)
        }
        ShapeType::Map => {
            let element = element_of(member)?;
            let mut failure = None;
            let result = deserializer.read_map(member, BTreeMap::new(), |mut entries, key, de| {
                if failure.is_some() || de.is_null() {
                    return Ok(entries);
                }
                match read_value(de, registry, element) {
                    Ok(value) => {
                        entries.insert(key, value);
                    }
                    Err(err) => failure = Some(err),
                }
                Ok(entries)
            });
            if let Some(failure) = failure {
                return Err(failure);
            }
            Value::Map(result.map_err(DecodeError::codec)?)
        }
        ShapeType::Structure => {
            let target = member
                .target()
                .ok_or_else(|| DecodeError::MissingElementSchema(member.shape_id().to_string()))?;
            let schema = registry.lookup(target.as_str())?;
            Value::Structure(read_instance(deserializer, registry, schema)?)
        }
    };
    Ok(value)
}

fn element_of(member: &MemberSchema) -> Result<&MemberSchema, DecodeError> {
    member
        .element()
        .ok_or_else(|| DecodeError::MissingElementSchema(member.shape_id().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use iot_model_json::codec::{JsonCodec, JsonCodecSettings};
    use iot_model_schema::{MemberSchema, SchemaError, TimestampFormat};
    use iot_model_types::DateTime;
    use pretty_assertions::assert_eq;

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry
            .register_all([
                StructureSchema::builder("com.example#Job")
                    .member(MemberSchema::string("jobId"))
                    .member(MemberSchema::integer("count"))
                    .member(MemberSchema::long("version"))
                    .member(MemberSchema::double("factor"))
                    .member(MemberSchema::boolean("merge"))
                    .member(MemberSchema::timestamp("createdAt"))
                    .member(
                        MemberSchema::timestamp("updatedAt")
                            .timestamp_format(TimestampFormat::DateTime),
                    )
                    .member(MemberSchema::enumeration("selection", ["CONTINUOUS", "SNAPSHOT"]))
                    .member(MemberSchema::list("targets", MemberSchema::string("arn")))
                    .member(MemberSchema::map(
                        "filters",
                        MemberSchema::list("codes", MemberSchema::string("code")),
                    ))
                    .member(MemberSchema::structure("rollout", "com.example#Rollout"))
                    .build()
                    .unwrap(),
                StructureSchema::builder("com.example#Rollout")
                    .member(MemberSchema::integer("maximumPerMinute"))
                    .build()
                    .unwrap(),
            ])
            .unwrap();
        registry
    }

    fn text(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn absent_fields_are_omitted() {
        let registry = registry();
        let job = ModelInstance::builder(registry.lookup("Job").unwrap())
            .with("jobId", "job-1")
            .build()
            .unwrap();
        let codec = JsonCodec::default();
        let bytes = encode(&codec, &job).unwrap();
        assert_eq!(text(bytes.clone()), r#"{"jobId":"job-1"}"#);

        let decoded = decode(&codec, &registry, "Job", &bytes).unwrap();
        assert_eq!(decoded.get_str("jobId"), Some("job-1"));
        for name in [
            "count",
            "version",
            "factor",
            "merge",
            "createdAt",
            "updatedAt",
            "selection",
            "targets",
            "filters",
            "rollout",
        ] {
            assert!(!decoded.is_present(name), "{name} should be absent");
        }
        assert_eq!(decoded, job);
    }

    #[test]
    fn round_trips_every_kind() {
        let registry = registry();
        let rollout = ModelInstance::builder(registry.lookup("Rollout").unwrap())
            .with("maximumPerMinute", 50)
            .build()
            .unwrap();
        let job = ModelInstance::builder(registry.lookup("Job").unwrap())
            .with("jobId", "job-1")
            .with("count", -3)
            .with("version", 9_007_199_254_740_993_i64)
            .with("factor", 1.5)
            .with("merge", false)
            .with("createdAt", DateTime::from_millis(1_576_540_098_123))
            .with("updatedAt", DateTime::from_secs(1_576_540_098))
            .with("selection", "SNAPSHOT")
            .append_all("targets", ["a", "b"])
            .put_entry("filters", "check", vec!["R1"])
            .put_entry("filters", "empty", Vec::<String>::new())
            .with("rollout", rollout)
            .build()
            .unwrap();

        let codec = JsonCodec::default();
        let bytes = encode(&codec, &job).unwrap();
        let decoded = decode(&codec, &registry, "Job", &bytes).unwrap();
        assert_eq!(decoded, job);
        assert_eq!(decoded.structural_hash(), job.structural_hash());
    }

    #[test]
    fn empty_containers_stay_present() {
        let registry = registry();
        let job = ModelInstance::builder(registry.lookup("Job").unwrap())
            .with("jobId", "")
            .with("targets", Vec::<String>::new())
            .with("filters", BTreeMap::<String, Value>::new())
            .build()
            .unwrap();
        let codec = JsonCodec::default();
        let bytes = encode(&codec, &job).unwrap();
        assert_eq!(text(bytes.clone()), r#"{"jobId":"","targets":[],"filters":{}}"#);
        assert_eq!(decode(&codec, &registry, "Job", &bytes).unwrap(), job);
    }

    #[test]
    fn nulls_decode_as_absent() {
        let registry = registry();
        let input = br#"{"jobId":null,"targets":["a",null],"rollout":null}"#;
        let job = decode(&JsonCodec::default(), &registry, "Job", input).unwrap();
        assert!(!job.is_present("jobId"));
        assert!(!job.is_present("rollout"));
        assert_eq!(job.get_list("targets").map(<[Value]>::len), Some(1));
    }

    #[test]
    fn unknown_members_follow_settings() {
        let registry = registry();
        let input = br#"{"jobId":"j","extra":{"deep":[1,2]}}"#;
        let job = decode(&JsonCodec::default(), &registry, "Job", input).unwrap();
        assert_eq!(job.get_str("jobId"), Some("j"));

        let strict = JsonCodec::new(JsonCodecSettings {
            allow_unknown_members: false,
            ..Default::default()
        });
        let err = decode(&strict, &registry, "Job", input).unwrap_err();
        assert!(matches!(err, DecodeError::Codec(_)), "{err}");
    }

    #[test]
    fn decode_errors() {
        let registry = registry();
        let codec = JsonCodec::default();

        let err = decode(&codec, &registry, "Nope", b"{}").unwrap_err();
        assert!(matches!(err, DecodeError::Schema(SchemaError::UnknownType(_))), "{err}");

        let err = decode(&codec, &registry, "Job", br#"{"count":"three"}"#).unwrap_err();
        assert!(matches!(err, DecodeError::Codec(_)), "{err}");

        let err = decode(&codec, &registry, "Job", b"{not json").unwrap_err();
        assert!(matches!(err, DecodeError::Codec(_)), "{err}");
    }

    #[test]
    fn decode_does_not_validate_constraints() {
        let registry = registry();
        let job = decode(
            &JsonCodec::default(),
            &registry,
            "Job",
            br#"{"selection":"whatever"}"#,
        )
        .unwrap();
        assert_eq!(job.get_str("selection"), Some("whatever"));
        assert_eq!(job.violations().len(), 1);
    }
}
