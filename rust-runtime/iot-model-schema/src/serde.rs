/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Serialization and deserialization interfaces for model values.

mod deserializer;
mod serializer;

pub use deserializer::ShapeDeserializer;
pub use serializer::{SerializableStruct, ShapeSerializer};

#[cfg(test)]
mod test {
    use crate::serde::{SerializableStruct, ShapeSerializer};
    use crate::{MemberSchema, Schema, StructureSchema};
    use iot_model_types::DateTime;
    use std::convert::Infallible;

    // Records each write as `member=value`
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl Recorder {
        fn push(&mut self, schema: &dyn Schema, value: impl std::fmt::Display) -> Result<(), Infallible> {
            let name = schema.member_name().unwrap_or("-");
            self.events.push(format!("{name}={value}"));
            Ok(())
        }
    }

    impl ShapeSerializer for Recorder {
        type Output = Vec<String>;
        type Error = Infallible;

        fn finish(self) -> Result<Self::Output, Self::Error> {
            Ok(self.events)
        }

        fn write_struct<F>(&mut self, schema: &dyn Schema, write_members: F) -> Result<(), Self::Error>
        where
            F: FnOnce(&mut Self) -> Result<(), Self::Error>,
        {
            self.push(schema, "{")?;
            write_members(self)?;
            self.events.push("}".to_string());
            Ok(())
        }

        fn write_list<F>(&mut self, schema: &dyn Schema, write_elements: F) -> Result<(), Self::Error>
        where
            F: FnOnce(&mut Self) -> Result<(), Self::Error>,
        {
            self.push(schema, "[")?;
            write_elements(self)?;
            self.events.push("]".to_string());
            Ok(())
        }

        fn write_map<F>(&mut self, schema: &dyn Schema, write_entries: F) -> Result<(), Self::Error>
        where
            F: FnOnce(&mut Self) -> Result<(), Self::Error>,
        {
            self.write_struct(schema, write_entries)
        }

        fn write_map_key(&mut self, key: &str) -> Result<(), Self::Error> {
            self.events.push(format!("key {key}"));
            Ok(())
        }

        fn write_boolean(&mut self, schema: &dyn Schema, value: bool) -> Result<(), Self::Error> {
            self.push(schema, value)
        }

        fn write_integer(&mut self, schema: &dyn Schema, value: i32) -> Result<(), Self::Error> {
            self.push(schema, value)
        }

        fn write_long(&mut self, schema: &dyn Schema, value: i64) -> Result<(), Self::Error> {
            self.push(schema, value)
        }

        fn write_double(&mut self, schema: &dyn Schema, value: f64) -> Result<(), Self::Error> {
            self.push(schema, value)
        }

        fn write_string(&mut self, schema: &dyn Schema, value: &str) -> Result<(), Self::Error> {
            self.push(schema, value)
        }

        fn write_timestamp(
            &mut self,
            schema: &dyn Schema,
            value: &DateTime,
        ) -> Result<(), Self::Error> {
            self.push(schema, value)
        }
    }

    struct Thing {
        schema: StructureSchema,
        name: String,
        version: i64,
        groups: Vec<String>,
    }

    impl SerializableStruct for Thing {
        fn serialize<S: ShapeSerializer>(&self, serializer: &mut S) -> Result<(), S::Error> {
            let groups = self.schema.get_member("groups").expect("declared");
            serializer.write_struct(&self.schema, |ser| {
                ser.write_string(self.schema.get_member("name").expect("declared"), &self.name)?;
                ser.write_long(self.schema.get_member("version").expect("declared"), self.version)?;
                ser.write_list(groups, |ser| {
                    for group in &self.groups {
                        ser.write_string(groups.element().expect("list element"), group)?;
                    }
                    Ok(())
                })
            })
        }
    }

    #[test]
    fn members_are_written_with_their_own_schema() {
        let thing = Thing {
            schema: StructureSchema::builder("com.amazonaws.iot#Thing")
                .member(MemberSchema::string("name"))
                .member(MemberSchema::long("version"))
                .member(MemberSchema::list("groups", MemberSchema::string("group")))
                .build()
                .unwrap(),
            name: "sensor-01".to_string(),
            version: 3,
            groups: vec!["lobby".to_string(), "roof".to_string()],
        };
        let mut recorder = Recorder::default();
        thing.serialize(&mut recorder).unwrap();
        assert_eq!(
            recorder.finish().unwrap(),
            vec![
                "-={",
                "name=sensor-01",
                "version=3",
                "groups=[",
                "member=lobby",
                "member=roof",
                "]",
                "}",
            ]
        );
    }
}
