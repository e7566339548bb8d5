/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Thing registry operations.

use super::{length, range, shape, structure};
use iot_model_schema::{MemberBuilder, MemberSchema, SchemaError, StructureSchema};

const THING_NAME_PATTERN: &str = "[a-zA-Z0-9:_-]+";
const ATTRIBUTE_NAME_PATTERN: &str = "[a-zA-Z0-9_.,@/:#-]+";
const ATTRIBUTE_VALUE_PATTERN: &str = "[a-zA-Z0-9_.,@/:#-]*";

fn thing_name(name: &str) -> Result<MemberBuilder, SchemaError> {
    Ok(MemberSchema::string(name)
        .length(length("1 - 128")?)
        .pattern(THING_NAME_PATTERN))
}

fn attributes(name: &str) -> Result<MemberBuilder, SchemaError> {
    Ok(MemberSchema::map(
        name,
        MemberSchema::string("value")
            .length(length(" - 800")?)
            .pattern(ATTRIBUTE_VALUE_PATTERN),
    ))
}

pub(super) fn schemas() -> Result<Vec<StructureSchema>, SchemaError> {
    Ok(vec![
        structure("AttributePayload")
            .member(attributes("attributes")?)
            .member(MemberSchema::boolean("merge"))
            .build()?,
        structure("CreateThingRequest")
            .http("POST", "/things/{thingName}")
            .member(thing_name("thingName")?.required().http_label())
            .member(thing_name("thingTypeName")?)
            .member(MemberSchema::structure(
                "attributePayload",
                shape("AttributePayload"),
            ))
            .member(thing_name("billingGroupName")?)
            .build()?,
        structure("CreateThingResult")
            .member(thing_name("thingName")?)
            .member(MemberSchema::string("thingArn"))
            .member(MemberSchema::string("thingId"))
            .build()?,
        structure("DescribeThingRequest")
            .http("GET", "/things/{thingName}")
            .member(thing_name("thingName")?.required().http_label())
            .build()?,
        structure("DescribeThingResult")
            .member(MemberSchema::string("defaultClientId"))
            .member(thing_name("thingName")?)
            .member(MemberSchema::string("thingId"))
            .member(MemberSchema::string("thingArn"))
            .member(thing_name("thingTypeName")?)
            .member(attributes("attributes")?)
            .member(MemberSchema::long("version"))
            .member(thing_name("billingGroupName")?)
            .build()?,
        structure("ListThingsRequest")
            .http("GET", "/things")
            .member(MemberSchema::string("nextToken").http_query("nextToken"))
            .member(
                MemberSchema::integer("maxResults")
                    .range(range("1 - 250")?)
                    .http_query("maxResults"),
            )
            .member(
                MemberSchema::string("attributeName")
                    .length(length(" - 128")?)
                    .pattern(ATTRIBUTE_NAME_PATTERN)
                    .http_query("attributeName"),
            )
            .member(
                MemberSchema::string("attributeValue")
                    .length(length(" - 800")?)
                    .pattern(ATTRIBUTE_VALUE_PATTERN)
                    .http_query("attributeValue"),
            )
            .member(thing_name("thingTypeName")?.http_query("thingTypeName"))
            .build()?,
        structure("ThingAttribute")
            .member(thing_name("thingName")?)
            .member(thing_name("thingTypeName")?)
            .member(MemberSchema::string("thingArn"))
            .member(attributes("attributes")?)
            .member(MemberSchema::long("version"))
            .build()?,
        structure("ListThingsResult")
            .member(MemberSchema::list(
                "things",
                MemberSchema::structure("member", shape("ThingAttribute")),
            ))
            .member(MemberSchema::string("nextToken"))
            .build()?,
    ])
}
