/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Policy operations.

use super::{length, shape, structure};
use iot_model_schema::{MemberSchema, SchemaError, StructureSchema};

const POLICY_NAME_PATTERN: &str = "[\\w+=,.@-]+";

pub(super) fn schemas() -> Result<Vec<StructureSchema>, SchemaError> {
    let policy_name = || -> Result<_, SchemaError> {
        Ok(MemberSchema::string("policyName")
            .length(length("1 - 128")?)
            .pattern(POLICY_NAME_PATTERN))
    };

    Ok(vec![
        structure("Tag")
            .member(
                MemberSchema::string("Key")
                    .required()
                    .length(length("1 - 128")?)
                    .pattern("([\\p{L}\\p{Z}\\p{N}_.:/=+\\-@]*)"),
            )
            .member(MemberSchema::string("Value").length(length(" - 256")?))
            .build()?,
        structure("CreatePolicyRequest")
            .http("POST", "/policies/{policyName}")
            .member(policy_name()?.required().http_label())
            .member(
                MemberSchema::string("policyDocument")
                    .required()
                    .length(length(" - 404600")?),
            )
            .member(MemberSchema::list(
                "tags",
                MemberSchema::structure("member", shape("Tag")),
            ))
            .build()?,
        structure("CreatePolicyResult")
            .member(policy_name()?)
            .member(MemberSchema::string("policyArn"))
            .member(MemberSchema::string("policyDocument"))
            .member(
                MemberSchema::string("policyVersionId").pattern("[0-9]+"),
            )
            .build()?,
    ])
}
