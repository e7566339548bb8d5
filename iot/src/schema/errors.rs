/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Errors the service reports instead of a result.

use super::structure;
use iot_model_schema::traits::ErrorFault;
use iot_model_schema::{MemberSchema, SchemaError, StructureSchema};

const CLIENT_ERRORS: [&str; 12] = [
    "CertificateStateException",
    "DeleteConflictException",
    "InvalidRequestException",
    "LimitExceededException",
    "MalformedPolicyException",
    "ResourceNotFoundException",
    "SqlParseException",
    "ThrottlingException",
    "TransferAlreadyCompletedException",
    "TransferConflictException",
    "UnauthorizedException",
    "VersionsLimitExceededException",
];

const SERVER_ERRORS: [&str; 3] = [
    "InternalException",
    "InternalFailureException",
    "ServiceUnavailableException",
];

fn error(name: &str, fault: ErrorFault) -> Result<StructureSchema, SchemaError> {
    structure(name)
        .member(MemberSchema::string("message"))
        .error(fault)
        .build()
}

pub(super) fn schemas() -> Result<Vec<StructureSchema>, SchemaError> {
    let mut schemas = vec![structure("ResourceAlreadyExistsException")
        .member(MemberSchema::string("message"))
        .member(MemberSchema::string("resourceId"))
        .member(MemberSchema::string("resourceArn"))
        .error(ErrorFault::Client)
        .build()?];
    for name in CLIENT_ERRORS {
        schemas.push(error(name, ErrorFault::Client)?);
    }
    for name in SERVER_ERRORS {
        schemas.push(error(name, ErrorFault::Server)?);
    }
    Ok(schemas)
}
