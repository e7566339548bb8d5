/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Device Defender audit mitigation operations.

use super::{length, range, shape, structure};
use iot_model_schema::{MemberSchema, SchemaError, StructureSchema};

const TASK_ID_PATTERN: &str = "[a-zA-Z0-9_-]+";
const TASK_STATUSES: [&str; 4] = ["IN_PROGRESS", "COMPLETED", "FAILED", "CANCELED"];

pub(super) fn schemas() -> Result<Vec<StructureSchema>, SchemaError> {
    let task_id = || -> Result<_, SchemaError> {
        Ok(MemberSchema::string("taskId")
            .length(length("1 - 128")?)
            .pattern(TASK_ID_PATTERN))
    };

    Ok(vec![
        structure("AuditMitigationActionsTaskTarget")
            .member(
                MemberSchema::string("auditTaskId")
                    .length(length("1 - 40")?)
                    .pattern(TASK_ID_PATTERN),
            )
            .member(
                MemberSchema::list(
                    "findingIds",
                    MemberSchema::string("member")
                        .length(length("1 - 128")?)
                        .pattern(TASK_ID_PATTERN),
                )
                .length(length("1 - 25")?),
            )
            .member(MemberSchema::map(
                "auditCheckToReasonCodeFilter",
                MemberSchema::list("value", MemberSchema::string("member"))
                    .length(length("1 - 25")?),
            ))
            .build()?,
        structure("StartAuditMitigationActionsTaskRequest")
            .http("POST", "/audit/mitigationactions/tasks/{taskId}")
            .member(task_id()?.required().http_label())
            .member(
                MemberSchema::structure("target", shape("AuditMitigationActionsTaskTarget"))
                    .required(),
            )
            .member(
                MemberSchema::map(
                    "auditCheckToActionsMapping",
                    MemberSchema::list("value", MemberSchema::string("member"))
                        .length(length("1 - 5")?),
                )
                .required(),
            )
            .member(
                MemberSchema::string("clientRequestToken")
                    .required()
                    .length(length("1 - 64")?)
                    .pattern(TASK_ID_PATTERN),
            )
            .build()?,
        structure("StartAuditMitigationActionsTaskResult")
            .member(task_id()?)
            .build()?,
        structure("ListAuditMitigationActionsTasksRequest")
            .http("GET", "/audit/mitigationactions/tasks")
            .member(
                MemberSchema::string("auditTaskId")
                    .length(length("1 - 40")?)
                    .pattern(TASK_ID_PATTERN)
                    .http_query("auditTaskId"),
            )
            .member(
                MemberSchema::string("findingId")
                    .length(length("1 - 128")?)
                    .pattern(TASK_ID_PATTERN)
                    .http_query("findingId"),
            )
            .member(
                MemberSchema::enumeration("taskStatus", TASK_STATUSES).http_query("taskStatus"),
            )
            .member(
                MemberSchema::integer("maxResults")
                    .range(range("1 - 100")?)
                    .http_query("maxResults"),
            )
            .member(MemberSchema::string("nextToken").http_query("nextToken"))
            .member(
                MemberSchema::timestamp("startTime")
                    .required()
                    .http_query("startTime"),
            )
            .member(MemberSchema::timestamp("endTime").required().http_query("endTime"))
            .build()?,
        structure("AuditMitigationActionsTaskMetadata")
            .member(task_id()?)
            .member(MemberSchema::timestamp("startTime"))
            .member(MemberSchema::enumeration("taskStatus", TASK_STATUSES))
            .build()?,
        structure("ListAuditMitigationActionsTasksResult")
            .member(MemberSchema::list(
                "tasks",
                MemberSchema::structure("member", shape("AuditMitigationActionsTaskMetadata")),
            ))
            .member(MemberSchema::string("nextToken"))
            .build()?,
        structure("DescribeAuditMitigationActionsTaskRequest")
            .http("GET", "/audit/mitigationactions/tasks/{taskId}")
            .member(task_id()?.required().http_label())
            .build()?,
        structure("DescribeAuditMitigationActionsTaskResult")
            .member(MemberSchema::enumeration("taskStatus", TASK_STATUSES))
            .member(MemberSchema::timestamp("startTime"))
            .member(MemberSchema::timestamp("endTime"))
            .member(MemberSchema::structure(
                "target",
                shape("AuditMitigationActionsTaskTarget"),
            ))
            .build()?,
    ])
}
