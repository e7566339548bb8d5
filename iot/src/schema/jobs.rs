/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

//! Job operations and rollout configuration.

use super::{length, range, shape, structure};
use iot_model_schema::{MemberSchema, SchemaError, StructureSchema};

const JOB_ID_PATTERN: &str = "[a-zA-Z0-9_-]+";

pub(super) fn schemas() -> Result<Vec<StructureSchema>, SchemaError> {
    let job_id = || -> Result<_, SchemaError> {
        Ok(MemberSchema::string("jobId")
            .length(length("1 - 64")?)
            .pattern(JOB_ID_PATTERN))
    };

    Ok(vec![
        structure("RateIncreaseCriteria")
            .member(MemberSchema::integer("numberOfNotifiedThings").range(range("1 - ")?))
            .member(MemberSchema::integer("numberOfSucceededThings").range(range("1 - ")?))
            .build()?,
        structure("ExponentialRolloutRate")
            .member(
                MemberSchema::integer("baseRatePerMinute")
                    .required()
                    .range(range("1 - 1000")?),
            )
            .member(
                MemberSchema::double("incrementFactor")
                    .required()
                    .range(range("1.1 - 5")?),
            )
            .member(
                MemberSchema::structure("rateIncreaseCriteria", shape("RateIncreaseCriteria"))
                    .required(),
            )
            .build()?,
        structure("JobExecutionsRolloutConfig")
            .member(
                MemberSchema::integer("maximumPerMinute").range(range("1 - 1000")?),
            )
            .member(MemberSchema::structure(
                "exponentialRate",
                shape("ExponentialRolloutRate"),
            ))
            .build()?,
        structure("CreateJobRequest")
            .http("PUT", "/jobs/{jobId}")
            .member(job_id()?.required().http_label())
            .member(
                MemberSchema::list("targets", MemberSchema::string("member"))
                    .required()
                    .length(length("1 - ")?),
            )
            .member(MemberSchema::string("documentSource").length(length("1 - 1350")?))
            .member(MemberSchema::string("document").length(length(" - 32768")?))
            .member(
                MemberSchema::string("description")
                    .length(length(" - 2028")?)
                    .pattern("[^\\p{C}]+"),
            )
            .member(MemberSchema::enumeration(
                "targetSelection",
                ["CONTINUOUS", "SNAPSHOT"],
            ))
            .member(MemberSchema::structure(
                "jobExecutionsRolloutConfig",
                shape("JobExecutionsRolloutConfig"),
            ))
            .member(MemberSchema::map(
                "documentParameters",
                MemberSchema::string("value").length(length("1 - 512")?),
            ))
            .member(MemberSchema::list(
                "tags",
                MemberSchema::structure("member", shape("Tag")),
            ))
            .build()?,
        structure("CreateJobResult")
            .member(MemberSchema::string("jobArn"))
            .member(job_id()?)
            .member(MemberSchema::string("description"))
            .build()?,
    ])
}
