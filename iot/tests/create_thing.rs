/*
 * Copyright Amazon.com, Inc. or its affiliates. All Rights Reserved.
 * SPDX-License-Identifier: Apache-2.0
 */

use iot_model::{iot_registry, ModelError, RegistryExt, Rule, SchemaRegistry, Value};
use pretty_assertions::assert_eq;
use std::collections::BTreeMap;

fn registry() -> &'static SchemaRegistry {
    iot_registry().expect("IoT schema table is valid")
}

fn rules(violations: &[iot_model::Violation]) -> Vec<(&str, Rule)> {
    violations.iter().map(|v| (v.field(), v.rule())).collect()
}

#[test]
fn valid_request_has_no_violations() {
    let request = registry()
        .builder("CreateThingRequest")
        .unwrap()
        .with("thingName", "sensor-01")
        .with("thingTypeName", "thermostat")
        .build()
        .unwrap();
    assert!(request.violations().is_empty());
    assert!(request.validate().is_ok());
}

#[test]
fn empty_thing_name_only_reports_length() {
    let request = registry()
        .builder("CreateThingRequest")
        .unwrap()
        .with("thingName", "")
        .build()
        .unwrap();
    let violations = request.violations();
    assert_eq!(rules(&violations), vec![("thingName", Rule::LengthOutOfRange)]);
}

#[test]
fn each_rule_is_reported_with_its_field() {
    let payload = registry()
        .builder("AttributePayload")
        .unwrap()
        .put_entry("attributes", "room", "kitchen")
        .put_entry("attributes", "note", "x".repeat(801))
        .build()
        .unwrap();
    let request = registry()
        .builder("CreateThingRequest")
        .unwrap()
        .with("thingTypeName", "bad name!")
        .with("attributePayload", payload)
        .build()
        .unwrap();

    let err = request.validate().unwrap_err();
    assert_eq!(err.type_name(), "CreateThingRequest");
    assert_eq!(
        rules(err.violations()),
        vec![
            ("thingName", Rule::RequiredMissing),
            ("thingTypeName", Rule::PatternMismatch),
            ("attributePayload.attributes[note]", Rule::LengthOutOfRange),
        ]
    );
}

#[test]
fn ranges_and_enums() {
    let list = registry()
        .builder("ListThingsRequest")
        .unwrap()
        .with("maxResults", 251)
        .build()
        .unwrap();
    assert_eq!(rules(&list.violations()), vec![("maxResults", Rule::RangeOutOfBounds)]);

    let job = registry()
        .builder("CreateJobRequest")
        .unwrap()
        .with("jobId", "firmware-7")
        .append("targets", "arn:aws:iot:us-east-1:123456789012:thing/sensor-01")
        .with("targetSelection", "continuous")
        .build()
        .unwrap();
    assert_eq!(rules(&job.violations()), vec![("targetSelection", Rule::EnumInvalid)]);
}

#[test]
fn nested_rollout_config_is_validated() {
    let criteria = registry()
        .builder("RateIncreaseCriteria")
        .unwrap()
        .with("numberOfNotifiedThings", 10)
        .build()
        .unwrap();
    let rate = registry()
        .builder("ExponentialRolloutRate")
        .unwrap()
        .with("baseRatePerMinute", 50)
        .with("incrementFactor", 1.0)
        .with("rateIncreaseCriteria", criteria)
        .build()
        .unwrap();
    let config = registry()
        .builder("JobExecutionsRolloutConfig")
        .unwrap()
        .with("exponentialRate", rate)
        .build()
        .unwrap();
    assert_eq!(
        rules(&config.violations()),
        vec![("exponentialRate.incrementFactor", Rule::RangeOutOfBounds)]
    );
}

#[test]
fn validate_by_type_name() {
    let fields = BTreeMap::from([("thingName".to_string(), Value::from("a".repeat(129)))]);
    let violations = registry().validate("DescribeThingRequest", &fields).unwrap();
    assert_eq!(rules(&violations), vec![("thingName", Rule::LengthOutOfRange)]);

    let fields = BTreeMap::from([("thingName".to_string(), Value::from(7))]);
    let err = registry().validate("DescribeThingRequest", &fields).unwrap_err();
    assert!(matches!(err, ModelError::KindMismatch { .. }), "{err}");

    let err = registry().validate("DeleteThingRequest", &BTreeMap::new()).unwrap_err();
    assert!(matches!(err, ModelError::Schema(_)), "{err}");
}

#[test]
fn equal_requests_hash_equally() {
    let build = |name: &str| {
        registry()
            .builder("CreateThingRequest")
            .unwrap()
            .with("thingName", name)
            .with("billingGroupName", "fleet")
            .build()
            .unwrap()
    };
    let a = build("sensor-01");
    let b = build("sensor-01");
    assert_eq!(a, b);
    assert_eq!(a.structural_hash(), b.structural_hash());
    assert_ne!(a, build("sensor-02"));

    let result = registry()
        .builder("CreateThingResult")
        .unwrap()
        .with("thingName", "sensor-01")
        .build()
        .unwrap();
    let request = registry()
        .builder("CreateThingRequest")
        .unwrap()
        .with("thingName", "sensor-01")
        .build()
        .unwrap();
    assert_ne!(request, result);
}

#[test]
fn validation_is_repeatable() {
    let request = registry()
        .builder("CreatePolicyRequest")
        .unwrap()
        .with("policyName", "has space")
        .put_entry("tags", "ignored", "x")
        .build();
    assert!(matches!(request, Err(ModelError::NotAMap { .. })));

    let tag = registry().builder("Tag").unwrap().with("Value", "v").build().unwrap();
    let request = registry()
        .builder("CreatePolicyRequest")
        .unwrap()
        .with("policyName", "has space")
        .append("tags", tag)
        .build()
        .unwrap();
    let first = request.violations();
    assert_eq!(first, request.violations());
    assert_eq!(
        rules(&first),
        vec![
            ("policyName", Rule::PatternMismatch),
            ("policyDocument", Rule::RequiredMissing),
            ("tags[0].Key", Rule::RequiredMissing),
        ]
    );
}
