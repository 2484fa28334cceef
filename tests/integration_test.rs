//! End-to-end tests for the fleet manager function

use serde_json::{json, Value};
use xfleetmanager::document::Lookup;
use xfleetmanager::protocol::{ConditionStatus, Severity, Target};
use xfleetmanager::{FleetManagerFunction, FunctionRunner, Outcome, RunFunctionRequest};

fn request(params: Value) -> RunFunctionRequest {
    serde_json::from_value(json!({
        "meta": {"tag": "it"},
        "observed": {
            "composite": {
                "resource": {
                    "apiVersion": "example.crossplane.io/v1alpha1",
                    "kind": "XFleetManager",
                    "metadata": {"name": "fleet"},
                    "spec": {"parameters": params}
                }
            }
        }
    }))
    .unwrap()
}

fn at<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(doc, |node, name| node.field(name))
}

#[test]
fn test_end_to_end_scenario() {
    let function = FleetManagerFunction::default();
    let req = request(json!({
        "fleetName": "prod-web",
        "region": "us-east-1",
        "instanceCount": 5,
        "environment": "prod",
        "tags": {"team": "infra"}
    }));

    let rsp = function.run_function(&req);

    assert_eq!(rsp.outcome(), Outcome::Success);
    assert_eq!(rsp.conditions.len(), 1);
    let condition = &rsp.conditions[0];
    assert_eq!(condition.condition_type, "FunctionSuccess");
    assert_eq!(condition.status, ConditionStatus::True);
    assert_eq!(condition.reason, "Success");
    assert_eq!(condition.target, Target::CompositeAndClaim);
    assert!(rsp.results.is_empty());

    let resources = &rsp.desired.as_ref().unwrap().resources;
    assert_eq!(resources.keys().collect::<Vec<_>>(), vec!["prod-web-fleet-manager"]);

    let doc = rsp.desired_resource("prod-web-fleet-manager").unwrap();
    assert_eq!(at(doc, "apiVersion"), Some(&json!("nop.crossplane.io/v1alpha1")));
    assert_eq!(at(doc, "kind"), Some(&json!("NopResource")));
    assert_eq!(at(doc, "metadata.name"), Some(&json!("prod-web-fleet-manager")));
    assert_eq!(
        at(doc, "metadata.annotations"),
        Some(&json!({
            "crossplane.io/external-name": "prod-web-fleet-manager",
            "crossplane.io/composition-resource-name": "fleet-manager"
        }))
    );
    assert_eq!(
        at(doc, "spec.forProvider.fields"),
        Some(&json!({
            "fleetName": "prod-web",
            "region": "us-east-1",
            "instanceCount": 5,
            "environment": "prod",
            "tags": {"team": "infra"}
        }))
    );
    assert_eq!(
        at(doc, "spec.forProvider.conditionAfter"),
        Some(&json!([{"conditionType": "Ready", "conditionStatus": "True", "time": "10s"}]))
    );
}

#[test]
fn test_repeated_invocations_are_byte_identical() {
    let function = FleetManagerFunction::default();
    let req = request(json!({
        "fleetName": "web",
        "region": "eu-central-1",
        "tags": {"b": "2", "a": "1", "c": "3"}
    }));

    let first = serde_json::to_vec(&function.run_function(&req)).unwrap();
    let second = serde_json::to_vec(&function.run_function(&req)).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_same_fleet_name_same_key() {
    let function = FleetManagerFunction::default();

    let a = function.run_function(&request(json!({"fleetName": "web", "region": "us-east-1"})));
    let b = function.run_function(&request(json!({
        "fleetName": "web", "region": "ap-south-1", "environment": "staging"
    })));

    assert!(a.desired_resource("web-fleet-manager").is_some());
    assert!(b.desired_resource("web-fleet-manager").is_some());
}

#[test]
fn test_missing_fleet_name_is_fatal() {
    let rsp = FleetManagerFunction::default()
        .run_function(&request(json!({"region": "us-east-1"})));

    match rsp.outcome() {
        Outcome::Fatal(message) => assert!(message.contains("fleetName")),
        other => panic!("expected fatal outcome, got {:?}", other),
    }
    assert_eq!(rsp.results.len(), 1);
    assert_eq!(rsp.results[0].severity, Severity::Fatal);
    assert!(rsp.desired.is_none());
    assert!(rsp.conditions.is_empty());
}

#[test]
fn test_missing_region_is_fatal() {
    let rsp = FleetManagerFunction::default()
        .run_function(&request(json!({"fleetName": "web"})));

    assert_eq!(rsp.outcome(), Outcome::Fatal("region is required"));
    assert!(rsp.desired.is_none());
}

#[test]
fn test_defaults_embedded() {
    let rsp = FleetManagerFunction::default()
        .run_function(&request(json!({"fleetName": "web", "region": "us-east-1"})));
    let doc = rsp.desired_resource("web-fleet-manager").unwrap();

    assert_eq!(at(doc, "spec.forProvider.fields.instanceCount"), Some(&json!(3)));
    assert_eq!(at(doc, "spec.forProvider.fields.environment"), Some(&json!("dev")));
    assert_eq!(at(doc, "spec.forProvider.fields.tags"), Some(&Value::Null));
}

#[test]
fn test_instance_count_truncated_not_rounded() {
    let rsp = FleetManagerFunction::default().run_function(&request(json!({
        "fleetName": "web", "region": "us-east-1", "instanceCount": 4.9
    })));
    let doc = rsp.desired_resource("web-fleet-manager").unwrap();

    assert_eq!(at(doc, "spec.forProvider.fields.instanceCount"), Some(&json!(4)));
}

// Lenient narrowing of wrong-kind optionals is existing behaviour; this test
// pins it so a change to strict validation is a deliberate one.
#[test]
fn test_wrong_kind_environment_becomes_empty_string() {
    let rsp = FleetManagerFunction::default().run_function(&request(json!({
        "fleetName": "web", "region": "us-east-1", "environment": ["prod"]
    })));

    assert_eq!(rsp.outcome(), Outcome::Success);
    let doc = rsp.desired_resource("web-fleet-manager").unwrap();
    assert_eq!(at(doc, "spec.forProvider.fields.environment"), Some(&json!("")));
}

#[test]
fn test_desired_state_from_request_is_preserved() {
    let mut req = request(json!({"fleetName": "web", "region": "us-east-1"}));
    req.desired = serde_json::from_value(json!({
        "composite": {"resource": {"status": {"phase": "Provisioning"}}},
        "resources": {
            "bucket": {"resource": {"kind": "Bucket"}, "ready": "READY_TRUE"},
            "web-fleet-manager": {"resource": {"kind": "Stale"}}
        }
    }))
    .unwrap();

    let rsp = FleetManagerFunction::default().run_function(&req);
    let desired = rsp.desired.as_ref().unwrap();

    assert_eq!(desired.resources.len(), 2);
    assert_eq!(rsp.desired_resource("bucket"), Some(&json!({"kind": "Bucket"})));
    assert_eq!(
        rsp.desired_resource("web-fleet-manager").and_then(|d| at(d, "kind")),
        Some(&json!("NopResource"))
    );
    assert!(desired.composite.is_some());
}

#[test]
fn test_response_wire_format() {
    let rsp = FleetManagerFunction::default().run_function(&request(json!({"region": "r"})));

    assert_eq!(
        serde_json::to_value(&rsp).unwrap(),
        json!({
            "meta": {"tag": "it", "ttl": "60s"},
            "results": [{
                "severity": "SEVERITY_FATAL",
                "message": "fleetName is required",
                "target": "TARGET_COMPOSITE"
            }]
        })
    );
}

#[test]
fn test_yaml_request_document() {
    let yaml = r#"
meta:
  tag: yaml
observed:
  composite:
    resource:
      spec:
        parameters:
          fleetName: batch
          region: us-west-2
          instanceCount: 7
"#;
    let req = RunFunctionRequest::from_document(yaml).unwrap();

    let rsp = FleetManagerFunction::default().run_function(&req);

    assert_eq!(rsp.meta.tag, "yaml");
    let doc = rsp.desired_resource("batch-fleet-manager").unwrap();
    assert_eq!(at(doc, "spec.forProvider.fields.instanceCount"), Some(&json!(7)));
}

#[test]
fn test_concurrent_invocations_share_no_state() {
    let function = std::sync::Arc::new(FleetManagerFunction::default());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let function = function.clone();
            std::thread::spawn(move || {
                let name = format!("fleet-{}", i);
                let rsp = function.run_function(&request(json!({"fleetName": name.as_str(), "region": "r"})));
                (name, rsp)
            })
        })
        .collect();

    for handle in handles {
        let (name, rsp) = handle.join().unwrap();
        let desired = rsp.desired.as_ref().unwrap();
        assert_eq!(desired.resources.len(), 1);
        assert!(desired.resources.contains_key(&format!("{}-fleet-manager", name)));
    }
}
