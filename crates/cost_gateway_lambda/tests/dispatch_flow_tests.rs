use std::collections::BTreeMap;
use std::sync::Mutex;

use cost_gateway_core::contract::Granularity;
use cost_gateway_core::error::ServiceError;
use cost_gateway_core::operations::{
    CostAllocationTagQuery, CostAllocationTagStatusUpdate, CostAndUsageQuery, GroupDimension,
    MatchOption, Operation, ResourceTagsQuery, TagResourceRequest,
};
use cost_gateway_core::outputs::{
    CostAllocationTagListing, CostAllocationTagsStatusUpdate, CostAndUsageReport,
    OperationOutput, ResourceTagged, ResourceTags,
};
use cost_gateway_lambda::adapters::control_plane::ControlPlane;
use cost_gateway_lambda::handlers::dispatch::handle_dispatch_event;
use serde_json::{json, Value};

const CLUSTER_ARN: &str = "arn:aws:kafka:eu-central-1:111122223333:cluster/payments/5a1b";

/// Records every operation and answers with an empty output of the matching
/// shape.
struct RecordingControlPlane {
    operations: Mutex<Vec<Operation>>,
}

impl RecordingControlPlane {
    fn new() -> Self {
        Self {
            operations: Mutex::new(Vec::new()),
        }
    }

    fn single_operation(&self) -> Operation {
        let operations = self.operations.lock().expect("poisoned mutex");
        assert_eq!(operations.len(), 1, "exactly one external call expected");
        operations[0].clone()
    }
}

impl ControlPlane for RecordingControlPlane {
    fn invoke(&self, operation: &Operation) -> Result<OperationOutput, ServiceError> {
        self.operations
            .lock()
            .expect("poisoned mutex")
            .push(operation.clone());

        Ok(match operation {
            Operation::CostAndUsage(_) => {
                OperationOutput::CostAndUsage(CostAndUsageReport::default())
            }
            Operation::ListTagsForResource(_) => OperationOutput::ResourceTags(ResourceTags {
                tags: BTreeMap::from([("team".to_string(), "streaming".to_string())]),
            }),
            Operation::TagResource(_) => OperationOutput::ResourceTagged(ResourceTagged {}),
            Operation::ListCostAllocationTags(_) => {
                OperationOutput::CostAllocationTags(CostAllocationTagListing::default())
            }
            Operation::UpdateCostAllocationTagsStatus(_) => {
                OperationOutput::CostAllocationTagsStatusUpdated(
                    CostAllocationTagsStatusUpdate::default(),
                )
            }
        })
    }
}

fn payload(action: &str) -> Value {
    json!({
        "action": action,
        "granularity_level": "DAILY",
        "from": "2024-05-01",
        "to": "2024-06-01",
        "cost_structure": "BlendedCost",
        "superstream_cost_explorer_tag": "SuperstreamCostExplorerTag",
        "superstream_cost_explorer_tags": {"SuperstreamCostExplorerTag": "7", "env": "prod"},
        "superstream_cluster_id": 7,
        "cluster_arn": CLUSTER_ARN
    })
}

fn dispatch(action: &str) -> (Value, Operation) {
    let control_plane = RecordingControlPlane::new();
    let event = json!({ "body": payload(action).to_string() });
    let response = handle_dispatch_event(event, &control_plane);
    assert_eq!(response.status_code, 200, "action {action} should succeed");

    let body = response.body_json().expect("body should be json");
    assert_eq!(body["err"], "");
    assert!(body.get("result").is_some(), "result should be present");
    (body, control_plane.single_operation())
}

fn cost_query(operation: Operation) -> CostAndUsageQuery {
    match operation {
        Operation::CostAndUsage(query) => query,
        other => panic!("expected cost query, got {other:?}"),
    }
}

#[test]
fn get_cost_data_forwards_caller_range_granularity_and_metric() {
    let (_, operation) = dispatch("getCostData");
    let query = cost_query(operation);

    assert_eq!(query.time_period.start, "2024-05-01");
    assert_eq!(query.time_period.end, "2024-06-01");
    assert_eq!(query.granularity, Granularity::Daily);
    assert_eq!(query.metrics, vec!["BlendedCost".to_string()]);
    assert_eq!(query.filter.key, "SuperstreamCostExplorerTag");
    assert_eq!(query.filter.values, vec!["7".to_string()]);
    assert_eq!(query.filter.match_options, vec![MatchOption::Equals]);
    assert_eq!(
        query.group_by,
        vec![GroupDimension::Service, GroupDimension::UsageType]
    );
}

#[test]
fn get_pricing_data_is_monthly_with_fixed_metrics() {
    let (_, operation) = dispatch("getPricingData");
    let query = cost_query(operation);

    assert_eq!(query.granularity, Granularity::Monthly);
    assert_eq!(
        query.metrics,
        vec!["AmortizedCost".to_string(), "UsageQuantity".to_string()]
    );
    assert_eq!(query.filter.values, vec!["7".to_string()]);
    assert_eq!(query.time_period.start, "2024-05-01");
}

#[test]
fn list_tags_returns_tags_in_result() {
    let (body, operation) = dispatch("listTags");

    assert_eq!(
        operation,
        Operation::ListTagsForResource(ResourceTagsQuery {
            resource_arn: CLUSTER_ARN.to_string(),
        })
    );
    assert_eq!(body["result"], json!({"Tags": {"team": "streaming"}}));
}

#[test]
fn tag_resource_applies_caller_mapping() {
    let (body, operation) = dispatch("tagResource");

    assert_eq!(
        operation,
        Operation::TagResource(TagResourceRequest {
            resource_arn: CLUSTER_ARN.to_string(),
            tags: BTreeMap::from([
                ("SuperstreamCostExplorerTag".to_string(), "7".to_string()),
                ("env".to_string(), "prod".to_string()),
            ]),
        })
    );
    assert_eq!(body["result"], json!({}));
}

#[test]
fn cost_allocation_tag_actions_use_the_named_key() {
    let (_, operation) = dispatch("listCostAllocationTags");
    assert_eq!(
        operation,
        Operation::ListCostAllocationTags(CostAllocationTagQuery {
            tag_keys: vec!["SuperstreamCostExplorerTag".to_string()],
        })
    );

    let (_, operation) = dispatch("updateCostAllocationTagsStatus");
    assert_eq!(
        operation,
        Operation::UpdateCostAllocationTagsStatus(CostAllocationTagStatusUpdate {
            tag_key: "SuperstreamCostExplorerTag".to_string(),
            status: "Active".to_string(),
        })
    );
}

#[test]
fn null_fields_still_route_to_one_operation() {
    let control_plane = RecordingControlPlane::new();
    let event = json!({
        "action": "listTags",
        "cluster_arn": CLUSTER_ARN,
        "superstream_cost_explorer_tags": null,
        "granularity_level": null,
        "cost_structure": null,
        "superstream_cluster_id": null
    });
    let response = handle_dispatch_event(event, &control_plane);

    assert_eq!(response.status_code, 200);
    assert_eq!(
        control_plane.single_operation(),
        Operation::ListTagsForResource(ResourceTagsQuery {
            resource_arn: CLUSTER_ARN.to_string(),
        })
    );

    let control_plane = RecordingControlPlane::new();
    let mut event = payload("getCostData");
    event["granularity_level"] = Value::Null;
    let response = handle_dispatch_event(event, &control_plane);

    assert_eq!(response.status_code, 200);
    let query = cost_query(control_plane.single_operation());
    assert_eq!(query.granularity.as_str(), "");
}

#[test]
fn unsupported_action_never_reaches_the_backend() {
    let control_plane = RecordingControlPlane::new();
    let response = handle_dispatch_event(payload("getInvoices"), &control_plane);

    assert_eq!(response.status_code, 500);
    assert_eq!(
        response.body_json(),
        Some(json!({"error": "unsupported action: getInvoices"}))
    );
    assert!(control_plane
        .operations
        .lock()
        .expect("poisoned mutex")
        .is_empty());
}

#[test]
fn backend_failure_is_reported_in_err_with_status_200() {
    struct FailingControlPlane;

    impl ControlPlane for FailingControlPlane {
        fn invoke(&self, _operation: &Operation) -> Result<OperationOutput, ServiceError> {
            Err(ServiceError::new(
                "operation error Cost Explorer: GetCostAndUsage, DataUnavailableException",
            ))
        }
    }

    let response = handle_dispatch_event(payload("getCostData"), &FailingControlPlane);
    assert_eq!(response.status_code, 200);
    assert_eq!(
        response.body_json(),
        Some(json!({
            "err": "operation error Cost Explorer: GetCostAndUsage, DataUnavailableException"
        }))
    );
}
