//! Per-action request builders.
//!
//! Each [`Action`] maps to exactly one [`Operation`]. The operation structs
//! are provider-neutral; the Lambda crate translates them into SDK calls.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::contract::{Action, DispatchRequest, Granularity};
use crate::error::GatewayError;

/// Tag key the cost filter matches on.
pub const COST_EXPLORER_TAG_KEY: &str = "SuperstreamCostExplorerTag";
pub const AMORTIZED_COST_METRIC: &str = "AmortizedCost";
pub const USAGE_QUANTITY_METRIC: &str = "UsageQuantity";
pub const ACTIVE_TAG_STATUS: &str = "Active";
pub const COST_GROUP_DIMENSIONS: [GroupDimension; 2] =
    [GroupDimension::Service, GroupDimension::UsageType];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    CostAndUsage(CostAndUsageQuery),
    ListTagsForResource(ResourceTagsQuery),
    TagResource(TagResourceRequest),
    ListCostAllocationTags(CostAllocationTagQuery),
    UpdateCostAllocationTagsStatus(CostAllocationTagStatusUpdate),
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Self::CostAndUsage(_) => "GetCostAndUsage",
            Self::ListTagsForResource(_) => "ListTagsForResource",
            Self::TagResource(_) => "TagResource",
            Self::ListCostAllocationTags(_) => "ListCostAllocationTags",
            Self::UpdateCostAllocationTagsStatus(_) => "UpdateCostAllocationTagsStatus",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DateRange {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOption {
    Equals,
}

impl MatchOption {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "EQUALS",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagFilter {
    pub key: String,
    pub values: Vec<String>,
    pub match_options: Vec<MatchOption>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupDimension {
    Service,
    UsageType,
}

impl GroupDimension {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Service => "SERVICE",
            Self::UsageType => "USAGE_TYPE",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostAndUsageQuery {
    pub time_period: DateRange,
    pub granularity: Granularity,
    pub metrics: Vec<String>,
    pub filter: TagFilter,
    pub group_by: Vec<GroupDimension>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTagsQuery {
    pub resource_arn: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagResourceRequest {
    pub resource_arn: String,
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostAllocationTagQuery {
    pub tag_keys: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostAllocationTagStatusUpdate {
    pub tag_key: String,
    pub status: String,
}

impl Action {
    pub fn build_operation(self, request: &DispatchRequest) -> Operation {
        match self {
            Self::GetCostData => Operation::CostAndUsage(tag_filtered_cost_query(
                request,
                request.granularity_level.clone(),
                vec![request.cost_structure.clone()],
            )),
            Self::GetPricingData => Operation::CostAndUsage(tag_filtered_cost_query(
                request,
                Granularity::Monthly,
                vec![
                    AMORTIZED_COST_METRIC.to_string(),
                    USAGE_QUANTITY_METRIC.to_string(),
                ],
            )),
            Self::ListTags => Operation::ListTagsForResource(ResourceTagsQuery {
                resource_arn: request.cluster_arn.clone(),
            }),
            Self::TagResource => Operation::TagResource(TagResourceRequest {
                resource_arn: request.cluster_arn.clone(),
                tags: request.superstream_cost_explorer_tags.clone(),
            }),
            Self::ListCostAllocationTags => {
                Operation::ListCostAllocationTags(CostAllocationTagQuery {
                    tag_keys: vec![request.superstream_cost_explorer_tag.clone()],
                })
            }
            Self::UpdateCostAllocationTagsStatus => {
                Operation::UpdateCostAllocationTagsStatus(CostAllocationTagStatusUpdate {
                    tag_key: request.superstream_cost_explorer_tag.clone(),
                    status: ACTIVE_TAG_STATUS.to_string(),
                })
            }
        }
    }
}

/// Resolves the request's action and builds its operation.
///
/// Fails with `UnsupportedAction` before anything is built when the action is
/// outside the closed set.
pub fn route(request: &DispatchRequest) -> Result<(Action, Operation), GatewayError> {
    let action: Action = request.action.parse()?;
    Ok((action, action.build_operation(request)))
}

/// Cost query filtered to the cluster's cost-explorer tag and grouped by
/// service and usage type.
pub fn tag_filtered_cost_query(
    request: &DispatchRequest,
    granularity: Granularity,
    metrics: Vec<String>,
) -> CostAndUsageQuery {
    CostAndUsageQuery {
        time_period: DateRange {
            start: request.from.clone(),
            end: request.to.clone(),
        },
        granularity,
        metrics,
        filter: cluster_tag_filter(request.superstream_cluster_id),
        group_by: COST_GROUP_DIMENSIONS.to_vec(),
    }
}

/// The backend compares tag values as exact strings, so the cluster id is
/// rendered in plain decimal.
pub fn cluster_tag_filter(cluster_id: i64) -> TagFilter {
    TagFilter {
        key: COST_EXPLORER_TAG_KEY.to_string(),
        values: vec![cluster_id.to_string()],
        match_options: vec![MatchOption::Equals],
    }
}
