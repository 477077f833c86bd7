//! Serializable views of external operation results.
//!
//! Field names follow the backend's PascalCase wire style so the envelope's
//! `result` reads the same as the provider's own JSON.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::operations::DateRange;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OperationOutput {
    CostAndUsage(CostAndUsageReport),
    ResourceTags(ResourceTags),
    ResourceTagged(ResourceTagged),
    CostAllocationTags(CostAllocationTagListing),
    CostAllocationTagsStatusUpdated(CostAllocationTagsStatusUpdate),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostAndUsageReport {
    pub group_definitions: Vec<GroupDefinitionView>,
    pub results_by_time: Vec<ResultByTimeView>,
    pub dimension_value_attributes: Vec<DimensionValueAttributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct GroupDefinitionView {
    pub key: Option<String>,
    #[serde(rename = "Type")]
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResultByTimeView {
    pub time_period: Option<DateRange>,
    pub total: BTreeMap<String, MetricAmount>,
    pub groups: Vec<CostGroup>,
    pub estimated: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostGroup {
    pub keys: Vec<String>,
    pub metrics: BTreeMap<String, MetricAmount>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct MetricAmount {
    pub amount: Option<String>,
    pub unit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct DimensionValueAttributes {
    pub value: Option<String>,
    pub attributes: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ResourceTags {
    pub tags: BTreeMap<String, String>,
}

/// Tagging returns no body; serialized as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResourceTagged {}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostAllocationTagListing {
    pub cost_allocation_tags: Vec<CostAllocationTagView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_token: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostAllocationTagView {
    pub tag_key: String,
    #[serde(rename = "Type")]
    pub kind: String,
    pub status: String,
    pub last_updated_date: Option<String>,
    pub last_used_date: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostAllocationTagsStatusUpdate {
    pub errors: Vec<CostAllocationTagUpdateError>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct CostAllocationTagUpdateError {
    pub tag_key: Option<String>,
    pub code: Option<String>,
    pub message: Option<String>,
}
