use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use sha2::{Digest, Sha256};

use crate::error::GatewayError;

/// Inbound dispatcher payload.
///
/// Every field defaults to its empty value, whether absent or `null`; which
/// fields matter is decided by `action`. Missing fields are forwarded as-is
/// and left for the external service to reject.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DispatchRequest {
    #[serde(deserialize_with = "null_as_default")]
    pub action: String,
    #[serde(deserialize_with = "null_as_default")]
    pub granularity_level: Granularity,
    #[serde(deserialize_with = "null_as_default")]
    pub from: String,
    #[serde(deserialize_with = "null_as_default")]
    pub to: String,
    #[serde(deserialize_with = "null_as_default")]
    pub cost_structure: String,
    #[serde(deserialize_with = "null_as_default")]
    pub superstream_cost_explorer_tag: String,
    #[serde(deserialize_with = "null_as_default")]
    pub superstream_cost_explorer_tags: BTreeMap<String, String>,
    #[serde(deserialize_with = "null_as_default")]
    pub superstream_cluster_id: i64,
    #[serde(deserialize_with = "null_as_default")]
    pub cluster_arn: String,
}

impl DispatchRequest {
    pub fn from_value(payload: Value) -> Result<Self, GatewayError> {
        if !payload.is_object() {
            return Err(GatewayError::MalformedInput(
                "request payload must be a JSON object".to_string(),
            ));
        }
        serde_json::from_value(payload)
            .map_err(|error| GatewayError::MalformedInput(error.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    GetCostData,
    ListTags,
    TagResource,
    ListCostAllocationTags,
    UpdateCostAllocationTagsStatus,
    GetPricingData,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::GetCostData,
        Action::ListTags,
        Action::TagResource,
        Action::ListCostAllocationTags,
        Action::UpdateCostAllocationTagsStatus,
        Action::GetPricingData,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::GetCostData => "getCostData",
            Self::ListTags => "listTags",
            Self::TagResource => "tagResource",
            Self::ListCostAllocationTags => "listCostAllocationTags",
            Self::UpdateCostAllocationTagsStatus => "updateCostAllocationTagsStatus",
            Self::GetPricingData => "getPricingData",
        }
    }
}

impl FromStr for Action {
    type Err = GatewayError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| GatewayError::UnsupportedAction(value.to_string()))
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Time bucketing for cost-and-usage queries.
///
/// Parsing is case-insensitive. Unrecognized values (including the empty
/// string) are kept verbatim in `Other` so the backend reports them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Granularity {
    Daily,
    Monthly,
    Hourly,
    Other(String),
}

impl Granularity {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Daily => "DAILY",
            Self::Monthly => "MONTHLY",
            Self::Hourly => "HOURLY",
            Self::Other(raw) => raw,
        }
    }
}

impl Default for Granularity {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<String> for Granularity {
    fn from(value: String) -> Self {
        match value.to_ascii_uppercase().as_str() {
            "DAILY" => Self::Daily,
            "MONTHLY" => Self::Monthly,
            "HOURLY" => Self::Hourly,
            _ => Self::Other(value),
        }
    }
}

impl From<Granularity> for String {
    fn from(value: Granularity) -> Self {
        value.as_str().to_string()
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// SHA-256 of the request's canonical JSON, used to correlate log lines.
pub fn request_fingerprint(request: &DispatchRequest) -> String {
    let mut hasher = Sha256::new();
    // Field order is fixed by the struct and tags are a BTreeMap, so the
    // encoding is stable.
    hasher.update(serde_json::to_vec(request).unwrap_or_default());
    format!("{:x}", hasher.finalize())
}
