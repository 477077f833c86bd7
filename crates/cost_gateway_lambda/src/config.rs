//! Environment configuration, read once per cold start.
//!
//! Empty values are treated the same as unset ones.

use cost_gateway_core::credentials::CredentialSecrets;

pub const KEY_ID_ENV: &str = "KEY_ID";
pub const KEY_SECRET_ENV: &str = "KEY_SECRET";
pub const COST_EXPLORER_ENDPOINT_ENV: &str = "COST_EXPLORER_ENDPOINT_URL";
pub const KAFKA_ENDPOINT_ENV: &str = "KAFKA_ENDPOINT_URL";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CredentialConfig {
    /// `None` unless both `KEY_ID` and `KEY_SECRET` are set.
    pub secrets: Option<CredentialSecrets>,
}

impl CredentialConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let key_id = non_empty(lookup(KEY_ID_ENV));
        let key_secret = non_empty(lookup(KEY_SECRET_ENV));

        let secrets = match (key_id, key_secret) {
            (Some(key_id), Some(key_secret)) => Some(CredentialSecrets { key_id, key_secret }),
            _ => None,
        };
        Self { secrets }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlPlaneConfig {
    pub cost_explorer_endpoint: Option<String>,
    pub kafka_endpoint: Option<String>,
}

impl ControlPlaneConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            cost_explorer_endpoint: non_empty(lookup(COST_EXPLORER_ENDPOINT_ENV)),
            kafka_endpoint: non_empty(lookup(KAFKA_ENDPOINT_ENV)),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
