//! Credential gate rules shared by the credential-issuing handlers.
//!
//! A gate decodes a caller identity pair, checks that both halves are
//! present, and echoes the deployment's static key pair back.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GatewayError;

pub trait CallerIdentity {
    fn is_present(&self) -> bool;
}

/// Numeric account/connection pair; both ids must be positive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NumericIdentity {
    pub account_id: i64,
    pub connection_id: i64,
}

impl CallerIdentity for NumericIdentity {
    fn is_present(&self) -> bool {
        self.account_id > 0 && self.connection_id > 0
    }
}

/// String account/connection pair; both must be non-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct NamedIdentity {
    pub account_id: String,
    pub connection_id: String,
}

impl CallerIdentity for NamedIdentity {
    fn is_present(&self) -> bool {
        !self.account_id.is_empty() && !self.connection_id.is_empty()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct CredentialSecrets {
    pub key_id: String,
    pub key_secret: String,
}

impl std::fmt::Debug for CredentialSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialSecrets")
            .field("key_id", &"<redacted>")
            .field("key_secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssuedCredentials {
    pub key_id: String,
    pub key_secret: String,
}

/// Any decode failure is reported as `Unauthorized`, never as malformed input.
pub fn decode_identity<I: DeserializeOwned>(payload: Value) -> Result<I, GatewayError> {
    serde_json::from_value(payload).map_err(|_| GatewayError::Unauthorized)
}

pub fn issue_credentials(
    identity: &impl CallerIdentity,
    secrets: Option<&CredentialSecrets>,
) -> Result<IssuedCredentials, GatewayError> {
    if !identity.is_present() {
        return Err(GatewayError::Unauthorized);
    }

    let secrets = secrets.ok_or(GatewayError::MissingConfiguration)?;
    Ok(IssuedCredentials {
        key_id: secrets.key_id.clone(),
        key_secret: secrets.key_secret.clone(),
    })
}
