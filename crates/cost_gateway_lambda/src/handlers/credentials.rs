use cost_gateway_core::credentials::{decode_identity, issue_credentials, CallerIdentity};
use cost_gateway_core::error::GatewayError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::CredentialConfig;
use crate::handlers::response::{
    error_response, json_response, normalize_apigw_event, ApiGatewayResponse,
};

/// Credential gate: any undecodable or incomplete identity is a 401.
pub fn handle_credential_event<I>(event: Value, config: &CredentialConfig) -> ApiGatewayResponse
where
    I: CallerIdentity + DeserializeOwned,
{
    let issued = normalize_apigw_event(event)
        .map_err(|_| GatewayError::Unauthorized)
        .and_then(decode_identity::<I>)
        .and_then(|identity| issue_credentials(&identity, config.secrets.as_ref()));

    match issued {
        Ok(credentials) => {
            info!(status_code = 200, "issued credentials");
            json_response(200, &credentials)
        }
        Err(error) => {
            warn!(
                status_code = error.status_code(),
                error = %error,
                "credential request refused"
            );
            error_response(&error)
        }
    }
}
