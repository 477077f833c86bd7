use std::time::Instant;

use cost_gateway_core::contract::{request_fingerprint, DispatchRequest};
use cost_gateway_core::envelope::ResponseEnvelope;
use cost_gateway_core::error::GatewayError;
use cost_gateway_core::operations::route;
use serde_json::Value;
use tracing::{error, info, warn};

use crate::adapters::control_plane::ControlPlane;
use crate::handlers::response::{
    error_response, json_response, normalize_apigw_event, ApiGatewayResponse,
};

/// Decodes, routes, invokes and normalizes one dispatcher request.
///
/// Malformed payloads and unknown actions never reach `control_plane`.
/// Backend errors come back as a 200 envelope with `err` set.
pub fn handle_dispatch_event(
    event: Value,
    control_plane: &dyn ControlPlane,
) -> ApiGatewayResponse {
    let started_at = Instant::now();

    let request = match normalize_apigw_event(event)
        .map_err(GatewayError::MalformedInput)
        .and_then(DispatchRequest::from_value)
    {
        Ok(value) => value,
        Err(error) => {
            warn!(error = %error, "rejected malformed dispatch request");
            return error_response(&error);
        }
    };

    let fingerprint = request_fingerprint(&request);
    let (action, operation) = match route(&request) {
        Ok(value) => value,
        Err(error) => {
            warn!(
                action = %request.action,
                request_fingerprint = %fingerprint,
                error = %error,
                "rejected dispatch request"
            );
            return error_response(&error);
        }
    };

    info!(
        action = action.as_str(),
        operation = operation.name(),
        request_fingerprint = %fingerprint,
        "dispatching action"
    );

    let outcome = control_plane.invoke(&operation);
    if let Err(error) = &outcome {
        warn!(
            action = action.as_str(),
            operation = operation.name(),
            error = %error,
            "external service call failed"
        );
    }

    let envelope = match ResponseEnvelope::from_outcome(outcome) {
        Ok(value) => value,
        Err(error) => {
            error!(action = action.as_str(), error = %error, "failed to encode result");
            return error_response(&error);
        }
    };

    info!(
        action = action.as_str(),
        status_code = 200,
        success = envelope.is_success(),
        duration_ms = started_at.elapsed().as_millis() as u64,
        "dispatch completed"
    );
    json_response(200, &envelope)
}
