use cost_gateway_core::error::GatewayError;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

impl ApiGatewayResponse {
    pub fn body_json(&self) -> Option<Value> {
        serde_json::from_str(&self.body).ok()
    }
}

/// Unwraps an API Gateway proxy event into its JSON payload.
///
/// Bare payloads (no `body` key) pass through unchanged; a null body is an
/// empty object.
pub fn normalize_apigw_event(event: Value) -> Result<Value, String> {
    let Some(object) = event.as_object() else {
        return Err("Request payload must be a JSON object".to_string());
    };

    let Some(body) = object.get("body") else {
        return Ok(event);
    };

    match body {
        Value::Null => Ok(json!({})),
        Value::Object(_) => Ok(body.clone()),
        Value::String(text) => {
            serde_json::from_str(text).map_err(|error| format!("Malformed JSON body: {error}"))
        }
        _ => Err("Request body must be a JSON object".to_string()),
    }
}

/// Serializes `payload` as the response body, or reports an encoding failure
/// as a 500.
pub fn json_response(status_code: u16, payload: &impl Serialize) -> ApiGatewayResponse {
    match serde_json::to_string(payload) {
        Ok(body) => ApiGatewayResponse {
            status_code,
            headers: json!({"Content-Type": "application/json"}),
            body,
        },
        Err(error) => error_response(&GatewayError::EncodingFailure(error)),
    }
}

/// Transport-level failure: `{"error": "<message>"}` with the error's status.
pub fn error_response(error: &GatewayError) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code: error.status_code(),
        headers: json!({"Content-Type": "application/json"}),
        body: json!({ "error": error.to_string() }).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_payload_passes_through() {
        let event = json!({"action": "listTags"});
        assert_eq!(normalize_apigw_event(event.clone()), Ok(event));
    }

    #[test]
    fn string_body_is_parsed() {
        let event = json!({"body": "{\"action\":\"listTags\"}", "httpMethod": "POST"});
        assert_eq!(
            normalize_apigw_event(event),
            Ok(json!({"action": "listTags"}))
        );
    }

    #[test]
    fn null_body_is_empty_object() {
        assert_eq!(normalize_apigw_event(json!({"body": null})), Ok(json!({})));
    }

    #[test]
    fn rejects_unparseable_and_non_object_inputs() {
        assert!(normalize_apigw_event(json!({"body": "{not json"}))
            .expect_err("bad json")
            .starts_with("Malformed JSON body"));
        assert!(normalize_apigw_event(json!({"body": 12})).is_err());
        assert!(normalize_apigw_event(json!("listTags")).is_err());
    }

    #[test]
    fn error_response_uses_error_field_and_status() {
        let response = error_response(&GatewayError::Unauthorized);
        assert_eq!(response.status_code, 401);
        assert_eq!(response.body_json(), Some(json!({"error": "Unauthorized"})));
        assert_eq!(response.headers["Content-Type"], "application/json");
    }

    #[test]
    fn serializes_with_api_gateway_field_names() {
        let response = json_response(200, &json!({"ok": true}));
        let value = serde_json::to_value(&response).expect("should serialize");
        assert_eq!(value["statusCode"], 200);
        assert_eq!(value["body"], "{\"ok\":true}");
    }

    #[test]
    fn unencodable_payload_becomes_encoding_failure() {
        struct Unencodable;

        impl Serialize for Unencodable {
            fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("cannot encode"))
            }
        }

        let response = json_response(200, &Unencodable);
        assert_eq!(response.status_code, 500);
        assert_eq!(
            response.body_json(),
            Some(json!({"error": "failed to encode response: cannot encode"}))
        );
    }
}
