use serde::Serialize;
use serde_json::Value;

use crate::error::{GatewayError, ServiceError};
use crate::outputs::OperationOutput;

/// Dispatcher response body: `result` on success, `err` on backend failure.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResponseEnvelope {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    pub err: String,
}

impl ResponseEnvelope {
    /// Wraps the outcome of one external call.
    ///
    /// A backend error lands in `err`. Failing to serialize a successful
    /// output is not a backend error and is returned as `EncodingFailure`.
    pub fn from_outcome(
        outcome: Result<OperationOutput, ServiceError>,
    ) -> Result<Self, GatewayError> {
        match outcome {
            Ok(output) => Ok(Self {
                result: Some(serde_json::to_value(&output)?),
                err: String::new(),
            }),
            Err(error) => Ok(Self {
                result: None,
                err: error.message().to_string(),
            }),
        }
    }

    pub fn is_success(&self) -> bool {
        self.err.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use serde_json::json;

    use super::*;
    use crate::outputs::ResourceTags;

    #[test]
    fn success_carries_result_and_empty_err() {
        let envelope = ResponseEnvelope::from_outcome(Ok(OperationOutput::ResourceTags(
            ResourceTags {
                tags: BTreeMap::from([("env".to_string(), "prod".to_string())]),
            },
        )))
        .expect("should encode");

        assert!(envelope.is_success());
        assert_eq!(envelope.result, Some(json!({"Tags": {"env": "prod"}})));
        assert_eq!(
            serde_json::to_value(&envelope).expect("should serialize"),
            json!({"result": {"Tags": {"env": "prod"}}, "err": ""})
        );
    }

    #[test]
    fn backend_error_omits_result() {
        let envelope = ResponseEnvelope::from_outcome(Err(ServiceError::new(
            "ValidationException: Start date must be before end date",
        )))
        .expect("should encode");

        assert!(!envelope.is_success());
        assert_eq!(envelope.result, None);
        assert_eq!(
            serde_json::to_value(&envelope).expect("should serialize"),
            json!({"err": "ValidationException: Start date must be before end date"})
        );
    }
}
