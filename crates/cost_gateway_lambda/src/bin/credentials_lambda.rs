use cost_gateway_core::credentials::NumericIdentity;
use cost_gateway_lambda::config::CredentialConfig;
use cost_gateway_lambda::handlers::credentials::handle_credential_event;
use cost_gateway_lambda::handlers::response::ApiGatewayResponse;
use cost_gateway_lambda::telemetry::init_tracing;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(
    event: LambdaEvent<Value>,
    config: &CredentialConfig,
) -> Result<ApiGatewayResponse, Error> {
    Ok(handle_credential_event::<NumericIdentity>(event.payload, config))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();
    let config = CredentialConfig::from_env();
    let config = &config;
    lambda_runtime::run(service_fn(move |event| handle_request(event, config))).await
}
