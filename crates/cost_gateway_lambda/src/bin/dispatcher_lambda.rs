use cost_gateway_lambda::adapters::aws::AwsControlPlane;
use cost_gateway_lambda::config::ControlPlaneConfig;
use cost_gateway_lambda::handlers::dispatch::handle_dispatch_event;
use cost_gateway_lambda::handlers::response::ApiGatewayResponse;
use cost_gateway_lambda::telemetry::init_tracing;
use lambda_runtime::{service_fn, Error, LambdaEvent};
use serde_json::Value;

async fn handle_request(
    event: LambdaEvent<Value>,
    config: &ControlPlaneConfig,
) -> Result<ApiGatewayResponse, Error> {
    // Client handles are scoped to the invocation and dropped with it.
    let control_plane = AwsControlPlane::load(config).await;
    Ok(handle_dispatch_event(event.payload, &control_plane))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    init_tracing();
    let config = ControlPlaneConfig::from_env();
    let config = &config;
    lambda_runtime::run(service_fn(move |event| handle_request(event, config))).await
}
