use cost_gateway_core::error::ServiceError;
use cost_gateway_core::operations::Operation;
use cost_gateway_core::outputs::OperationOutput;

/// The cost/billing and resource-tagging backend.
///
/// One call per operation; implementations must not retry.
pub trait ControlPlane {
    fn invoke(&self, operation: &Operation) -> Result<OperationOutput, ServiceError>;
}
