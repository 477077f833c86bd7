//! Provider-neutral primitives for the cost gateway.
//!
//! This crate owns the dispatcher's request/response contracts, the closed
//! action set and the per-action operation builders, plus the credential gate
//! rules. It intentionally excludes AWS SDK and Lambda runtime concerns; those
//! live in `cost_gateway_lambda`.

pub mod contract;
pub mod credentials;
pub mod envelope;
pub mod error;
pub mod operations;
pub mod outputs;
