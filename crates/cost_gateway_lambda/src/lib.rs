//! AWS-facing handlers and adapters for the cost gateway.
//!
//! This crate owns runtime integration details (Lambda handlers, API Gateway
//! event unwrapping, Cost Explorer and MSK clients, environment configuration
//! and log setup). Provider-neutral contracts and builders live in
//! `cost_gateway_core`.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod telemetry;
