//! NOTEKEEPER Telemetry
//!
//! Structured logging through `tracing`. HTTP request spans come from
//! tower-http's `TraceLayer` in the router.

pub mod tracer;

pub use tracer::{default_filter, init_tracing};
