//! Adapters for external dependencies.

pub mod hints_http;
pub mod memory;
pub mod rounds_sea;
