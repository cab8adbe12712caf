//! Shared test utilities for integration tests

pub mod mcp_harness;
