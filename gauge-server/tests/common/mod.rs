//! Shared infrastructure for gauge-server integration tests.

pub mod server;

pub use server::TestServer;
