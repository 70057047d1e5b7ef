//! HTTP API: whitelisted RPC methods over the GS1 resolver and stock policy.

pub mod app;
pub mod middleware;
