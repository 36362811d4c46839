// Profile API infra.
// - `http_client.rs` talks to the remote profile / anti-cheat service.
// - `in_memory.rs` fakes that service for tests.

#[path = "http_client.rs"]
pub mod http_client;

#[cfg(test)]
#[path = "in_memory.rs"]
pub mod in_memory;

pub use http_client::{ApiConfig, ProfileApiClient};
