//! Endpoint client: list, load, and unload models on a TabbyAPI-compatible server.

mod client;
mod error;
mod types;

#[cfg(test)]
pub(crate) mod test_server;

pub use client::EndpointClient;
pub use types::{CONTEXT_SIZES, CacheMode, LoadRequest, ModelDescriptor};
