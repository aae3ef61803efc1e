//! Client side of the remote key-value store

mod client;
mod data;

pub use self::client::{Error, TcpTransport};
pub use self::data::{Op, Request, Response};
use crate::Result;

/// Carries one request to the remote store and brings back its response.
///
/// Implementations are cloned onto worker threads, one clone per outstanding request.
pub trait Transport: Clone + Send + 'static {
    /// Send `request` and wait for the single response to it.
    fn send(&self, request: &Request) -> Result<Response>;
}
