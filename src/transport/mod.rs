//! HTTP plumbing shared by every backend call: client construction from
//! [`StudioConfig`](crate::config::StudioConfig) and response classification.

mod http;

pub use http::{remote_error, HttpTransport, TransportError};
