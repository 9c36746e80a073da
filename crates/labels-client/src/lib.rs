mod blocking;
mod client;
mod error;
mod http;
mod memory;
pub mod transport;

pub use blocking::BlockingLabelClient;
pub use client::LabelClient;
pub use error::ClientError;
pub use http::{HttpConfig, HttpTransport};
pub use memory::MemoryTransport;
pub use transport::{Method, Request, Response, StatusCategory, Transport, TransportError};
