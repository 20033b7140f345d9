pub mod backend;
pub mod http;
pub mod types;

pub use backend::{ChatBackend, TransportError};
pub use http::HttpBackend;
pub use types::{ChatRequest, ChatResponse};
