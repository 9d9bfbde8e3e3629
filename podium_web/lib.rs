pub mod handlers;
mod http;
pub mod payloads;
pub mod publisher;

pub use http::*;
