//! OpenAI Responses API access.

pub mod client;
pub mod json;
pub mod response;

pub use client::{ClientConfig, ResponsesClient};
pub use json::find_json_object;
pub use response::{GeneratedMessage, ResponsesEnvelope};
