//! stagewise - drafts commit messages from staged git changes.
//!
//! # Overview
//!
//! stagewise collects the staged diff of each requested file, reduces it to
//! hunk headers and changed lines, and asks the OpenAI Responses API to turn
//! it into a structured commit message.

pub mod collect;
pub mod config;
pub mod error;
pub mod openai;
pub mod prompt;

// Re-export commonly used types
pub use collect::{ChangeRecord, ChangeSet, ChangeType, FileOutcome};
pub use config::{Overrides, Settings};
pub use error::{CollectError, ConfigError, PromptError, RequestError};
pub use openai::{ClientConfig, GeneratedMessage, ResponsesClient};
