//! Error types for stagewise modules using thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from settings resolution.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("OPENAI_API_KEY environment variable is not set")]
    MissingCredential,
}

/// Errors from git queries made while collecting staged changes.
#[derive(Error, Debug)]
pub enum CollectError {
    #[error("git not found. Install git and make sure it is on PATH")]
    GitNotInstalled,

    #[error("Not a git repository: {0}")]
    NotARepository(#[source] git2::Error),

    #[error("Repository has no working directory (bare repository)")]
    BareRepository,

    #[error("Failed to spawn git: {0}")]
    SpawnFailed(#[source] std::io::Error),

    /// `status` is the rendered exit status, so signal termination stays visible.
    #[error("git failed ({status}): {stderr}")]
    NonZeroExit { status: String, stderr: String },
}

/// Errors from loading the instruction prompt.
#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Prompt file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read prompt file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors from the Responses API exchange.
#[derive(Error, Debug)]
pub enum RequestError {
    #[error("API key is missing; refusing to send the request")]
    MissingCredential,

    #[error("Request failed: {status} {body}")]
    Status { status: u16, body: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unexpected response shape: {0}")]
    UnexpectedShape(String),

    #[error("Model returned invalid JSON: {0}")]
    InvalidJson(String),
}
