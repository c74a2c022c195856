use thiserror::Error;

/// All errors that can occur while viewing a secret.
#[derive(Debug, Error)]
pub enum ViewSecretError {
    // --- Selection errors ---
    #[error("secret is empty")]
    SecretEmpty,

    #[error("provided key '{0}' not found in secret")]
    KeyNotFound(String),

    #[error("no secrets found")]
    NoSecretFound,

    // --- Decode errors ---
    #[error("failed to decode key '{key}': {source}")]
    Decode {
        key: String,
        #[source]
        source: DecodeError,
    },

    // --- Prompt errors ---
    #[error("selection failed: {0}")]
    Prompt(#[from] PromptError),

    // --- Input errors ---
    #[error("failed to parse {shape}: {source}")]
    Parse {
        shape: &'static str,
        #[source]
        source: serde_json::Error,
    },

    // --- kubectl errors ---
    #[error("kubectl failed: {0}")]
    Kubectl(String),

    #[error("could not run '{0}' — is kubectl installed and on PATH?")]
    KubectlNotFound(String),

    // --- Config errors ---
    #[error("Config file error: {0}")]
    Config(String),

    // --- Output errors ---
    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Command failed: {0}")]
    CommandFailed(String),
}

/// Failure of a single decode strategy, naming the stage that broke.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed base64 input: {0}")]
    Base64(#[source] base64::DecodeError),

    #[error("outer base64 layer: {0}")]
    OuterBase64(#[source] base64::DecodeError),

    #[error("inner base64 layer: {0}")]
    InnerBase64(#[source] base64::DecodeError),

    #[error("failed to open gzip stream: {0}")]
    GzipHeader(String),

    #[error("failed to read gzip stream: {0}")]
    GzipRead(#[source] std::io::Error),
}

/// Failure of the interactive selection.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("input closed before a choice was made")]
    Closed,

    #[error("selection cancelled")]
    Cancelled,

    #[error("'{0}' is not one of the offered options")]
    InvalidChoice(String),

    #[error("no options to choose from")]
    NoOptions,

    #[error("terminal error: {0}")]
    Terminal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for view-secret results.
pub type Result<T> = std::result::Result<T, ViewSecretError>;
