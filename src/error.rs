use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvoiceError {
    #[error("Config directory not found at {0}. Run 'bidi-invoice init' to create it.")]
    ConfigNotFound(PathBuf),

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config directory already exists at {0}")]
    AlreadyInitialized(PathBuf),

    #[error("Invoice file not found: {0}")]
    InvoiceFileNotFound(PathBuf),

    #[error("Invalid invoice input {path}: {source}")]
    InvalidInput {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Amount out of range while computing the {0}")]
    AmountOverflow(&'static str),

    #[error("Missing message '{key}' for language '{language}'")]
    MissingMessage { key: String, language: String },

    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Typst not found. Install it from https://typst.app/ or run: cargo install typst-cli")]
    TypstNotFound,

    #[error("Failed to generate PDF: {0}")]
    PdfGeneration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl InvoiceError {
    pub(crate) fn missing_message(key: &str, language: &str) -> Self {
        InvoiceError::MissingMessage {
            key: key.to_string(),
            language: language.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, InvoiceError>;
