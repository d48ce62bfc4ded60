use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuoteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Unknown field: {0}")]
    UnknownField(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    #[error("No {collection} at position {position}")]
    NoSuchEntry {
        collection: &'static str,
        position: usize,
    },

    #[error("Access denied: sign in to open the quote")]
    AccessDenied,

    #[error("Config error: {0}")]
    Config(String),

    #[error("{0}")]
    Command(String),
}

pub type Result<T> = std::result::Result<T, QuoteError>;
