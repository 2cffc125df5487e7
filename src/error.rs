use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Member not found ({member}) on target of type {type_name}")]
    MemberNotFound { member: String, type_name: String },

    #[error("Kind {kind} is not handled by resolver of type {resolver}")]
    UnsupportedKind { kind: String, resolver: &'static str },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Encode error: {0}")]
    Encode(String),

    #[error("Type {0} is not a registered alternative")]
    UnknownAlternative(String),

    #[error("Gene length mismatch: expected {expected} slots, got {actual}")]
    GeneLength { expected: usize, actual: usize },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, CodecError>;
