use thiserror::Error;

#[derive(Error, Debug)]
pub enum GameError {
    #[error("Invalid selection: option {index} (available: {available})")]
    InvalidSelection { index: usize, available: usize },

    #[error("Cannot advance: no option selected")]
    BlockedAdvance,

    #[error("Invalid emotion kind: {0}")]
    InvalidEmotionKind(String),

    #[error("Invalid vault id: {0}")]
    InvalidVaultId(String),

    #[error("Invalid weight for {kind}: {weight}")]
    InvalidWeight { kind: String, weight: i64 },

    #[error("Invalid content: {0}")]
    InvalidContent(String),

    #[error("Content load failure: {0}")]
    ContentLoad(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GameError>;
