use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage quota exceeded: {size} bytes written, {quota} bytes allowed")]
    StorageQuota { size: usize, quota: usize },

    #[error("Invalid backup file: {0}")]
    ImportFormat(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Stored data changed during update, reload and try again")]
    Conflict,
}

impl Error {
    /// Short message suitable for a transient on-screen notice.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(msg) => msg.clone(),
            Error::ImportFormat(_) => "The backup file format is not valid.".to_string(),
            Error::NotFound(what) => format!("{} no longer exists.", what),
            Error::Conflict => "Data changed elsewhere, please retry.".to_string(),
            other => format!("Something went wrong: {}", other),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
