use dealdesk_client::{ApiError, ConfigError, FlowExpired, StorageError};
use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Custom(String),

    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("Json::{}", .0)]
    Json(#[from] serde_json::Error),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),

    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),

    #[error("Config::{}", .0)]
    Config(#[from] ConfigError),

    #[error("Storage::{}", .0)]
    Storage(#[from] StorageError),

    #[error("{}; run `dealdesk forgot-password --email <EMAIL>`", .0)]
    ResetExpired(#[from] FlowExpired),
}

impl Error {
    /// The server rejected the stored session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Api(e) if e.is_unauthorized())
    }
}
