use thiserror::Error;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("{}", .0)]
    Custom(String),

    #[error("IO::{:?}: {}", .0, .0)]
    Io(#[from] std::io::Error),

    #[error("Fmt::{:?}: {}", .0, .0)]
    Fmt(#[from] std::fmt::Error),

    #[error("FlexiLogger::{:?}: {}", .0, .0)]
    FlexiLogger(#[from] flexi_logger::FlexiLoggerError),

    #[error("Storage: {}", .0)]
    Storage(#[from] storeadmin_core::storage::StorageError),

    #[error("Config: {}", .0)]
    Config(#[from] storeadmin_core::config::ConfigError),

    #[error("Json: {}", .0)]
    Json(#[from] serde_json::Error),
}
