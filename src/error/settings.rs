use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings file '{path}': {message}")]
    ReadError { path: PathBuf, message: String },

    #[error("failed to parse settings file '{path}': {message}")]
    ParseError { path: PathBuf, message: String },

    #[error("unsupported settings format: {format} (expected json or yaml)")]
    UnsupportedFormat { format: String },
}

impl SettingsError {
    pub fn read_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ReadError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::ParseError {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }
}
