use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssemblyLoadError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to read assembly '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("bad image format '{path}': {message}")]
    BadImageFormat { path: PathBuf, message: String },

    #[error("type load failure in '{path}': {message}")]
    TypeLoad { path: PathBuf, message: String },

    #[error("failed to scan directory '{path}': {source}")]
    DirectoryScan {
        path: PathBuf,
        source: walkdir::Error,
    },
}

impl AssemblyLoadError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound { path: path.into() }
    }

    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ReadError {
            path: path.into(),
            source,
        }
    }

    pub fn bad_image_format(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::BadImageFormat {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn type_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::TypeLoad {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Bad images and type-load failures mean "not a loadable test assembly".
    pub fn is_not_loadable(&self) -> bool {
        matches!(self, Self::BadImageFormat { .. } | Self::TypeLoad { .. })
    }
}

/// A single type that could not be materialized from an assembly.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TypeLoadError {
    pub type_name: String,
    pub message: String,
}

impl TypeLoadError {
    pub fn unresolved_type(type_name: impl Into<String>, missing: &str, assembly: &str) -> Self {
        Self {
            type_name: type_name.into(),
            message: format!(
                "Could not load type '{missing}' referenced from assembly '{assembly}'."
            ),
        }
    }
}
