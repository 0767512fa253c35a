mod load;
mod metadata;
mod name;
mod settings;

pub use load::{AssemblyLoadError, TypeLoadError};
pub use metadata::{AttributeError, ModelError, ReflectionError};
pub use name::ManagedNameError;
pub use settings::SettingsError;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Load(#[from] AssemblyLoadError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Reflection(#[from] ReflectionError),

    #[error(transparent)]
    Attribute(#[from] AttributeError),

    #[error(transparent)]
    ManagedName(#[from] ManagedNameError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

pub type Result<T> = std::result::Result<T, Error>;
