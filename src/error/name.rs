use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ManagedNameError {
    #[error("malformed managed name '{name}': {message}")]
    Malformed { name: String, message: String },

    #[error("managed name is empty")]
    Empty,
}

impl ManagedNameError {
    pub fn malformed(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Malformed {
            name: name.into(),
            message: message.into(),
        }
    }
}
