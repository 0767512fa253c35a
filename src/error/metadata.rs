use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("inheritance cycle detected at type '{type_name}'")]
    InheritanceCycle { type_name: String },

    #[error("nesting cycle detected at type '{type_name}'")]
    NestingCycle { type_name: String },
}

impl ModelError {
    pub fn inheritance_cycle(type_name: impl Into<String>) -> Self {
        Self::InheritanceCycle {
            type_name: type_name.into(),
        }
    }

    pub fn nesting_cycle(type_name: impl Into<String>) -> Self {
        Self::NestingCycle {
            type_name: type_name.into(),
        }
    }
}

/// Raised by a reflection provider while reading raw attribute data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReflectionError {
    #[error("constructing attribute '{attribute}' on '{member}' failed: {message}")]
    AttributeConstruction {
        attribute: String,
        member: String,
        message: String,
    },

    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ReflectionError {
    pub fn attribute_construction(
        attribute: impl Into<String>,
        member: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::AttributeConstruction {
            attribute: attribute.into(),
            member: member.into(),
            message: message.into(),
        }
    }
}

/// Raised when attribute arguments cannot be decoded into a typed attribute.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    #[error("attribute '{attribute}' has an invalid argument '{argument}': {message}")]
    InvalidArgument {
        attribute: String,
        argument: String,
        message: String,
    },

    #[error("attribute '{attribute}' is missing required argument '{argument}'")]
    MissingArgument { attribute: String, argument: String },
}

impl AttributeError {
    pub fn invalid_argument(
        attribute: impl Into<String>,
        argument: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            attribute: attribute.into(),
            argument: argument.into(),
            message: message.into(),
        }
    }

    pub fn missing_argument(attribute: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::MissingArgument {
            attribute: attribute.into(),
            argument: argument.into(),
        }
    }
}
