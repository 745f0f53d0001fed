use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    SourceNonAlphanumericLength { actual: usize },
    SourceAlphanumericLength { actual: usize },
    DestinationNonAlphanumericLength { actual: usize },
    InvalidCallbackUrl { input: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::SourceNonAlphanumericLength { actual } => {
                write!(f, "numeric source must be 4-14 digits, got {actual}")
            }
            Self::SourceAlphanumericLength { actual } => {
                write!(
                    f,
                    "alphanumeric source must be 4-13 characters, got {actual}"
                )
            }
            Self::DestinationNonAlphanumericLength { actual } => {
                write!(f, "numeric destination must be 4-14 digits, got {actual}")
            }
            Self::InvalidCallbackUrl { input } => write!(f, "invalid callback url: {input}"),
        }
    }
}

impl std::error::Error for ValidationError {}
