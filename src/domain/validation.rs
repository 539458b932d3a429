use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    Empty { field: &'static str },
    MissingParameter { field: &'static str },
    InvalidHost { input: String, reason: String },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{field} must not be empty"),
            Self::MissingParameter { field } => write!(f, "missing parameter: {field}"),
            Self::InvalidHost { input, reason } => write!(f, "invalid host {input}: {reason}"),
        }
    }
}

impl std::error::Error for ValidationError {}
