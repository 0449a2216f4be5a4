use std::error;
use std::fmt;
use std::result;

/// Errors returned by the collections in this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// The operation needs at least one element, but the collection is empty.
    EmptyStructure,
    /// A construction parameter was rejected.
    InvalidArgument(&'static str),
}

impl error::Error for Error {}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyStructure => write!(f, "operation requires a non-empty structure"),
            Error::InvalidArgument(reason) => write!(f, "invalid argument: {}", reason),
        }
    }
}

pub type Result<T> = result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::EmptyStructure.to_string(),
            "operation requires a non-empty structure",
        );
        assert_eq!(
            Error::InvalidArgument("chunk size must be non-zero").to_string(),
            "invalid argument: chunk size must be non-zero",
        );
    }
}
