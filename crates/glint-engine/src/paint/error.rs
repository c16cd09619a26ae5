use std::fmt;

/// Error from [`Color::from_hex`](super::Color::from_hex).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    /// The string does not start with `#`.
    MissingHash,
    /// Digit count other than 3, 6 or 8.
    BadLength(usize),
    /// A character that is not a hexadecimal digit.
    BadDigit(char),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorParseError::MissingHash => write!(f, "color must start with '#'"),
            ColorParseError::BadLength(n) => {
                write!(f, "color must have 3, 6 or 8 hex digits, got {n}")
            }
            ColorParseError::BadDigit(c) => write!(f, "invalid hex digit {c:?} in color"),
        }
    }
}

impl std::error::Error for ColorParseError {}
