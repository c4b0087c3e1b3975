//! Typed errors for chain construction, run configuration and output.

use std::fmt;
use std::io;

#[derive(Debug)]
pub enum IsingError {
    /// Temperature that cannot be inverted into a finite, non-negative beta.
    InvalidTemperature(f64),

    /// A run parameter outside its allowed range.
    InvalidArgument(String),

    /// A spin value other than -1 or +1.
    InvalidSpin { index: usize, value: i8 },

    Io(io::Error),

    Csv(csv::Error),
}

impl fmt::Display for IsingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidTemperature(t) => {
                write!(f, "invalid temperature {t}: must be finite and positive")
            }
            Self::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            Self::InvalidSpin { index, value } => {
                write!(f, "spin {index} has value {value}, expected -1 or +1")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Csv(e) => write!(f, "CSV error: {e}"),
        }
    }
}

impl std::error::Error for IsingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Csv(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for IsingError {
    fn from(e: io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<csv::Error> for IsingError {
    fn from(e: csv::Error) -> Self {
        Self::Csv(e)
    }
}
