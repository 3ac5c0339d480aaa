use std::fmt;
use std::io;

/// Which vector failed a width check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VectorKind {
    /// A vector fed to the input layer.
    Input,
    /// A training target compared against the output layer.
    Expected,
}

impl fmt::Display for VectorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorKind::Input => f.write_str("input"),
            VectorKind::Expected => f.write_str("expected output"),
        }
    }
}

#[derive(Debug)]
pub enum Error {
    /// A vector's length does not match the configured layer width.
    InputSize {
        kind: VectorKind,
        expected: usize,
        actual: usize,
    },
    InvalidTopology(String),
    InvalidConfig(String),
    InvalidData(String),
    /// Malformed parameter or training file. `line` is 1-based.
    Parse { line: usize, message: String },
    Io(io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Error {
        Error::Parse { line, message: message.into() }
    }

    /// True for the width-mismatch error raised by inference and training.
    pub fn is_input_size(&self) -> bool {
        matches!(self, Error::InputSize { .. })
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InputSize { kind, expected, actual } => write!(
                f,
                "an incorrect number of {kind} values was given: expected {expected}, got {actual}"
            ),
            Error::InvalidTopology(msg) => write!(f, "invalid topology: {msg}"),
            Error::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Error::InvalidData(msg) => write!(f, "invalid data: {msg}"),
            Error::Parse { line, message } => write!(f, "parse error on line {line}: {message}"),
            Error::Io(e) => write!(f, "i/o error: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Error::Io(e)
    }
}
