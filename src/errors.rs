use std::fmt;

/// Error type for estimation and session operations, including specific error codes.
///
/// Each variant represents a distinct error condition with a unique error code so the
/// console can report it consistently.
#[derive(Debug)]
pub enum Error {
    /// I/O-related error (e.g., reading the interactive session input).
    /// Error code: 1000
    Io(std::io::Error),
    /// The polling interval is unparsable or not strictly positive.
    /// Error code: 2000
    InvalidCadence(String),
    /// A time of day could not be parsed.
    /// Error code: 3000
    InvalidTime(String),
    /// Malformed command or flag.
    /// Error code: 4000
    Syntax(String),
    /// Schema-related error (e.g., unknown column type).
    /// Error code: 5000
    Schema(String),
    /// Miscellaneous uncategorized error.
    /// Error code: 9000
    Other(String),
}

impl Error {
    /// Returns the error code associated with this error variant.
    ///
    /// # Examples
    /// ```
    /// use rowcast::errors::Error;
    /// let err = Error::InvalidCadence("zero interval".to_string());
    /// assert_eq!(err.code(), 2000);
    /// ```
    pub fn code(&self) -> u32 {
        match self {
            Error::Io(_) => 1000,
            Error::InvalidCadence(_) => 2000,
            Error::InvalidTime(_) => 3000,
            Error::Syntax(_) => 4000,
            Error::Schema(_) => 5000,
            Error::Other(_) => 9000,
        }
    }

    /// Returns a human-readable error category for this error variant.
    pub fn category(&self) -> &'static str {
        match self {
            Error::Io(_) => "I/O",
            Error::InvalidCadence(_) => "Cadence",
            Error::InvalidTime(_) => "Time",
            Error::Syntax(_) => "Syntax",
            Error::Schema(_) => "Schema",
            Error::Other(_) => "Other",
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "[{}] I/O Error: {}", self.code(), e),
            Error::InvalidCadence(msg) => {
                write!(f, "[{}] Invalid Cadence: {}", self.code(), msg)
            }
            Error::InvalidTime(msg) => write!(f, "[{}] Invalid Time: {}", self.code(), msg),
            Error::Syntax(msg) => write!(f, "[{}] Syntax Error: {}", self.code(), msg),
            Error::Schema(msg) => write!(f, "[{}] Schema Error: {}", self.code(), msg),
            Error::Other(msg) => write!(f, "[{}] Unknown Error: {}", self.code(), msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<std::num::ParseIntError> for Error {
    fn from(err: std::num::ParseIntError) -> Self {
        Error::Syntax(format!("Integer parsing error: {}", err))
    }
}

/// Convenience macro to create an `Error` with a formatted message.
///
/// # Examples
/// ```
/// use rowcast::err;
/// let err = err!(Syntax, "Unknown command");
/// assert_eq!(err.code(), 4000);
/// assert_eq!(err.to_string(), "[4000] Syntax Error: Unknown command");
///
/// let err = err!(Schema, "Unknown column type '{}'", "blob");
/// assert_eq!(err.to_string(), "[5000] Schema Error: Unknown column type 'blob'");
/// ```
#[macro_export]
macro_rules! err {
    ($variant:ident, $msg:expr) => {
        $crate::errors::Error::$variant($msg.to_string())
    };
    ($variant:ident, $fmt:expr, $($arg:tt)*) => {
        $crate::errors::Error::$variant(format!($fmt, $($arg)*))
    };
}
