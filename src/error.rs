/// Error type
#[derive(Debug)]
pub enum Error {
    /// An IO error.
    Io(std::io::Error),

    /// Error in storage engine.
    Storage(fjall::Error),

    /// A JSON (de)serialization error.
    Json(serde_json::Error),

    /// A date was not in `YYYY-MM-DD` format, or does not exist in the time zone.
    InvalidDate(String),

    /// The configuration file contained an unusable value.
    InvalidConfig(String),

    /// A stored reading could not be decoded.
    Decode,
}

impl From<fjall::Error> for Error {
    fn from(value: fjall::Error) -> Self {
        Self::Storage(value)
    }
}

impl From<std::io::Error> for Error {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(e) => {
                write!(f, "{e}")
            }
            Self::Io(e) => {
                write!(f, "{e}")
            }
            Self::Json(e) => {
                write!(f, "{e}")
            }
            Self::InvalidDate(input) => {
                write!(f, "InvalidDate: {input:?}")
            }
            Self::InvalidConfig(reason) => {
                write!(f, "InvalidConfig: {reason}")
            }
            Self::Decode => {
                write!(f, "Decode")
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Storage(e) => Some(e),
            Self::Json(e) => Some(e),
            _ => None,
        }
    }
}

/// Result helper type
pub type Result<T> = std::result::Result<T, Error>;
