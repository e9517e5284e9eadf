use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ItemsError {
    /// The file exists but does not hold the five-column item layout.
    ParseFailure { path: PathBuf, reason: String },
    ReadFailure { path: PathBuf, source: io::Error },
    WriteFailure { path: PathBuf, source: io::Error },
    /// Input rejected before anything touches the disk.
    ValidationFailure(String),
}
pub type Result<T> = std::result::Result<T, ItemsError>;

impl ItemsError {
    pub fn parse(path: &Path, reason: impl Into<String>) -> Self {
        Self::ParseFailure {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    pub fn read(path: &Path, source: io::Error) -> Self {
        Self::ReadFailure {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn write(path: &Path, source: io::Error) -> Self {
        Self::WriteFailure {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationFailure(_))
    }
}

impl fmt::Display for ItemsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ParseFailure { path, reason } => {
                write!(f, "Error reading CSV file {}: {}", path.display(), reason)
            }
            Self::ReadFailure { path, source } => {
                write!(f, "Error reading CSV file {}: {}", path.display(), source)
            }
            Self::WriteFailure { path, source } => {
                write!(f, "Error saving CSV file {}: {}", path.display(), source)
            }
            Self::ValidationFailure(message) => write!(f, "{}", message),
        }
    }
}

impl Error for ItemsError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ReadFailure { source, .. } => Some(source),
            Self::WriteFailure { source, .. } => Some(source),
            Self::ParseFailure { .. } => None,
            Self::ValidationFailure(_) => None,
        }
    }
}
