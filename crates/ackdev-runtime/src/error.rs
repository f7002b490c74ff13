use std::fmt;
use std::path::PathBuf;

/// Result type for ackdev-runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur in the runtime layer
#[derive(Debug)]
pub enum Error {
    /// Types layer error
    Types(ackdev_types::Error),

    /// IO operation failed
    Io(std::io::Error),

    /// YAML (de)serialization failed
    Yaml(serde_yaml::Error),

    /// JSON deserialization failed
    Json(serde_json::Error),

    /// Settings error
    Config(String),

    /// No manifest exists for the requested service
    ModelNotFound {
        service: String,
        models_dir: PathBuf,
    },

    /// Manifest parsed but describes an impossible model
    InvalidManifest { path: PathBuf, reason: String },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Types(err) => write!(f, "{}", err),
            Error::Io(err) => write!(f, "IO error: {}", err),
            Error::Yaml(err) => write!(f, "YAML error: {}", err),
            Error::Json(err) => write!(f, "JSON error: {}", err),
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::ModelNotFound {
                service,
                models_dir,
            } => write!(
                f,
                "service {} not found in {}",
                service,
                models_dir.display()
            ),
            Error::InvalidManifest { path, reason } => {
                write!(f, "Invalid manifest {}: {}", path.display(), reason)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Types(err) => Some(err),
            Error::Io(err) => Some(err),
            Error::Yaml(err) => Some(err),
            Error::Json(err) => Some(err),
            Error::Config(_) | Error::ModelNotFound { .. } | Error::InvalidManifest { .. } => None,
        }
    }
}

impl From<ackdev_types::Error> for Error {
    fn from(err: ackdev_types::Error) -> Self {
        Error::Types(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::Yaml(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}
