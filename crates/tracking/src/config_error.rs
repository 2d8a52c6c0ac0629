// ---------------------------------------------------------------------------
// ConfigError: typed errors for loading a fleet file
// ---------------------------------------------------------------------------

use std::fmt;

use crate::fleet::VanId;

/// Errors that can occur while loading or validating a fleet file.
///
/// The tick itself never fails; these only surface at startup, before any
/// van is handed to the tracker.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading the file.
    Io(std::io::Error),
    /// The file is not valid JSON or does not match the expected shape.
    Parse(String),
    /// Two vans share an id.
    DuplicateVan(VanId),
    /// A van lists a completed stop that is not the next one on its route.
    CompletedStopOffRoute { van: VanId, stop: String },
    /// Seeded progress outside `[0, 1)`.
    InvalidProgress { van: VanId, progress: f64 },
    /// The preselected van is not in the file.
    UnknownSelectedVan(VanId),
    /// A tracking parameter that would stall or break the tick.
    InvalidConfig { field: &'static str, value: f64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "I/O error: {e}"),
            ConfigError::Parse(msg) => write!(f, "Parse error: {msg}"),
            ConfigError::DuplicateVan(id) => write!(f, "Duplicate van id {id}"),
            ConfigError::CompletedStopOffRoute { van, stop } => write!(
                f,
                "Van {van}: completed stop '{stop}' is not the next stop on its route"
            ),
            ConfigError::InvalidProgress { van, progress } => {
                write!(f, "Van {van}: progress {progress} is outside [0, 1)")
            }
            ConfigError::UnknownSelectedVan(id) => write!(f, "Selected van {id} does not exist"),
            ConfigError::InvalidConfig { field, value } => {
                write!(f, "Invalid config: {field} = {value}")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::Io(e)
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(e: serde_json::Error) -> Self {
        ConfigError::Parse(e.to_string())
    }
}
