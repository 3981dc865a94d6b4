use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn a world document into a [`crate::world::World`].
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    Parse(#[from] quick_xml::DeError),

    #[error("{0}")]
    Invalid(String),
}

impl LoadError {
    /// Prefix used when the error is shown to the player.
    pub fn user_prefix(&self) -> &'static str {
        match self {
            LoadError::Read { .. } => "Error reading game data:",
            LoadError::Parse(_) | LoadError::Invalid(_) => "Error parsing game data:",
        }
    }
}

/// The cursor points at a room id that no room carries.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("room '{0}' not found")]
    RoomNotFound(String),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read settings '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}
