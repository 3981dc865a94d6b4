//! Run settings, read from an optional TOML file.
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// Environment variable naming the settings file.
pub const CONFIG_ENV: &str = "ADVENTURE_CONFIG";

/// Settings file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "adventure.toml";

/// Start room used when neither the settings nor the world name one.
pub const DEFAULT_START_ROOM: &str = "start";

/// Parameters of one run of the game loop.
///
/// Every field is optional in the file; omitted fields keep the defaults
/// below.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// World document loaded when no path is given on the command line.
    pub world_path: PathBuf,
    /// Overrides the `start` attribute of the world document.
    pub start_room: Option<String>,
    /// Inputs that end the session, matched exactly.
    pub quit_keywords: Vec<String>,
    pub show_events: bool,
    pub show_characters: bool,
    /// Refuse to play a world with validation issues instead of warning.
    pub strict_validation: bool,
    pub banner: String,
    pub farewell: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_path: PathBuf::from("game.xml"),
            start_room: None,
            quit_keywords: vec!["quit".to_string()],
            show_events: true,
            show_characters: true,
            strict_validation: false,
            banner: "Welcome to the Text Adventure Game!".to_string(),
            farewell: "Thanks for playing!".to_string(),
        }
    }
}

impl Settings {
    /// Locate and read the settings file.
    ///
    /// Lookup order:
    /// - `$ADVENTURE_CONFIG` (must exist if set)
    /// - `adventure.toml` in the working directory, if present
    /// - built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        if let Some(path) = env::var_os(CONFIG_ENV) {
            return Self::from_file(Path::new(&path));
        }

        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.is_file() {
            return Self::from_file(local);
        }

        Ok(Self::default())
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    pub fn is_quit(&self, input: &str) -> bool {
        self.quit_keywords.iter().any(|k| k == input)
    }

    /// Settings override, then the world's own start, then `"start"`.
    pub fn resolve_start_room(&self, world_start: Option<&str>) -> String {
        self.start_room
            .as_deref()
            .or(world_start)
            .unwrap_or(DEFAULT_START_ROOM)
            .to_string()
    }
}
