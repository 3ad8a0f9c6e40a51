use serde::Deserialize;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_DOCKER: &str = "docker";
pub const DEFAULT_IMAGE: &str = "mipl-mesh-converter";

#[derive(Error, Debug)]
/// Error types for the settings file
pub enum SettingsError {
    #[error("Couldn't read settings file")]
    IO(#[from] std::io::Error),
    #[error("Error parsing settings file")]
    Json(#[from] serde_json::Error),
}

/// How the converter container gets launched
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// container runtime executable
    pub docker: String,
    /// image holding the converter
    pub image: String,
    /// launch with `-it`
    pub tty: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            docker: DEFAULT_DOCKER.to_string(),
            image: DEFAULT_IMAGE.to_string(),
            tty: true,
        }
    }
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Settings, SettingsError> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        Ok(serde_json::from_reader(reader)?)
    }
}
