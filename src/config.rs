use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;

const CONFIG_PATH_ENV_VAR: &str = "CALGRID_CONFIG_FILE";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// TOML file of `[[events]]` records to overlay on the grid.
    pub events_file: Option<PathBuf>,
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;

        Ok(config)
    }
}

pub(crate) fn find_configfile_locations() -> Vec<PathBuf> {
    let mut locations = Vec::new();

    if let Ok(path) = env::var(CONFIG_PATH_ENV_VAR) {
        locations.push(PathBuf::from(path));
    }

    if let Some(dir) = dirs::config_dir() {
        locations.push(dir.join("calgrid").join("config.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        locations.push(home.join(".calgrid.toml"));
    }

    locations
}

/// Load the config given on the command line, or the first one found in
/// the usual locations, or the defaults when none exists.
pub fn load_suitable_config(path: Option<&Path>) -> Result<Config> {
    if let Some(path) = path {
        return Config::load(path);
    }

    for location in find_configfile_locations() {
        if location.exists() {
            log::info!("using config file {}", location.display());
            return Config::load(&location);
        }
    }

    Ok(Config::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_events_file_entry() {
        let config: Config = toml::from_str("events_file = \"/tmp/events.toml\"").unwrap();

        assert_eq!(config.events_file, Some(PathBuf::from("/tmp/events.toml")));
    }

    #[test]
    fn empty_config_is_valid() {
        let config: Config = toml::from_str("").unwrap();

        assert!(config.events_file.is_none());
    }

    #[test]
    fn missing_config_file_is_an_io_error() {
        use crate::error::ErrorKind;

        let err = Config::load(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err.kind, ErrorKind::IOError(_)));
    }
}
