//! Configuration file discovery and generation.
//!
//! # Configuration File Format
//!
//! ```toml
//! [api]
//! base_url = "https://api.scryfall.com"
//! # timeout_secs = 30
//! # user_agent = "my-tool/1.0"
//!
//! [search]
//! debounce_ms = 300
//! min_query_chars = 2
//!
//! [logging]
//! level = "info"
//! ```

use std::path::{Path, PathBuf};

use super::{Config, ConfigError};

const CONFIG_DIR: &str = "card-lookup";
const CONFIG_FILE: &str = "config.toml";

/// Default location of the user configuration file
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Find a configuration file in the working directory or the user config dir
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(format!("{}.toml", CONFIG_DIR));
    if local.is_file() {
        return Some(local);
    }

    default_config_path().filter(|path| path.is_file())
}

/// Write the default configuration as TOML, refusing to overwrite
pub fn write_default_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::Invalid(format!(
            "{} already exists",
            path.display()
        )));
    }

    let content = toml::to_string_pretty(&Config::default())
        .map_err(|e| ConfigError::Serialize(e.to_string()))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::load_config;

    #[test]
    fn test_written_default_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        write_default_config(&path).unwrap();
        let loaded = load_config(Some(path.as_path())).unwrap();
        assert_eq!(loaded, Config::default());
    }

    #[test]
    fn test_write_refuses_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "").unwrap();

        assert!(matches!(
            write_default_config(&path),
            Err(ConfigError::Invalid(_))
        ));
    }
}
