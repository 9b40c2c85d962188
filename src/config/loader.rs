//! Configuration loading and discovery for `mapbot.toml`

use super::schema::MapbotConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "mapbot.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse mapbot.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// Find mapbot.toml by walking up from `start`.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Find mapbot.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Load configuration from `path`, or from a discovered `mapbot.toml`.
///
/// Unlike most settings, `font_path` has no default, so a missing config
/// file is an error rather than an empty configuration.
pub fn load_config(path: Option<&Path>) -> Result<MapbotConfig, ConfigError> {
    let config_path = match path {
        Some(p) => p.to_path_buf(),
        None => find_config().unwrap_or_else(|| PathBuf::from(CONFIG_FILE_NAME)),
    };

    load_config_file(&config_path)
}

/// Load configuration from a specific file path.
///
/// Relative `font_path` and `image_dir` values are resolved against the
/// directory containing the file.
fn load_config_file(path: &Path) -> Result<MapbotConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let mut config: MapbotConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    if let Some(base) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if config.font_path.is_relative() {
            config.font_path = base.join(&config.font_path);
        }
        if config.image_dir.is_relative() {
            config.image_dir = base.join(&config.image_dir);
        }
    }

    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE_NAME);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents.as_bytes())
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "font_path = \"f.ttf\"");

        let subdir = temp.path().join("a").join("b");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        assert_eq!(find_config_from(subdir), Some(config_path));
    }

    #[test]
    fn test_find_config_not_found() {
        let temp = TempDir::new().expect("should create temp dir");
        assert_eq!(find_config_from(temp.path().to_path_buf()), None);
    }

    #[test]
    fn test_load_config_resolves_relative_paths() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            "font_path = \"fonts/a.ttf\"\nimage_dir = \"maps\"\n\n[render]\ncell_width = 16\n",
        );

        let config = load_config(Some(&config_path)).expect("should load config");
        assert_eq!(config.font_path, temp.path().join("fonts/a.ttf"));
        assert_eq!(config.image_dir, temp.path().join("maps"));
        assert_eq!(config.render.cell_width, 16);
        assert_eq!(config.render.cell_height, 32);
    }

    #[test]
    fn test_load_config_keeps_absolute_paths() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "font_path = \"/usr/share/a.ttf\"");
        let config = load_config(Some(&config_path)).expect("should load config");
        assert_eq!(config.font_path, PathBuf::from("/usr/share/a.ttf"));
    }

    #[test]
    fn test_load_config_missing_file() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("nonexistent.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_config_parse_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "font_path = ");
        assert!(matches!(load_config(Some(&config_path)), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_validation_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "image_dir = \"maps\"");
        match load_config(Some(&config_path)) {
            Err(ConfigError::Validation(errors)) => {
                assert_eq!(errors, vec!["mapbot.toml: 'font_path' is not set".to_string()]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
