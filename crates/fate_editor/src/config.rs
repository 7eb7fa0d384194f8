use std::{
    fs, io,
    path::{Path, PathBuf},
    str::FromStr,
};

use log::LevelFilter;
use serde::Deserialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unknown log level `{0}`")]
    LogLevel(String),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    content_root: PathBuf,
    log_level: Option<String>,
}

impl Config {
    pub const DEFAULT_PATH: &'static str = "fate_editor.yaml";
    const DEFAULT_LOG_LEVEL: &'static str = "info";

    /// Reads `path`, or `fate_editor.yaml` when present, or falls back to
    /// defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(Self::DEFAULT_PATH);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };
        let text = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config: Config =
            serde_yaml::from_str(&text).map_err(|source| ConfigError::Parse { path, source })?;
        config.level_filter()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_overrides(mut self, content_root: Option<PathBuf>, log_level: Option<String>) -> Self {
        if let Some(content_root) = content_root {
            self.content_root = content_root;
        }
        if log_level.is_some() {
            self.log_level = log_level;
        }
        self
    }

    pub fn content_root(&self) -> &Path {
        &self.content_root
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(Self::DEFAULT_LOG_LEVEL)
    }

    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(self.log_level())
            .map_err(|_| ConfigError::LogLevel(self.log_level().to_string()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            content_root: PathBuf::from("."),
            log_level: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(Path::new("."), config.content_root());
        assert_eq!("info", config.log_level());
        assert_eq!(LevelFilter::Info, config.level_filter().unwrap());
    }

    #[test]
    fn reads_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.yaml");
        fs::write(&path, "content_root: /projects/game\nlog_level: debug\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(Path::new("/projects/game"), config.content_root());
        assert_eq!(LevelFilter::Debug, config.level_filter().unwrap());
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("editor.yaml");
        fs::write(&path, "log_level: warn\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(Path::new("."), config.content_root());
        assert_eq!("warn", config.log_level());
    }

    #[test]
    fn overrides_win() {
        let config = Config::default()
            .with_overrides(Some(PathBuf::from("content")), Some("trace".to_string()));
        assert_eq!(Path::new("content"), config.content_root());
        assert_eq!(LevelFilter::Trace, config.level_filter().unwrap());

        let config = config.with_overrides(None, None);
        assert_eq!(Path::new("content"), config.content_root());
    }

    #[test]
    fn errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            Config::load(Some(&dir.path().join("missing.yaml"))),
            Err(ConfigError::Read { .. })
        ));

        let path = dir.path().join("broken.yaml");
        fs::write(&path, "content_root: [unclosed\n").unwrap();
        assert!(matches!(Config::load(Some(&path)), Err(ConfigError::Parse { .. })));

        fs::write(&path, "log_level: loud\n").unwrap();
        assert!(matches!(Config::load(Some(&path)), Err(ConfigError::LogLevel(level)) if level == "loud"));
    }
}
