use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Client configuration, loaded from TOML
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Graph key every query is sent to
    pub graph: String,
    pub log: LogConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub dir: String,
    /// File basename, without the `.log` suffix
    pub file: String,
    pub max_file_size: u64,
    pub max_files: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            graph: "default".to_string(),
            log: LogConfig::default(),
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "logs".to_string(),
            file: "redisgraph".to_string(),
            max_file_size: 10 * 1024 * 1024, // 10MB
            max_files: 5,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let mut config: Config = toml::from_str(&content)?;
        if config.graph.trim().is_empty() {
            return Err("graph 名称不能为空".into());
        }
        config.log.dir = Config::resolve_log_dir(&config.log.dir)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Expands a leading `~`; other paths are returned unchanged
    fn resolve_log_dir(dir: &str) -> Result<String, Box<dyn std::error::Error>> {
        let Some(rest) = dir.strip_prefix('~') else {
            return Ok(dir.to_string());
        };
        let home = env::var_os("HOME")
            .or_else(|| env::var_os("USERPROFILE"))
            .map(PathBuf::from)
            .ok_or("无法获取用户主目录")?;
        let rest = rest.trim_start_matches(['/', '\\']);
        Ok(home.join(rest).to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.graph, "default");
        assert_eq!(config.log.level, "info");
        assert_eq!(config.log.file, "redisgraph");
    }

    #[test]
    fn test_config_load_save() {
        let temp_file = NamedTempFile::new().expect("Failed to create temporary file");

        let mut config = Config::default();
        config.graph = "social".to_string();
        config.log.level = "debug".to_string();
        config.save(temp_file.path()).expect("Failed to save config");

        let loaded = Config::load(temp_file.path()).expect("Failed to load config");
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_config_partial_file() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        temp_file
            .write_all(b"graph = \"imdb\"\n[log]\nlevel = \"warn\"\n")
            .expect("Failed to write TOML content to temporary file");

        let loaded = Config::load(temp_file.path()).expect("Failed to load config");
        assert_eq!(loaded.graph, "imdb");
        assert_eq!(loaded.log.level, "warn");
        assert_eq!(loaded.log.max_files, LogConfig::default().max_files);
    }

    #[test]
    fn test_config_rejects_empty_graph() {
        let mut temp_file = NamedTempFile::new().expect("Failed to create temporary file");
        temp_file
            .write_all(b"graph = \"  \"\n")
            .expect("Failed to write TOML content to temporary file");
        assert!(Config::load(temp_file.path()).is_err());
    }
}
