//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["infraflow.toml", ".infraflow.toml"];

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Load defaults merged with a single file, ignoring discovery and env
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
    }

    fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("INFRAFLOW_").split("__"))
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/infraflow/config.toml if set,
    /// otherwise the platform config directory equivalent.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("infraflow").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .into_iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for debugging)
    pub fn describe_sources() -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];
        lines.push("  [ env ] INFRAFLOW_* variables".to_string());

        match Self::project_config_path() {
            Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
            None => lines.push("  [     ] Project: ./infraflow.toml or ./.infraflow.toml".to_string()),
        }

        if let Some(path) = Self::global_config_path() {
            let mark = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{}] Global:  {}", mark, path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(config.agents.is_empty());
        assert_eq!(config.engine.max_rounds, 12);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        assert!(path.unwrap().to_string_lossy().contains("infraflow"));
    }

    #[test]
    fn test_load_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("infraflow.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[engine]
max_rounds = 5

[gateway]
model = "mistral-large"
"#
        )
        .unwrap();

        let config = ConfigLoader::load_file(&path).unwrap();
        assert_eq!(config.engine.max_rounds, 5);
        assert_eq!(config.gateway.model, "mistral-large");
        // Untouched sections keep their defaults
        assert_eq!(config.engine.termination_marker, "TERMINATE");
        assert_eq!(config.server.bind, "0.0.0.0:10000");
    }

    #[test]
    fn test_load_file_rejects_bad_types() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "[engine]\nmax_rounds = \"many\"\n").unwrap();
        assert!(ConfigLoader::load_file(&path).is_err());
    }

    #[test]
    fn test_describe_sources() {
        let lines = ConfigLoader::describe_sources();
        assert!(lines[0].starts_with("Configuration sources"));
        assert!(lines.iter().any(|l| l.contains("Default")));
    }
}
