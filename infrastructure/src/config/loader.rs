//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::PathBuf;

const PROJECT_CONFIG_FILES: [&str; 2] = ["live-qa.toml", ".live-qa.toml"];
const ENV_PREFIX: &str = "LIVEQA_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. `LIVEQA_*` environment variables (`__` separates sections)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./live-qa.toml` or `./.live-qa.toml`
    /// 4. Global config: `$XDG_CONFIG_HOME/live-qa/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("live-qa").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used (for --show-config)
    pub fn describe_sources() -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        lines.push(format!(
            "  [ENV  ] Environment: {}* (e.g. {}BROADCAST__BUFFER_SIZE)",
            ENV_PREFIX, ENV_PREFIX
        ));

        if let Some(path) = Self::project_config_path() {
            lines.push(format!("  [FOUND] Project: {}", path.display()));
        } else {
            lines.push("  [     ] Project: ./live-qa.toml or ./.live-qa.toml".to_string());
        }

        if let Some(path) = Self::global_config_path() {
            let marker = if path.exists() { "FOUND" } else { "     " };
            lines.push(format!("  [{}] Global:  {}", marker, path.display()));
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileOutputFormat;
    use figment::Jail;
    use std::io::Write;

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert!(!config.session.auto_start);
        assert_eq!(config.broadcast.buffer_size, 8);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("live-qa"));
    }

    /// Point the global config lookup into the jail so a developer's own
    /// config file never leaks into the test.
    fn isolate_global(jail: &mut Jail) {
        let xdg = jail.directory().join("xdg");
        jail.set_env("XDG_CONFIG_HOME", xdg.display());
    }

    #[test]
    fn test_load_reads_project_file() {
        Jail::expect_with(|jail| {
            isolate_global(jail);
            jail.create_file(
                "live-qa.toml",
                r#"
[session]
auto_start = true

[broadcast]
buffer_size = 3
"#,
            )?;

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert!(config.session.auto_start);
            assert_eq!(config.broadcast.buffer_size, 3);
            assert!(config.output.color);
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_files() {
        Jail::expect_with(|jail| {
            isolate_global(jail);
            jail.create_file("live-qa.toml", "[broadcast]\nbuffer_size = 3")?;
            jail.set_env("LIVEQA_BROADCAST__BUFFER_SIZE", 5);
            jail.set_env("LIVEQA_OUTPUT__FORMAT", "json");

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.broadcast.buffer_size, 5);
            assert_eq!(config.output.format, FileOutputFormat::Json);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_path_overrides_project_file() {
        Jail::expect_with(|jail| {
            isolate_global(jail);
            jail.create_file(".live-qa.toml", "[broadcast]\nbuffer_size = 3")?;

            let mut explicit = tempfile::NamedTempFile::new().map_err(|e| e.to_string())?;
            writeln!(explicit, "[broadcast]\nbuffer_size = 7").map_err(|e| e.to_string())?;
            let path = explicit.path().to_path_buf();

            let config = ConfigLoader::load(Some(&path)).map_err(|e| *e)?;
            assert_eq!(config.broadcast.buffer_size, 7);
            Ok(())
        });
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_global_file_below_project_file() {
        Jail::expect_with(|jail| {
            isolate_global(jail);
            std::fs::create_dir_all(jail.directory().join("xdg").join("live-qa"))
                .map_err(|e| e.to_string())?;
            jail.create_file(
                "xdg/live-qa/config.toml",
                "[session]\nauto_start = true\n\n[broadcast]\nbuffer_size = 2",
            )?;
            jail.create_file("live-qa.toml", "[broadcast]\nbuffer_size = 4")?;

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert!(config.session.auto_start);
            assert_eq!(config.broadcast.buffer_size, 4);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_wrong_type() {
        Jail::expect_with(|jail| {
            isolate_global(jail);
            jail.create_file("live-qa.toml", "[broadcast]\nbuffer_size = \"many\"")?;

            assert!(ConfigLoader::load(None).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_describe_sources_lists_defaults() {
        let lines = ConfigLoader::describe_sources();
        assert!(lines.iter().any(|l| l.contains("Default")));
        assert!(lines.iter().any(|l| l.contains(ENV_PREFIX)));
    }
}
