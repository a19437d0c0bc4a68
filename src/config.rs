use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Directory holding config files and user-level skills.
const CONFIG_DIR: &str = ".skillpack";

/// Output format for CLI results
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" | "pretty" => Some(Self::Text),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

/// Discovery settings
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DiscoveryConfig {
    /// Parse candidate directories on a thread pool
    #[serde(default)]
    pub parallel: Option<bool>,
}

/// Output settings
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: Option<OutputFormat>,
}

/// Settings for the model-facing skill index
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PromptConfig {
    #[serde(default)]
    pub max_entries: Option<usize>,
}

fn default_max_entries() -> usize {
    50
}

/// Main configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Roots searched for skill packages, lowest priority first
    #[serde(default)]
    pub skills_dirs: Vec<PathBuf>,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub prompt: PromptConfig,
}

impl Config {
    /// Built-in defaults: user skills (~/.skillpack/skills), then ./skills
    pub fn with_defaults() -> Self {
        let mut skills_dirs = Vec::new();
        if let Some(home) = dirs::home_dir() {
            skills_dirs.push(home.join(CONFIG_DIR).join("skills"));
        }
        skills_dirs.push(PathBuf::from("skills"));

        Config {
            skills_dirs,
            ..Default::default()
        }
    }

    /// Load configuration from default paths
    /// Priority: local (.skillpack/config.local.toml) > project (.skillpack/config.toml) > user (~/.skillpack/config.toml)
    pub fn load() -> Result<Self> {
        let mut config = Self::with_defaults();

        if let Some(home) = dirs::home_dir() {
            let user_config = home.join(CONFIG_DIR).join("config.toml");
            if user_config.exists() {
                config.merge(Self::load_from(&user_config)?);
            }
        }

        let project_config = Path::new(CONFIG_DIR).join("config.toml");
        if project_config.exists() {
            config.merge(Self::load_from(&project_config)?);
        }

        let local_config = Path::new(CONFIG_DIR).join("config.local.toml");
        if local_config.exists() {
            config.merge(Self::load_from(&local_config)?);
        }

        Ok(config)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Merge another config into this one (other takes priority)
    /// Skill roots are appended so later layers win on name clashes;
    /// scalars are overridden if set.
    pub fn merge(&mut self, other: Config) {
        for dir in other.skills_dirs {
            if !self.skills_dirs.contains(&dir) {
                self.skills_dirs.push(dir);
            }
        }
        if other.discovery.parallel.is_some() {
            self.discovery.parallel = other.discovery.parallel;
        }
        if other.output.format.is_some() {
            self.output.format = other.output.format;
        }
        if other.prompt.max_entries.is_some() {
            self.prompt.max_entries = other.prompt.max_entries;
        }
    }

    pub fn parallel_discovery(&self) -> bool {
        self.discovery.parallel.unwrap_or(true)
    }

    pub fn output_format(&self) -> OutputFormat {
        self.output.format.unwrap_or_default()
    }

    pub fn max_prompt_entries(&self) -> usize {
        self.prompt.max_entries.unwrap_or_else(default_max_entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config: Config = toml::from_str(
            r#"
skills_dirs = ["/opt/skills"]

[discovery]
parallel = false

[output]
format = "json"

[prompt]
max_entries = 10
"#,
        )
        .unwrap();
        assert_eq!(config.skills_dirs, vec![PathBuf::from("/opt/skills")]);
        assert!(!config.parallel_discovery());
        assert_eq!(config.output_format(), OutputFormat::Json);
        assert_eq!(config.max_prompt_entries(), 10);
    }

    #[test]
    fn test_defaults() {
        let config = Config::with_defaults();
        assert!(config.parallel_discovery());
        assert_eq!(config.output_format(), OutputFormat::Text);
        assert_eq!(config.max_prompt_entries(), 50);
        assert_eq!(config.skills_dirs.last(), Some(&PathBuf::from("skills")));
    }

    #[test]
    fn test_merge() {
        let mut base = Config::with_defaults();
        let other: Config = toml::from_str(
            r#"
skills_dirs = ["skills", "team-skills"]

[output]
format = "json"
"#,
        )
        .unwrap();
        base.merge(other);

        assert_eq!(base.skills_dirs.last(), Some(&PathBuf::from("team-skills")));
        assert_eq!(
            base.skills_dirs
                .iter()
                .filter(|d| d.as_path() == Path::new("skills"))
                .count(),
            1
        );
        assert_eq!(base.output_format(), OutputFormat::Json);
        assert!(base.parallel_discovery());
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!(OutputFormat::from_str("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::from_str("pretty"), Some(OutputFormat::Text));
        assert_eq!(OutputFormat::from_str("yaml"), None);
        assert_eq!(OutputFormat::Json.as_str(), "json");
    }
}
