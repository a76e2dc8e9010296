use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use contacts_extraction::{DEFAULT_ORGANIZATION_COLUMN, ExtractorOptions};

const CONFIG_DIR: &str = "contacts";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub extraction: ExtractionConfig,
    #[serde(default)]
    pub inference: InferenceConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct ExtractionConfig {
    /// Column holding the contact blocks when `--column` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_column: Option<String>,
    #[serde(default)]
    pub parallel_rows: bool,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct InferenceConfig {
    #[serde(default = "InferenceConfig::default_enabled")]
    pub enabled: bool,
    #[serde(default = "InferenceConfig::default_organization_column")]
    pub organization_column: String,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
            organization_column: Self::default_organization_column(),
        }
    }
}

impl InferenceConfig {
    const fn default_enabled() -> bool {
        true
    }

    fn default_organization_column() -> String {
        DEFAULT_ORGANIZATION_COLUMN.to_string()
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_path")]
    pub path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
        }
    }
}

impl OutputConfig {
    fn default_path() -> PathBuf {
        PathBuf::from("extracted_contacts.csv")
    }
}

impl Config {
    /// `~/contacts/config.json`.
    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR)
            .join(CONFIG_FILE))
    }

    /// Config from [`Config::config_path`]; a missing file yields the defaults.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            debug!(path = %config_path.display(), "No config file, using defaults");
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR);

        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        Self::write_template(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Set extraction.contact_column to the column holding the contact blocks");
        println!("   2. Set inference.organization_column to the column naming each organization");
        println!("   3. Run 'contacts extract --input <file.csv>'");
        println!();
        println!("🔧 Configuration options:");
        println!("   - extraction.parallel_rows: Parse rows in parallel for large files");
        println!("   - inference.enabled: Synthesize speculative emails from observed patterns");
        println!("   - output.path: Where the extracted CSV is written");
        println!();
        Ok(())
    }

    pub fn write_template(path: &Path) -> anyhow::Result<()> {
        let config_template = r#"{
  "extraction": {
    "contact_column": "AI Contacts",
    "parallel_rows": false
  },
  "inference": {
    "enabled": true,
    "organization_column": "Institution Name"
  },
  "output": {
    "path": "extracted_contacts.csv"
  }
}"#;

        std::fs::write(path, config_template)?;
        Ok(())
    }

    /// Extraction options for a run, with CLI overrides applied on top.
    #[must_use]
    pub fn extractor_options(
        &self,
        contact_column: String,
        organization_column: Option<String>,
        no_infer: bool,
        parallel: bool,
    ) -> ExtractorOptions {
        ExtractorOptions {
            contact_column,
            organization_column: organization_column
                .unwrap_or_else(|| self.inference.organization_column.clone()),
            infer_emails: self.inference.enabled && !no_infer,
            parallel_rows: self.extraction.parallel_rows || parallel,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn template_parses() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE);
        Config::write_template(&path).expect("template should write");

        let config = Config::load_from(&path).expect("template should parse");
        assert_eq!(config.extraction.contact_column.as_deref(), Some("AI Contacts"));
        assert!(config.inference.enabled);
        assert_eq!(config.output.path, PathBuf::from("extracted_contacts.csv"));
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn missing_sections_use_defaults() {
        let config: Config = serde_json::from_str("{}").expect("empty object should parse");
        assert_eq!(config.extraction.contact_column, None);
        assert_eq!(config.inference.organization_column, "Institution Name");
        assert!(config.inference.enabled);
        assert!(!config.extraction.parallel_rows);
    }

    #[test]
    fn cli_flags_override_config() {
        let config = Config::default();
        let options = config.extractor_options(
            "Contacts".to_string(),
            Some("Company".to_string()),
            true,
            true,
        );
        assert_eq!(options.contact_column, "Contacts");
        assert_eq!(options.organization_column, "Company");
        assert!(!options.infer_emails);
        assert!(options.parallel_rows);
    }

    #[test]
    #[expect(clippy::expect_used, reason = "Test failure should panic with context")]
    fn invalid_json_names_the_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").expect("write");

        let Err(err) = Config::load_from(&path) else {
            panic!("Expected invalid config error");
        };
        assert!(err.to_string().contains("Invalid config file"));
    }
}
