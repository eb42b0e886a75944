//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use st_core::{IngestPolicy, Vocabulary};

/// CSV header names of the four log columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Columns {
    pub timestamp: String,
    pub event_type: String,
    pub value: String,
    pub description: String,
}

impl Default for Columns {
    fn default() -> Self {
        Self {
            timestamp: "開始時間".to_string(),
            event_type: "項目".to_string(),
            value: "記錄值".to_string(),
            description: "描述".to_string(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the event log.
    pub data_path: PathBuf,

    /// Handling of rows that fail validation.
    pub ingest_policy: IngestPolicy,

    /// Seizure type, marker types and sleep keywords.
    pub vocabulary: Vocabulary,

    /// Header names used when reading CSV logs.
    pub columns: Columns,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            data_path: data_dir.join("events.csv"),
            ingest_policy: IngestPolicy::default(),
            vocabulary: Vocabulary::default(),
            columns: Columns::default(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations, optionally merging a
    /// specific file on top.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (ST_*, `__` for nested keys)
        figment = figment.merge(Env::prefixed("ST_").split("__"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for st.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("st"))
}

/// Returns the platform-specific data directory for st.
///
/// On Linux: `~/.local/share/st`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("st"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use st_core::EventType;
    use tempfile::TempDir;

    #[test]
    fn test_dirs_data_path_ends_with_st() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "st");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_log() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.data_path, data_dir.join("events.csv"));
        assert_eq!(config.ingest_policy, IngestPolicy::Reject);
        assert_eq!(config.vocabulary, Vocabulary::default());
    }

    #[test]
    fn test_default_columns_match_log_headers() {
        let columns = Columns::default();
        assert_eq!(columns.timestamp, "開始時間");
        assert_eq!(columns.event_type, "項目");
        assert_eq!(columns.value, "記錄值");
        assert_eq!(columns.description, "描述");
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
data_path = "/tmp/log.jsonl"
ingest_policy = "skip"

[vocabulary]
seizure_type = "seizure"
sleep_keywords = ["asleep", "nap"]
markers = [{ event_type = "dose", label = "Dose change" }]

[columns]
timestamp = "time"
"#,
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.data_path, PathBuf::from("/tmp/log.jsonl"));
        assert_eq!(config.ingest_policy, IngestPolicy::Skip);
        assert_eq!(
            config.vocabulary.seizure_type,
            EventType::new("seizure").unwrap()
        );
        assert_eq!(config.vocabulary.sleep_keywords, vec!["asleep", "nap"]);
        assert_eq!(config.vocabulary.markers.len(), 1);
        assert_eq!(
            config.vocabulary.markers[0].display_label(),
            "Dose change"
        );
        // Unset keys keep their defaults.
        assert_eq!(config.columns.timestamp, "time");
        assert_eq!(config.columns.event_type, "項目");
    }

    #[test]
    fn test_blank_seizure_type_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[vocabulary]\nseizure_type = \"  \"\n").unwrap();

        assert!(Config::load_from(Some(&path)).is_err());
    }
}
