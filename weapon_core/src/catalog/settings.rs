//! Calculator settings loaded from `weapon-calc.toml`

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Tunable settings for the calculator front end
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Catalog directory; the bundled sample catalog is used when unset
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Directory backing the build store
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,
    /// `tracing` filter directive
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            data_dir: None,
            store_dir: default_store_dir(),
            log_filter: default_log_filter(),
        }
    }
}

fn default_store_dir() -> PathBuf {
    PathBuf::from(".weapon-calc")
}

fn default_log_filter() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::parse_toml;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.data_dir, None);
        assert_eq!(settings.store_dir, PathBuf::from(".weapon-calc"));
        assert_eq!(settings.log_filter, "info");
    }

    #[test]
    fn test_parse_partial_settings() {
        let toml = r#"
data_dir = "data/sulfur"
log_filter = "weapon_core=debug"
"#;
        let settings: Settings = parse_toml(toml).unwrap();
        assert_eq!(settings.data_dir, Some(PathBuf::from("data/sulfur")));
        assert_eq!(settings.store_dir, PathBuf::from(".weapon-calc"));
        assert_eq!(settings.log_filter, "weapon_core=debug");
    }

    #[test]
    fn test_empty_file_is_default() {
        let settings: Settings = parse_toml("").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
