//! Server configuration file for the console host.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::error::{HostError, Result};

/// Contents of a server TOML file.
///
/// ```toml
/// engine = "csgo"
/// game = "csgo"
///
/// [cvars]
/// vs_default_display_type = 3
/// vs_killer_color = "255,128,0"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_engine")]
    pub engine: String,
    #[serde(default = "default_game")]
    pub game: String,
    #[serde(default)]
    cvars: HashMap<String, toml::Value>,
}

fn default_engine() -> String {
    "orangebox".to_string()
}

fn default_game() -> String {
    "cstrike".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            engine: default_engine(),
            game: default_game(),
            cvars: HashMap::new(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| HostError::Parse {
            what: "server config",
            message: e.to_string(),
        })
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Cvar values as the engine would store them: plain strings.
    pub fn cvars(&self) -> HashMap<String, String> {
        self.cvars
            .iter()
            .map(|(name, value)| {
                let value = match value {
                    toml::Value::String(s) => s.clone(),
                    toml::Value::Boolean(b) => if *b { "1" } else { "0" }.to_string(),
                    other => other.to_string(),
                };
                (name.clone(), value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parses_engine_and_cvars() {
        let config = ServerConfig::from_toml_str(
            r#"
engine = "csgo"
game = "csgo"

[cvars]
vs_default_display_type = 3
vs_killer_color = "255,128,0"
vs_flag = true
"#,
        )
        .unwrap();

        assert_eq!(config.engine, "csgo");
        let cvars = config.cvars();
        assert_eq!(cvars["vs_default_display_type"], "3");
        assert_eq!(cvars["vs_killer_color"], "255,128,0");
        assert_eq!(cvars["vs_flag"], "1");
    }

    #[test]
    fn empty_file_uses_defaults() {
        assert_eq!(ServerConfig::from_toml_str("").unwrap(), ServerConfig::default());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ServerConfig::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, HostError::Io(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "game = \"tf\"").unwrap();
        let config = ServerConfig::load(file.path()).unwrap();
        assert_eq!(config.game, "tf");
        assert_eq!(config.engine, "orangebox");
    }
}
