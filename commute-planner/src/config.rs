//! Anchor configuration file.
//!
//! A JSON object mapping each anchor to the stops that serve it and the
//! walk to each stop, in whole minutes:
//!
//! ```json
//! {
//!   "home":   { "Les Templiers": 5, "Gare": 12 },
//!   "office": { "Sophia Antipolis": 3 }
//! }
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::anchors::{Anchor, AnchorSet};
use crate::domain::InvalidStopName;

/// Errors loading the anchor configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{anchor} stop names must not be blank")]
    BlankStop {
        anchor: Anchor,
        #[source]
        source: InvalidStopName,
    },
}

/// Walking minutes from each anchor to its stops.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommuteConfig {
    pub home: BTreeMap<String, u32>,
    pub office: BTreeMap<String, u32>,
}

impl CommuteConfig {
    /// Parse a config from JSON text.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&contents)
    }

    /// Build the home and office anchor sets.
    pub fn anchors(&self) -> Result<(AnchorSet, AnchorSet), ConfigError> {
        let build = |anchor, stops: &BTreeMap<String, u32>| {
            AnchorSet::from_minutes(stops.iter().map(|(s, m)| (s.as_str(), *m)))
                .map_err(|source| ConfigError::BlankStop { anchor, source })
        };
        Ok((
            build(Anchor::Home, &self.home)?,
            build(Anchor::Office, &self.office)?,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::tempdir;

    const SAMPLE: &str = r#"{
        "home": {"Les Templiers": 5, "Gare": 12},
        "office": {"Sophia Antipolis": 3}
    }"#;

    #[test]
    fn parses_both_anchors() {
        let config = CommuteConfig::from_json(SAMPLE).unwrap();

        assert_eq!(config.home.len(), 2);
        assert_eq!(config.home["Gare"], 12);
        assert_eq!(config.office["Sophia Antipolis"], 3);
    }

    #[test]
    fn builds_anchor_sets() {
        let (home, office) = CommuteConfig::from_json(SAMPLE).unwrap().anchors().unwrap();

        assert_eq!(home.walk_to("Les Templiers"), Some(Duration::minutes(5)));
        assert_eq!(office.walk_to("Sophia Antipolis"), Some(Duration::minutes(3)));
        assert!(office.walk_to("Gare").is_none());
    }

    #[test]
    fn missing_anchor_is_an_error() {
        let err = CommuteConfig::from_json(r#"{"home": {"A": 1}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
        assert!(err.to_string().contains("office"));
    }

    #[test]
    fn negative_walk_rejected() {
        let err = CommuteConfig::from_json(r#"{"home": {"A": -1}, "office": {}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn blank_stop_rejected() {
        let config = CommuteConfig::from_json(r#"{"home": {"A": 1}, "office": {"  ": 2}}"#).unwrap();
        let err = config.anchors().unwrap_err();

        assert!(matches!(
            err,
            ConfigError::BlankStop {
                anchor: Anchor::Office,
                ..
            }
        ));
        assert_eq!(err.to_string(), "office stop names must not be blank");
    }

    #[test]
    fn empty_anchor_allowed() {
        let (home, office) = CommuteConfig::from_json(r#"{"home": {}, "office": {"B": 2}}"#)
            .unwrap()
            .anchors()
            .unwrap();
        assert!(home.is_empty());
        assert_eq!(office.len(), 1);
    }

    #[test]
    fn load_from_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("commute.json");
        std::fs::write(&path, SAMPLE).unwrap();

        let config = CommuteConfig::load(&path).unwrap();
        assert_eq!(config.office.len(), 1);
    }

    #[test]
    fn missing_file() {
        let err = CommuteConfig::load("/nonexistent/commute.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().starts_with("cannot read /nonexistent/commute.json"));
    }
}
