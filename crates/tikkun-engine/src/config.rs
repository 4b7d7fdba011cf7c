use std::path::Path;

use jiff::SignedDuration;
use serde::{Deserialize, Serialize};
use tracing::info;

use tikkun_match::MatchOptions;

use crate::error::EngineError;

/// Current config version. Bump this when adding fields or changing shape.
/// Each bump requires a corresponding entry in [`migrate`].
const CURRENT_VERSION: u32 = 1;

const DEFAULT_SESSION_WINDOW_SECS: u64 = 300;
const DEFAULT_TOP_CORRECTIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Schema version. Missing or 0 = pre-versioned config.
    #[serde(default)]
    pub config_version: u32,
    /// Records of one aggregation key at one location closer together than
    /// this count once in the aggregated view.
    #[serde(default = "default_session_window_secs")]
    pub session_window_secs: u64,
    #[serde(default)]
    pub match_options: MatchOptions,
    #[serde(default = "default_top_corrections")]
    pub top_corrections_default: usize,
}

fn default_session_window_secs() -> u64 {
    DEFAULT_SESSION_WINDOW_SECS
}

fn default_top_corrections() -> usize {
    DEFAULT_TOP_CORRECTIONS
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            config_version: CURRENT_VERSION,
            session_window_secs: DEFAULT_SESSION_WINDOW_SECS,
            match_options: MatchOptions::default(),
            top_corrections_default: DEFAULT_TOP_CORRECTIONS,
        }
    }
}

impl EngineConfig {
    pub fn session_window(&self) -> SignedDuration {
        SignedDuration::from_secs(i64::try_from(self.session_window_secs).unwrap_or(i64::MAX))
    }

    /// Parse a config document, migrating older shapes first.
    pub fn from_json(contents: &str) -> Result<Self, EngineError> {
        // Parse as raw JSON so we can run migrations before deserializing.
        let json: serde_json::Value = serde_json::from_str(contents)?;
        let on_disk_version = json
            .get("config_version")
            .and_then(|v| v.as_u64())
            .unwrap_or(0) as u32;

        let migrated = migrate(json, on_disk_version)?;
        Ok(serde_json::from_value(migrated)?)
    }

    pub fn load(path: &Path) -> Result<Self, EngineError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            EngineError::Config(format!("failed to read config at {}: {e}", path.display()))
        })?;
        Self::from_json(&contents)
    }

    /// Load `path` if it exists, defaults otherwise.
    pub fn load_or_default(path: &Path) -> Result<Self, EngineError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Write atomically (temp file, then rename), stamped with the current version.
    pub fn save(&self, path: &Path) -> Result<(), EngineError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let mut stamped = self.clone();
        stamped.config_version = CURRENT_VERSION;
        let json = serde_json::to_string_pretty(&stamped)?;

        let tmp_path = path.with_extension("json.tmp");
        std::fs::write(&tmp_path, &json)?;
        std::fs::rename(&tmp_path, path)?;
        info!(path = %path.display(), "config saved");
        Ok(())
    }
}

/// Run sequential migrations from `from_version` up to [`CURRENT_VERSION`].
fn migrate(mut json: serde_json::Value, from_version: u32) -> Result<serde_json::Value, EngineError> {
    if from_version > CURRENT_VERSION {
        return Err(EngineError::Config(format!(
            "config_version {from_version} is newer than this build supports ({CURRENT_VERSION})"
        )));
    }

    // v0 → v1: the session window was configured in whole minutes.
    if from_version < 1 {
        let obj = json
            .as_object_mut()
            .ok_or_else(|| EngineError::Config("config is not a JSON object".to_string()))?;
        if let Some(minutes) = obj
            .remove("session_window_minutes")
            .and_then(|v| v.as_u64())
        {
            obj.entry("session_window_secs")
                .or_insert(serde_json::Value::Number((minutes * 60).into()));
        }
        obj.insert(
            "config_version".to_string(),
            serde_json::Value::Number(1.into()),
        );
        info!("migrated config v0 → v1 (session window in seconds)");
    }

    Ok(json)
}
