// =============================================================================
// Engine configuration — JSON-backed settings with serde defaults
// =============================================================================
//
// Every field carries a serde default so that older config files missing new
// fields still deserialise. Persistence uses a tmp + rename pattern so a
// crash mid-write cannot corrupt the file.

use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

// =============================================================================
// Default-value helpers (required by serde `default = "..."` attribute)
// =============================================================================

fn default_quote_suffix() -> String {
    "-USD".to_string()
}

fn default_min_volume_24h() -> f64 {
    100_000.0
}

fn default_recommended_pairs() -> Vec<String> {
    vec![
        "ETH-USD".to_string(),
        "SOL-USD".to_string(),
        "MATIC-USD".to_string(),
    ]
}

fn default_request_interval_ms() -> u64 {
    500
}

/// Engine settings: scan filters, the recommended-pair list, and the
/// courtesy spacing between remote requests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Quote-currency suffix a pair id must end with to be scanned.
    #[serde(default = "default_quote_suffix")]
    pub quote_suffix: String,

    /// Minimum 24h volume for a pair to be considered by the scanner.
    #[serde(default = "default_min_volume_24h")]
    pub min_volume_24h: f64,

    /// Pairs the detailed analysis report covers.
    #[serde(default = "default_recommended_pairs")]
    pub recommended_pairs: Vec<String>,

    /// Minimum spacing between remote requests, in milliseconds.
    #[serde(default = "default_request_interval_ms")]
    pub request_interval_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            quote_suffix: default_quote_suffix(),
            min_volume_24h: default_min_volume_24h(),
            recommended_pairs: default_recommended_pairs(),
            request_interval_ms: default_request_interval_ms(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file at `path`.
    ///
    /// Returns an error when the file is missing or malformed so the caller
    /// can fall back to defaults with a warning.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;

        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config from {}", path.display()))?;

        info!(
            path = %path.display(),
            quote_suffix = %config.quote_suffix,
            min_volume_24h = config.min_volume_24h,
            "config loaded"
        );

        Ok(config)
    }

    /// Persist the configuration to `path` using an atomic write (write to
    /// `.tmp`, then rename).
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        let content =
            serde_json::to_string_pretty(self).context("failed to serialise config to JSON")?;

        let tmp_path = path.with_extension("json.tmp");

        std::fs::write(&tmp_path, &content)
            .with_context(|| format!("failed to write tmp config to {}", tmp_path.display()))?;

        std::fs::rename(&tmp_path, path)
            .with_context(|| format!("failed to rename tmp config to {}", path.display()))?;

        info!(path = %path.display(), "config saved");
        Ok(())
    }

    /// Minimum spacing between remote requests.
    pub fn request_interval(&self) -> Duration {
        Duration::from_millis(self.request_interval_ms)
    }
}

// =============================================================================
// Tests
// =============================================================================
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.quote_suffix, "-USD");
        assert!((cfg.min_volume_24h - 100_000.0).abs() < f64::EPSILON);
        assert_eq!(
            cfg.recommended_pairs,
            vec!["ETH-USD", "SOL-USD", "MATIC-USD"]
        );
        assert_eq!(cfg.request_interval(), Duration::from_millis(500));
    }

    #[test]
    fn deserialise_empty_json_uses_defaults() {
        let cfg: EngineConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(cfg, EngineConfig::default());
    }

    #[test]
    fn deserialise_partial_json_fills_defaults() {
        let json = r#"{ "quote_suffix": "-EUR", "min_volume_24h": 25000.0 }"#;
        let cfg: EngineConfig = serde_json::from_str(json).unwrap();
        assert_eq!(cfg.quote_suffix, "-EUR");
        assert!((cfg.min_volume_24h - 25_000.0).abs() < f64::EPSILON);
        assert_eq!(cfg.recommended_pairs.len(), 3);
        assert_eq!(cfg.request_interval_ms, 500);
    }

    #[test]
    fn roundtrip_serialisation() {
        let cfg = EngineConfig {
            quote_suffix: "-USDT".into(),
            min_volume_24h: 42.0,
            recommended_pairs: vec!["BTC-USDT".into()],
            request_interval_ms: 250,
        };
        let json = serde_json::to_string(&cfg).unwrap();
        let cfg2: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(cfg, cfg2);
    }
}
