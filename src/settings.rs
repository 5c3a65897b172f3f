use std::{fs, path::Path, sync::OnceLock};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

static DEFAULT_CONFIG: OnceLock<Value> = OnceLock::new();

/// Built-in widget display options. Built on first use and never mutated.
pub fn default_config() -> &'static Value {
    DEFAULT_CONFIG.get_or_init(|| {
        json!({
            "width": "100%",
            "options": {
                "height": 64,
                "waveColor": "#4F4A85",
                "progressColor": "#383351",
                "cursorColor": "#DDDD",
                "cursorWidth": 1,
                "dragToSeek": true,
                "normalize": true
            },
            "plugins": ["hover", "minimap", "timeline"],
            "pluginOptions": {
                "hover": {
                    "lineColor": "#DDDD",
                    "lineWidth": 2,
                    "labelBackground": "#5555",
                    "labelColor": "#FFFF",
                    "labelSize": "11px"
                },
                "minimap": {
                    "height": 30,
                    "waveColor": "#DDDD",
                    "progressColor": "#9999",
                    "normalize": true
                },
                "timeline": {
                    "height": 15,
                    "timeInterval": 0.1,
                    "primaryLabelInterval": 1,
                    "insertPosition": "beforebegin",
                    "style": {"fontSize": "11px", "color": "#DDDD"}
                },
                "spectrogram": {
                    "labels": true,
                    "colorMap": "roseus",
                    "fftSamples": 2048
                },
                "zoom": {"scale": 0.5, "maxZoom": 1000},
                "regions": {"color": "rgba(255, 255, 255, 0.2)"}
            }
        })
    })
}

/// Widget display options: the defaults with caller overrides merged on top.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerConfig(Value);

impl Default for PlayerConfig {
    fn default() -> Self {
        Self(default_config().clone())
    }
}

impl PlayerConfig {
    pub fn with_overrides(overrides: Value) -> Self {
        let mut config = Self::default();
        config.merge(overrides);
        config
    }

    /// Reads a JSON override file and merges it over the defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read player config from {}", path.display()))?;
        let overrides: Value = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse player config {}", path.display()))?;
        anyhow::ensure!(
            overrides.is_object(),
            "player config {} must be a JSON object",
            path.display()
        );
        Ok(Self::with_overrides(overrides))
    }

    pub fn merge(&mut self, overrides: Value) {
        deep_merge(&mut self.0, overrides);
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn width(&self) -> &str {
        self.0.get("width").and_then(Value::as_str).unwrap_or("100%")
    }

    pub fn plugins(&self) -> Vec<&str> {
        self.0
            .get("plugins")
            .and_then(Value::as_array)
            .map(|plugins| plugins.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }
}

/// Arrays concatenate, objects merge recursively, anything else in
/// `overrides` replaces the base value.
pub fn deep_merge(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Array(base_items), Value::Array(extra)) => base_items.extend(extra),
        (Value::Object(base_map), Value::Object(extra)) => merge_maps(base_map, extra),
        (slot, value) => *slot = value,
    }
}

fn merge_maps(base: &mut Map<String, Value>, overrides: Map<String, Value>) {
    for (key, value) in overrides {
        match base.get_mut(&key) {
            Some(existing) => deep_merge(existing, value),
            None => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn lists_concatenate_and_maps_merge() {
        let config = PlayerConfig::with_overrides(json!({
            "plugins": ["spectrogram"],
            "pluginOptions": {"spectrogram": {"colorMap": "igray"}},
            "width": "640px"
        }));

        assert_eq!(config.plugins(), ["hover", "minimap", "timeline", "spectrogram"]);
        assert_eq!(config.width(), "640px");
        let spectrogram = &config.as_value()["pluginOptions"]["spectrogram"];
        assert_eq!(spectrogram["colorMap"], "igray");
        assert_eq!(spectrogram["fftSamples"], 2048);
    }

    #[test]
    fn defaults_are_not_mutated_by_overrides() {
        let _ = PlayerConfig::with_overrides(json!({"options": {"height": 200}}));
        assert_eq!(default_config()["options"]["height"], 64);
    }

    #[test]
    fn scalar_overrides_replace_containers() {
        let mut base = json!({"a": {"b": 1}, "c": [1]});
        deep_merge(&mut base, json!({"a": null, "c": [2, 3], "d": true}));
        assert_eq!(base, json!({"a": null, "c": [1, 2, 3], "d": true}));
    }

    #[test]
    fn from_file_merges_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"plugins": ["zoom"]}}"#).unwrap();
        let config = PlayerConfig::from_file(file.path()).unwrap();
        assert!(config.plugins().contains(&"zoom"));

        let mut bad = tempfile::NamedTempFile::new().unwrap();
        write!(bad, "[1, 2]").unwrap();
        assert!(PlayerConfig::from_file(bad.path()).is_err());
    }
}
