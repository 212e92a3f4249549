use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Editor settings, grouped the way they are consumed.
///
/// Every field has a default so a partial JSON file only overrides what it
/// names.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub canvas: CanvasSettings,
    pub node: NodeSettings,
    pub edge: EdgeSettings,
    pub weights: WeightSettings,
    pub interaction: InteractionSettings,
}

impl EditorConfig {
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        log::debug!(
            "editor config: canvas {}x{}, node radius {}",
            config.canvas.width,
            config.canvas.height,
            config.node.radius
        );
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: 700.0,
            height: 500.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeSettings {
    pub radius: f32,
    /// Gap kept between a node's rim and the canvas border while dragging.
    pub bound_padding: f32,
    /// Highest slot count a loaded graph may claim, tombstones included.
    pub max_slots: usize,
}

impl NodeSettings {
    /// Minimum distance from a node centre to the canvas border.
    pub fn clearance(&self) -> f32 {
        self.radius + self.bound_padding
    }
}

impl Default for NodeSettings {
    fn default() -> Self {
        Self {
            radius: 18.0,
            bound_padding: 3.0,
            max_slots: 10_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgeSettings {
    pub width: f32,
    /// Extra distance either side of the stroke that still counts as a hit.
    pub hit_tolerance: f32,
}

impl EdgeSettings {
    pub fn hit_distance(&self) -> f32 {
        self.width * 0.5 + self.hit_tolerance
    }
}

impl Default for EdgeSettings {
    fn default() -> Self {
        Self {
            width: 2.0,
            hit_tolerance: 4.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightSettings {
    /// Smallest weight given to a freshly connected edge.
    pub min: u32,
    /// Largest weight given to a freshly connected edge.
    pub max: u32,
    /// Weight text must stay strictly shorter than this many characters.
    pub text_cap: usize,
    /// Fixed seed for reproducible random weights.
    pub seed: Option<u64>,
}

impl Default for WeightSettings {
    fn default() -> Self {
        Self {
            min: 1,
            max: 100,
            text_cap: 5,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Clicks arriving this soon after a drag release are not selections.
    pub click_suppression_secs: f64,
}

impl Default for InteractionSettings {
    fn default() -> Self {
        Self {
            click_suppression_secs: 0.05,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = EditorConfig::from_json(
            r#"{ "canvas": { "width": 2000 }, "weights": { "seed": 7 } }"#,
        )
        .unwrap();

        assert_eq!(config.canvas.width, 2000.0);
        assert_eq!(config.canvas.height, 500.0);
        assert_eq!(config.weights.seed, Some(7));
        assert_eq!(config.weights.max, 100);
        assert_eq!(config.node, NodeSettings::default());
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        let err = EditorConfig::from_json("{ canvas: }").unwrap_err();
        assert!(
            matches!(err, ConfigError::Parse(_)),
            "expected parse error, got {:?}",
            err
        );
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let path = std::env::temp_dir()
            .join("graph_editor_config_that_does_not_exist.json");
        let err = EditorConfig::load_from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_clearance_and_hit_distance() {
        let config = EditorConfig::default();
        assert_eq!(config.node.clearance(), 21.0);
        assert_eq!(config.edge.hit_distance(), 5.0);
    }

    #[test]
    fn test_max_slots_override() {
        let config = EditorConfig::from_json(r#"{ "node": { "max_slots": 64 } }"#).unwrap();
        assert_eq!(config.node.max_slots, 64);
        assert_eq!(config.node.radius, 18.0);
        assert_eq!(EditorConfig::default().node.max_slots, 10_000);
    }
}
