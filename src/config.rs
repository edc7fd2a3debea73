use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Chart configuration
// ---------------------------------------------------------------------------

/// Outer margins of the chart canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 30.0,
            bottom: 40.0,
            left: 40.0,
        }
    }
}

/// Force simulation constants.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ForceConfig {
    /// Number of ticks run per layout.
    pub iterations: usize,
    /// Horizontal column every marker is pulled toward (inner coordinates).
    pub x_target: f32,
    pub x_strength: f32,
    /// Pull toward the middle of the month band.
    pub y_strength: f32,
    /// Extra spacing added to the marker radius for collisions.
    pub collide_padding: f32,
    pub collide_strength: f32,
    pub alpha_min: f32,
    /// Ticks over which alpha cools from 1 down to `alpha_min`.
    pub decay_ticks: usize,
    pub velocity_decay: f32,
}

impl Default for ForceConfig {
    fn default() -> Self {
        Self {
            iterations: 300,
            x_target: 300.0,
            x_strength: 0.1,
            y_strength: 3.0,
            collide_padding: 2.0,
            collide_strength: 1.0,
            alpha_min: 0.001,
            decay_ticks: 300,
            velocity_decay: 0.4,
        }
    }
}

impl ForceConfig {
    /// Per-tick alpha decay that reaches `alpha_min` after `decay_ticks` ticks.
    pub fn alpha_decay(&self) -> f32 {
        1.0 - self.alpha_min.powf(1.0 / self.decay_ticks.max(1) as f32)
    }
}

/// Geometry of the legend, relative to the inner chart origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LegendConfig {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub swatches: usize,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            x: 600.0,
            y: 150.0,
            width: 20.0,
            height: 200.0,
            swatches: 20,
        }
    }
}

/// Every tunable constant of the chart.  Can be partially overridden from JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub width: f32,
    pub height: f32,
    pub margin: Margin,
    pub marker_radius: f32,
    /// Only this many records are plotted.
    pub max_records: usize,
    /// Inner x position of the month axis.
    pub axis_x: f32,
    /// Padding between each band, as a fraction of the band step.
    pub band_padding: f32,
    pub forces: ForceConfig,
    pub legend: LegendConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            margin: Margin::default(),
            marker_radius: 6.0,
            max_records: 300,
            axis_x: 50.0,
            band_padding: 0.1,
            forces: ForceConfig::default(),
            legend: LegendConfig::default(),
        }
    }
}

impl ChartConfig {
    /// Read overrides from a JSON file; absent keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Vertical extent available to the month bands.
    pub fn inner_height(&self) -> f32 {
        self.height - self.margin.top - self.margin.bottom
    }

    /// Collision radius used by the layout.
    pub fn collide_radius(&self) -> f32 {
        self.marker_radius + self.forces.collide_padding
    }
}

#[cfg(test)]
mod tests {
    use super::ChartConfig;

    #[test]
    fn defaults_match_the_classic_chart() {
        let cfg = ChartConfig::default();
        assert_eq!(cfg.inner_height(), 540.0);
        assert_eq!(cfg.collide_radius(), 8.0);
        assert_eq!(cfg.forces.iterations, 300);
        assert!((cfg.forces.alpha_decay() - 0.022_763).abs() < 1e-5);
    }

    #[test]
    fn partial_json_overrides_keep_defaults() {
        let cfg = ChartConfig::from_json(r#"{"marker_radius": 4, "forces": {"iterations": 50}}"#)
            .unwrap();
        assert_eq!(cfg.marker_radius, 4.0);
        assert_eq!(cfg.forces.iterations, 50);
        assert_eq!(cfg.forces.y_strength, 3.0);
        assert_eq!(cfg.width, 800.0);
    }

    #[test]
    fn alpha_reaches_minimum_after_decay_ticks() {
        let cfg = ChartConfig::from_json(r#"{"forces": {"decay_ticks": 100}}"#).unwrap();
        let forces = cfg.forces;
        let mut alpha = 1.0_f32;
        for _ in 0..forces.decay_ticks {
            alpha -= alpha * forces.alpha_decay();
        }
        assert!((alpha - forces.alpha_min).abs() < 1e-5);
        assert!(forces.alpha_decay() > ChartConfig::default().forces.alpha_decay());
    }

    #[test]
    fn mistyped_value_is_an_error() {
        assert!(ChartConfig::from_json(r#"{"width": "wide"}"#).is_err());
    }
}
