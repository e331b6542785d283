use serde::{Deserialize, Serialize};

use crate::error::BoardError;
use crate::grid::{CELL_SIZE, CHUNK_SIZE, GRID_SIZE, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};

/// Tunable board constants. Missing JSON fields fall back to the defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub grid_size: u32,
    pub cell_size: f64,
    pub chunk_size: u32,
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub zoom_step: f64,
    pub initial_zoom: f64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            cell_size: CELL_SIZE,
            chunk_size: CHUNK_SIZE,
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            zoom_step: ZOOM_STEP,
            initial_zoom: ZOOM_MIN,
        }
    }
}

impl BoardConfig {
    /// Parse and validate a JSON config blob.
    pub fn from_json(text: &str) -> Result<Self, BoardError> {
        let config: BoardConfig = serde_json::from_str(text)
            .map_err(|e| BoardError::InvalidConfig(e.to_string()))?;
        config.validate()
    }

    /// Check invariants; returns the config with `initial_zoom` clamped.
    pub fn validate(mut self) -> Result<Self, BoardError> {
        let invalid = |reason: &str| Err(BoardError::InvalidConfig(reason.to_string()));
        if self.grid_size == 0 {
            return invalid("grid_size must be positive");
        }
        if self.chunk_size == 0 {
            return invalid("chunk_size must be positive");
        }
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return invalid("cell_size must be a positive number");
        }
        if !(self.zoom_step.is_finite() && self.zoom_step > 0.0) {
            return invalid("zoom_step must be a positive number");
        }
        if !(self.zoom_min.is_finite() && self.zoom_min > 0.0) {
            return invalid("zoom_min must be a positive number");
        }
        if !(self.zoom_max.is_finite() && self.zoom_min <= self.zoom_max) {
            return invalid("zoom_max must not be below zoom_min");
        }
        self.initial_zoom = self.clamp_zoom(self.initial_zoom);
        Ok(self)
    }

    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        if zoom.is_nan() {
            return self.zoom_min;
        }
        zoom.clamp(self.zoom_min, self.zoom_max)
    }

    pub fn zoom_in(&self, zoom: f64) -> f64 {
        self.clamp_zoom(zoom + self.zoom_step)
    }

    pub fn zoom_out(&self, zoom: f64) -> f64 {
        self.clamp_zoom(zoom - self.zoom_step)
    }

    /// Backing-store edge length of the board canvas at `zoom`.
    pub fn canvas_extent(&self, zoom: f64) -> f64 {
        self.grid_size as f64 * self.cell_size * zoom
    }

    /// Chunks per side: `ceil(grid_size / chunk_size)`.
    pub fn chunks_per_side(&self) -> u32 {
        self.grid_size.div_ceil(self.chunk_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_board_constants() {
        let c = BoardConfig::default();
        assert_eq!(c.grid_size, 1000);
        assert_eq!(c.cell_size, 5.0);
        assert_eq!(c.chunk_size, 100);
        assert_eq!(c.chunks_per_side(), 10);
        assert_eq!(c.canvas_extent(2.0), 10_000.0);
    }

    #[test]
    fn test_zoom_steps_and_clamps() {
        let c = BoardConfig::default();
        assert_eq!(c.zoom_in(1.0), 1.5);
        assert_eq!(c.zoom_in(4.0), 4.0);
        assert_eq!(c.zoom_out(1.0), 1.0);
        assert_eq!(c.zoom_out(2.5), 2.0);
        assert_eq!(c.clamp_zoom(9.0), 4.0);
        assert_eq!(c.clamp_zoom(0.2), 1.0);
        assert_eq!(c.clamp_zoom(f64::NAN), 1.0);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let c = BoardConfig::from_json(r#"{ "grid_size": 250, "initial_zoom": 10 }"#).unwrap();
        assert_eq!(c.grid_size, 250);
        assert_eq!(c.chunk_size, 100);
        assert_eq!(c.chunks_per_side(), 3);
        assert_eq!(c.initial_zoom, 4.0);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(BoardConfig::from_json(r#"{ "chunk_size": 0 }"#).is_err());
        assert!(BoardConfig::from_json(r#"{ "cell_size": -1.0 }"#).is_err());
        assert!(BoardConfig::from_json(r#"{ "zoom_min": 3.0, "zoom_max": 2.0 }"#).is_err());
        assert!(BoardConfig::from_json("not json").is_err());
    }
}
