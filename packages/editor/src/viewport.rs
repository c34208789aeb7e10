//! Canvas viewport and grid settings.

use crate::component::Position;
use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    zoom: f64,
    pub pan_x: f64,
    pub pan_y: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }
}

impl Viewport {
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Out-of-range values are clamped to `[MIN_ZOOM, MAX_ZOOM]`; non-finite
    /// values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        }
    }

    pub fn zoom_in(&mut self, step: f64) {
        self.set_zoom(self.zoom * step);
    }

    pub fn zoom_out(&mut self, step: f64) {
        if step > 0.0 {
            self.set_zoom(self.zoom / step);
        }
    }

    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        self.pan_x += dx;
        self.pan_y += dy;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Deserialized documents bypass `set_zoom`; re-apply the clamp.
    pub(crate) fn normalized(mut self) -> Self {
        let zoom = self.zoom;
        self.zoom = 1.0;
        self.set_zoom(zoom);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Grid {
    pub enabled: bool,
    pub snap_to_grid: bool,
    size: u32,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            enabled: true,
            snap_to_grid: false,
            size: 8,
        }
    }
}

impl Grid {
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Grid size is always at least 1.
    pub fn set_size(&mut self, size: u32) {
        self.size = size.max(1);
    }

    pub fn toggle(&mut self) {
        self.enabled = !self.enabled;
    }

    pub fn toggle_snap(&mut self) {
        self.snap_to_grid = !self.snap_to_grid;
    }

    /// Round to the nearest grid point when snapping is on.
    pub fn snap(&self, position: Position) -> Position {
        if !self.snap_to_grid {
            return position;
        }
        let step = f64::from(self.size.max(1));
        Position::new(
            (position.x / step).round() * step,
            (position.y / step).round() * step,
        )
    }

    pub(crate) fn normalized(mut self) -> Self {
        self.set_size(self.size);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zoom_clamps() {
        let mut viewport = Viewport::default();
        viewport.set_zoom(10.0);
        assert_eq!(viewport.zoom(), 5.0);
        viewport.set_zoom(0.001);
        assert_eq!(viewport.zoom(), 0.1);
        viewport.set_zoom(f64::NAN);
        assert_eq!(viewport.zoom(), 0.1);
    }

    #[test]
    fn test_zoom_steps_stay_in_range() {
        let mut viewport = Viewport::default();
        for _ in 0..50 {
            viewport.zoom_in(1.2);
        }
        assert_eq!(viewport.zoom(), MAX_ZOOM);
        for _ in 0..50 {
            viewport.zoom_out(1.2);
        }
        assert_eq!(viewport.zoom(), MIN_ZOOM);
    }

    #[test]
    fn test_reset() {
        let mut viewport = Viewport::default();
        viewport.set_zoom(2.0);
        viewport.pan_by(-40.0, 12.5);
        viewport.reset();
        assert_eq!(viewport, Viewport::default());
    }

    #[test]
    fn test_grid_snap() {
        let mut grid = Grid::default();
        let p = Position::new(13.0, 21.0);
        assert_eq!(grid.snap(p), p);

        grid.toggle_snap();
        grid.set_size(10);
        assert_eq!(grid.snap(p), Position::new(10.0, 20.0));

        grid.set_size(0);
        assert_eq!(grid.size(), 1);
    }

    #[test]
    fn test_normalize_deserialized() {
        let viewport: Viewport =
            serde_json::from_str(r#"{"zoom": 40.0, "panX": 1.0, "panY": 2.0}"#).unwrap();
        assert_eq!(viewport.normalized().zoom(), MAX_ZOOM);

        let grid: Grid =
            serde_json::from_str(r#"{"enabled": true, "snapToGrid": true, "size": 0}"#).unwrap();
        assert_eq!(grid.normalized().size(), 1);
    }
}
