//! Display settings and preferences
//!
//! Render-side knobs only; gameplay balance lives in `tuning`.

use serde::{Deserialize, Serialize};

use crate::consts::GRID_CANVAS_PX;

/// Display settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Side of the square grid-game canvas
    pub grid_canvas_px: f32,
    /// Glyph size on desktop
    pub font_px: f32,
    /// Glyph size on touch devices
    pub touch_font_px: f32,
    /// Viewports at most this wide count as touch devices
    pub touch_breakpoint_px: f32,
    /// Set at startup from the viewport
    pub touch: bool,
    /// Lane dodge shows ticks survived divided by this
    pub score_divisor: u64,
    /// Shortest drag that counts as a swipe
    pub swipe_min_px: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            grid_canvas_px: GRID_CANVAS_PX,
            font_px: 24.0,
            touch_font_px: 48.0,
            touch_breakpoint_px: 768.0,
            touch: false,
            score_divisor: 10,
            swipe_min_px: 30.0,
        }
    }
}

impl Settings {
    /// Settings for a viewport of the given width
    pub fn for_viewport(width: f32, has_touch: bool) -> Self {
        let mut settings = Self::default();
        settings.touch = has_touch || width <= settings.touch_breakpoint_px;
        settings
    }

    /// Effective glyph size
    pub fn glyph_px(&self) -> f32 {
        if self.touch {
            self.touch_font_px
        } else {
            self.font_px
        }
    }

    /// Scale a desktop sprite size up for touch screens
    pub fn sprite_px(&self, desktop_px: f32) -> f32 {
        if self.touch {
            desktop_px * self.touch_font_px / self.font_px.max(1.0)
        } else {
            desktop_px
        }
    }

    /// Pixel size of one grid cell
    pub fn cell_px(&self, grid_size: i32) -> f32 {
        self.grid_canvas_px / grid_size.max(1) as f32
    }

    /// Baseline offset so glyphs sit inside their cell
    pub fn glyph_baseline(&self) -> f32 {
        self.glyph_px() - 8.0
    }
}
