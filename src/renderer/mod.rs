//! Rendering module
//!
//! Scenes are drawn as emoji glyphs and text over a minimal `Surface`.
//! Draw functions read state and issue calls; they never mutate anything.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod scene;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::{draw_dodge, draw_garden, draw_roam};

/// Horizontal anchor for text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

impl TextAlign {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        }
    }
}

/// A 2D drawing target
pub trait Surface {
    /// Erase the whole surface
    fn clear(&mut self);
    /// Font size in pixels for subsequent glyphs and text
    fn set_font(&mut self, px: f32);
    /// Draw a glyph with its left baseline at (x, y)
    fn draw_glyph(&mut self, glyph: &str, x: f32, y: f32);
    fn draw_text(&mut self, text: &str, x: f32, y: f32, align: TextAlign);
}

/// Emoji used for each sprite
pub mod glyphs {
    pub const BUTTERFLY: &str = "\u{1F98B}";
    pub const FLOWER: &str = "\u{1F338}";
    pub const BIRD: &str = "\u{1F426}";
    pub const TREE: &str = "\u{1F333}";
    pub const ROCK: &str = "\u{1FAA8}";
    pub const LEAF: &str = "\u{1F342}";
    pub const BEE: &str = "\u{1F41D}";
    pub const SUNFLOWER: &str = "\u{1F33B}";
    pub const SPIDER: &str = "\u{1F577}";
}

/// One recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Clear,
    Font(f32),
    Glyph { glyph: String, x: f32, y: f32 },
    Text { text: String, x: f32, y: f32, align: TextAlign },
}

/// Headless surface that records every call
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Glyphs drawn, in order
    pub fn glyphs(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Glyph { glyph, .. } => Some(glyph.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Text drawn, in order
    pub fn texts(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self) {
        self.calls.push(DrawCall::Clear);
    }

    fn set_font(&mut self, px: f32) {
        self.calls.push(DrawCall::Font(px));
    }

    fn draw_glyph(&mut self, glyph: &str, x: f32, y: f32) {
        self.calls.push(DrawCall::Glyph {
            glyph: glyph.to_string(),
            x,
            y,
        });
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, align: TextAlign) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            align,
        });
    }
}
