//! Canvas 2D surface for the browser

use anyhow::{Result, anyhow};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{Surface, TextAlign};

const FONT_FAMILY: &str = "Arial";

/// `Surface` backed by a `CanvasRenderingContext2d`
pub struct CanvasSurface {
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(|js_value| anyhow!("Error getting context: {:#?}", js_value))?
            .ok_or_else(|| anyhow!("No 2d context found"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|element| {
                anyhow!("Error converting {:#?} to CanvasRenderingContext2d", element)
            })?;

        Ok(Self {
            context,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
        })
    }

    fn fill_text(&self, text: &str, x: f32, y: f32) {
        if let Err(e) = self.context.fill_text(text, x as f64, y as f64) {
            log::warn!("fill_text failed for {text:?}: {e:?}");
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self) {
        self.context.clear_rect(0.0, 0.0, self.width, self.height);
    }

    fn set_font(&mut self, px: f32) {
        self.context.set_font(&format!("{px}px {FONT_FAMILY}"));
    }

    fn draw_glyph(&mut self, glyph: &str, x: f32, y: f32) {
        self.context.set_text_align(TextAlign::Left.as_str());
        self.fill_text(glyph, x, y);
    }

    fn draw_text(&mut self, text: &str, x: f32, y: f32, align: TextAlign) {
        self.context.set_text_align(align.as_str());
        self.fill_text(text, x, y);
    }
}
