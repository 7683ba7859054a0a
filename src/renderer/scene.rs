//! Scene drawing for each game
//!
//! Fixed draw orders:
//! - grid: obstacles, butterfly, flowers, birds
//! - continuous: entities, avatar, HUD, game-over overlay

use glam::Vec2;

use super::{Surface, TextAlign, glyphs};
use crate::settings::Settings;
use crate::sim::{DodgeState, GardenState, GridPos, HazardTag, RoamState};

const HUD_FONT_PX: f32 = 20.0;
const BANNER_FONT_PX: f32 = 36.0;
const ROAM_SPRITE_PX: f32 = 30.0;

fn hazard_glyph(tag: HazardTag) -> &'static str {
    match tag {
        HazardTag::Leaf => glyphs::LEAF,
        HazardTag::Rock => glyphs::ROCK,
        HazardTag::Bird => glyphs::BIRD,
    }
}

/// Draw a `size`-px glyph centered on `center`
fn glyph_at(surface: &mut dyn Surface, glyph: &str, center: Vec2, size: f32) {
    let half = size / 2.0;
    surface.draw_glyph(glyph, center.x - half, center.y + half);
}

fn glyph_in_cell(surface: &mut dyn Surface, glyph: &str, pos: GridPos, cell: f32, offset: f32) {
    surface.draw_glyph(glyph, pos.x as f32 * cell, pos.y as f32 * cell + offset);
}

fn game_over_banner(surface: &mut dyn Surface, width: f32, height: f32, hint: &str) {
    let (cx, cy) = (width / 2.0, height / 2.0);
    surface.set_font(BANNER_FONT_PX);
    surface.draw_text("Game Over", cx, cy, TextAlign::Center);
    surface.set_font(HUD_FONT_PX);
    surface.draw_text(hint, cx, cy + 40.0, TextAlign::Center);
}

/// Turn-based grid board
pub fn draw_garden(state: &GardenState, settings: &Settings, surface: &mut dyn Surface) {
    surface.clear();
    surface.set_font(settings.glyph_px());

    let cell = settings.cell_px(state.tuning.grid_size);
    let offset = settings.glyph_baseline();

    for (index, obstacle) in state.obstacles.iter().enumerate() {
        let glyph = if index % 2 == 0 { glyphs::TREE } else { glyphs::ROCK };
        glyph_in_cell(surface, glyph, *obstacle, cell, offset);
    }
    glyph_in_cell(surface, glyphs::BUTTERFLY, state.butterfly, cell, offset);
    for flower in &state.flowers {
        glyph_in_cell(surface, glyphs::FLOWER, *flower, cell, offset);
    }
    for bird in &state.birds {
        glyph_in_cell(surface, glyphs::BIRD, *bird, cell, offset);
    }
}

/// Lane dodge: hazards, player, score, overlay
pub fn draw_dodge(state: &DodgeState, settings: &Settings, surface: &mut dyn Surface) {
    surface.clear();

    for hazard in &state.hazards {
        surface.set_font(hazard.width);
        glyph_at(surface, hazard_glyph(hazard.tag), hazard.pos, hazard.width);
    }

    let player_width = state.tuning.player_width;
    surface.set_font(player_width);
    glyph_at(surface, glyphs::BUTTERFLY, state.player_pos(), player_width);

    surface.set_font(HUD_FONT_PX);
    let score = state.display_score(settings.score_divisor);
    surface.draw_text(&format!("Score: {score}"), 10.0, 30.0, TextAlign::Left);

    if state.game_over {
        let hint = "Press Space or tap to restart";
        game_over_banner(surface, state.tuning.width, state.tuning.height, hint);
    }
}

/// Free roam: flowers, hazards, avatar, score, overlay
pub fn draw_roam(state: &RoamState, settings: &Settings, surface: &mut dyn Surface) {
    surface.clear();
    let sprite = settings.sprite_px(ROAM_SPRITE_PX);
    surface.set_font(sprite);

    for flower in &state.flowers {
        glyph_at(surface, glyphs::SUNFLOWER, *flower, sprite);
    }
    for hazard in &state.hazards {
        glyph_at(surface, glyphs::SPIDER, *hazard, sprite);
    }
    glyph_at(surface, glyphs::BEE, state.pos, sprite);

    surface.set_font(HUD_FONT_PX);
    surface.draw_text(
        &format!("Score: {}", state.score),
        10.0,
        30.0,
        TextAlign::Left,
    );

    if state.game_over {
        game_over_banner(surface, state.tuning.width, state.tuning.height, "Reload to play again");
    }
}
