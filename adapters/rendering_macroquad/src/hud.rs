//! Score bar, footer lines and the win banner.

use box_pusher_rendering::{BoardLayout, HudPresentation, Palette, INSTRUCTIONS};
use glam::Vec2;
use macroquad::{
    shapes::{draw_rectangle, draw_rectangle_lines},
    text::{draw_text, measure_text},
};

use crate::to_macroquad_color;

const HUD_FONT_SIZE: f32 = 24.0;
const FOOTER_FONT_SIZE: f32 = 18.0;
const BANNER_FONT_SIZE: u16 = 36;

pub(crate) fn draw_hud(hud: &HudPresentation, window: Vec2, palette: &Palette) {
    let text = to_macroquad_color(palette.text);

    draw_rectangle(
        0.0,
        0.0,
        window.x,
        BoardLayout::HUD_HEIGHT,
        to_macroquad_color(palette.hud_background),
    );
    draw_text(&hud.score_line(), 10.0, 26.0, HUD_FONT_SIZE, text);

    let targets = hud.targets_line();
    let width = measure_text(&targets, None, HUD_FONT_SIZE as u16, 1.0).width;
    draw_text(&targets, window.x - width - 10.0, 26.0, HUD_FONT_SIZE, text);

    draw_text(&hud.level_line(), 10.0, window.y - 20.0, FOOTER_FONT_SIZE, text);
    draw_text(INSTRUCTIONS, 10.0, window.y - 5.0, FOOTER_FONT_SIZE, text);

    if let Some(banner) = hud.banner() {
        draw_banner(banner, window, palette);
    }
}

fn draw_banner(banner: &str, window: Vec2, palette: &Palette) {
    let highlight = to_macroquad_color(palette.selection);
    let dimensions = measure_text(banner, None, BANNER_FONT_SIZE, 1.0);
    let padding = Vec2::new(10.0, 5.0);
    let size = Vec2::new(dimensions.width, dimensions.height) + padding * 2.0;
    let corner = window / 2.0 - size / 2.0;

    draw_rectangle(
        corner.x,
        corner.y,
        size.x,
        size.y,
        to_macroquad_color(palette.hud_background),
    );
    draw_rectangle_lines(corner.x, corner.y, size.x, size.y, 3.0, highlight);
    draw_text(
        banner,
        corner.x + padding.x,
        corner.y + padding.y + dimensions.offset_y,
        f32::from(BANNER_FONT_SIZE),
        highlight,
    );
}
