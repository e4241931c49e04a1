//! Board cells, targets, boxes and the player.

use box_pusher_core::CellCoord;
use box_pusher_rendering::{BoardLayout, BoxPresentation, Palette, Scene, TargetPresentation};
use macroquad::{
    shapes::{draw_circle, draw_circle_lines, draw_rectangle, draw_rectangle_lines},
    text::{draw_text, measure_text},
};

use crate::to_macroquad_color;

const LABEL_FONT_SIZE: u16 = 16;
const PULSE_PERIOD_MS: u64 = 1_000;

/// Triangle wave in `0.0..=1.0` with a one second period, peaking on the whole second.
pub(crate) fn target_pulse(seconds: f64) -> f32 {
    let millis = (seconds.max(0.0) * 1_000.0) as u64 % PULSE_PERIOD_MS;
    let half = PULSE_PERIOD_MS / 2;
    millis.abs_diff(half) as f32 / half as f32
}

pub(crate) fn draw_board(
    scene: &Scene,
    layout: &BoardLayout,
    palette: &Palette,
    pulse: f32,
) {
    for row in 0..scene.rows {
        for column in 0..scene.columns {
            let cell = CellCoord::new(column, row);
            draw_cell(cell, scene.is_wall(cell), layout, palette);
        }
    }
    draw_coordinate_labels(scene, layout, palette);

    for target in &scene.targets {
        draw_target(target, layout, palette, pulse);
    }
    for entry in &scene.boxes {
        draw_box(entry, layout, palette);
    }
    draw_player(scene.player, layout, palette);
}

fn draw_cell(cell: CellCoord, wall: bool, layout: &BoardLayout, palette: &Palette) {
    let origin = layout.cell_origin(cell);
    let size = layout.cell_size();

    if wall {
        draw_rectangle(origin.x, origin.y, size, size, to_macroquad_color(palette.wall));
        draw_rectangle_lines(
            origin.x,
            origin.y,
            size,
            size,
            2.0,
            to_macroquad_color(palette.wall_highlight),
        );
        let tile = size / 3.0;
        for i in 0..3 {
            for j in 0..3 {
                if (i + j) % 2 == 0 {
                    draw_rectangle(
                        origin.x + i as f32 * tile + tile / 4.0,
                        origin.y + j as f32 * tile + tile / 4.0,
                        tile / 2.0,
                        tile / 2.0,
                        to_macroquad_color(palette.wall_highlight),
                    );
                }
            }
        }
    } else {
        draw_rectangle(origin.x, origin.y, size, size, to_macroquad_color(palette.floor));
        draw_rectangle_lines(
            origin.x,
            origin.y,
            size,
            size,
            1.0,
            to_macroquad_color(palette.grid_line),
        );
    }
}

fn draw_target(
    target: &TargetPresentation,
    layout: &BoardLayout,
    palette: &Palette,
    pulse: f32,
) {
    let center = layout.cell_center(target.cell);
    let radius = layout.cell_size() * (0.3 + 0.1 * pulse);
    let outline = to_macroquad_color(palette.target_outline);

    draw_circle(
        center.x,
        center.y,
        radius,
        to_macroquad_color(palette.target_fill(target.completed)),
    );
    draw_circle_lines(center.x, center.y, radius, 3.0, outline);
    draw_circle_lines(center.x, center.y, radius / 2.0, 2.0, outline);
}

fn draw_box(entry: &BoxPresentation, layout: &BoardLayout, palette: &Palette) {
    let inset = layout.cell_size() * 0.1;
    let origin = layout.cell_origin(entry.cell) + glam::Vec2::splat(inset);
    let size = layout.cell_size() - 2.0 * inset;
    let (fill, outline) = palette.box_colors(entry.on_target);

    draw_rectangle(origin.x, origin.y, size, size, to_macroquad_color(fill));
    draw_rectangle_lines(origin.x, origin.y, size, size, 3.0, to_macroquad_color(outline));
    draw_rectangle(
        origin.x + 2.0,
        origin.y + 2.0,
        size - 4.0,
        size / 3.0,
        to_macroquad_color(fill.lighten(0.2)),
    );

    if entry.selected {
        draw_rectangle_lines(
            origin.x - 3.0,
            origin.y - 3.0,
            size + 6.0,
            size + 6.0,
            3.0,
            to_macroquad_color(palette.selection),
        );
    }
}

fn draw_player(cell: CellCoord, layout: &BoardLayout, palette: &Palette) {
    let center = layout.cell_center(cell);
    let radius = layout.cell_size() * 0.36;
    let eye_offset = radius / 3.0;

    draw_circle(center.x, center.y, radius, to_macroquad_color(palette.player));
    draw_circle_lines(
        center.x,
        center.y,
        radius,
        3.0,
        to_macroquad_color(palette.player_outline),
    );
    for side in [-1.0, 1.0] {
        draw_circle(
            center.x + side * eye_offset,
            center.y - eye_offset * 0.7,
            radius / 6.0,
            to_macroquad_color(palette.text),
        );
    }
}

fn draw_coordinate_labels(scene: &Scene, layout: &BoardLayout, palette: &Palette) {
    let color = to_macroquad_color(palette.grid_line);
    for column in 0..scene.columns {
        draw_centered(
            &column.to_string(),
            layout.column_label_position(column),
            color,
        );
    }
    for row in 0..scene.rows {
        draw_centered(&row.to_string(), layout.row_label_position(row), color);
    }
}

fn draw_centered(text: &str, center: glam::Vec2, color: macroquad::color::Color) {
    let dimensions = measure_text(text, None, LABEL_FONT_SIZE, 1.0);
    draw_text(
        text,
        center.x - dimensions.width / 2.0,
        center.y + dimensions.offset_y / 2.0,
        f32::from(LABEL_FONT_SIZE),
        color,
    );
}
