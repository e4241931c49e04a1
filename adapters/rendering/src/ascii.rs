//! Plain-text board rendering for headless runs and logs.

use box_pusher_core::CellCoord;

use crate::{Scene, INSTRUCTIONS};

/// Renders the board with one three-character glyph per cell.
///
/// `P` player, `√` box on target, `X` box, `O` open target, `#` wall and
/// `_` floor, listed by drawing priority.
#[must_use]
pub fn render_ascii(scene: &Scene) -> String {
    let mut rows = Vec::with_capacity(scene.rows as usize);
    for row in 0..scene.rows {
        let line: String = (0..scene.columns)
            .map(|column| glyph(scene, CellCoord::new(column, row)))
            .collect();
        rows.push(line);
    }
    rows.join("\n")
}

/// Renders the board followed by the HUD lines shown in the window.
#[must_use]
pub fn render_report(scene: &Scene) -> String {
    let hud = &scene.hud;
    let mut lines = vec![
        render_ascii(scene),
        String::new(),
        hud.score_line(),
        hud.level_line(),
        hud.targets_line(),
    ];
    if let Some(banner) = hud.banner() {
        lines.push(banner.to_owned());
    }
    lines.push(INSTRUCTIONS.to_owned());
    lines.join("\n")
}

fn glyph(scene: &Scene, cell: CellCoord) -> &'static str {
    if scene.player == cell {
        return " P ";
    }
    if let Some(entry) = scene.box_at(cell) {
        return if entry.on_target { " √ " } else { " X " };
    }
    if scene.target_at(cell).is_some() {
        return " O ";
    }
    if scene.is_wall(cell) {
        " # "
    } else {
        " _ "
    }
}
