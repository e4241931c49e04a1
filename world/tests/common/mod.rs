#![allow(dead_code)]

use box_pusher_core::{BoxId, CellCoord, CellKind};
use box_pusher_world::{Grid, PuzzleParts, PuzzleState};

/// Builds a puzzle from an ASCII map.
///
/// `#` wall, `@` player, `$` box, `.` target, `*` box on target,
/// `+` player on target, anything else floor. Boxes receive ids in row-major
/// order.
pub fn puzzle(map: &str) -> PuzzleState {
    PuzzleState::from_parts(parts(map)).expect("map describes a valid puzzle")
}

pub fn parts(map: &str) -> PuzzleParts {
    let lines: Vec<&str> = map
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.trim().is_empty())
        .map(str::trim_start)
        .collect();

    let mut rows = Vec::with_capacity(lines.len());
    let mut player = None;
    let mut boxes = Vec::new();
    let mut targets = Vec::new();

    for (row, line) in lines.iter().enumerate() {
        let row = row as u32;
        let mut kinds = Vec::with_capacity(line.len());
        for (column, glyph) in line.chars().enumerate() {
            let cell = CellCoord::new(column as u32, row);
            let kind = match glyph {
                '#' => CellKind::Wall,
                _ => CellKind::Empty,
            };
            match glyph {
                '@' => player = Some(cell),
                '+' => {
                    player = Some(cell);
                    targets.push(cell);
                }
                '$' => boxes.push(cell),
                '.' => targets.push(cell),
                '*' => {
                    boxes.push(cell);
                    targets.push(cell);
                }
                _ => {}
            }
            kinds.push(kind);
        }
        rows.push(kinds);
    }

    let grid = Grid::from_rows(rows).expect("rectangular map");
    let mut parts = PuzzleParts::new(grid, player.expect("map places a player"));
    parts.boxes = boxes
        .into_iter()
        .enumerate()
        .map(|(index, cell)| (BoxId::new(index as u32), cell))
        .collect();
    parts.targets = targets;
    parts
}
