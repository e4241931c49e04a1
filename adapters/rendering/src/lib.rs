#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Box Pusher adapters.

mod ascii;
mod layout;
mod scene;

use anyhow::Result as AnyResult;
use box_pusher_core::PlayerAction;
use thiserror::Error;

pub use ascii::{render_ascii, render_report};
pub use layout::BoardLayout;
pub use scene::{
    BoxPresentation, HudPresentation, Scene, TargetPresentation, INSTRUCTIONS, WIN_BANNER,
};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Colors used to draw every element of the board.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Palette {
    /// Window clear color.
    pub background: Color,
    /// Floor cell outlines and coordinate labels.
    pub grid_line: Color,
    /// Wall fill.
    pub wall: Color,
    /// Wall outline and texture.
    pub wall_highlight: Color,
    /// Floor fill.
    pub floor: Color,
    /// Player body.
    pub player: Color,
    /// Player outline.
    pub player_outline: Color,
    /// Box fill away from targets.
    pub box_fill: Color,
    /// Box outline away from targets.
    pub box_outline: Color,
    /// Box fill on a target and completed target fill.
    pub box_on_target: Color,
    /// Open target fill.
    pub target: Color,
    /// Target rings, also used to outline boxes resting on targets.
    pub target_outline: Color,
    /// Selection frame and win banner text.
    pub selection: Color,
    /// HUD text.
    pub text: Color,
    /// HUD bar and banner background.
    pub hud_background: Color,
}

impl Palette {
    /// Default vibrant palette.
    pub const CLASSIC: Self = Self {
        background: Color::from_rgb_u8(30, 30, 40),
        grid_line: Color::from_rgb_u8(80, 80, 100),
        wall: Color::from_rgb_u8(60, 60, 80),
        wall_highlight: Color::from_rgb_u8(100, 100, 130),
        floor: Color::from_rgb_u8(240, 245, 250),
        player: Color::from_rgb_u8(65, 150, 255),
        player_outline: Color::from_rgb_u8(40, 100, 200),
        box_fill: Color::from_rgb_u8(255, 180, 50),
        box_outline: Color::from_rgb_u8(200, 140, 30),
        box_on_target: Color::from_rgb_u8(50, 255, 100),
        target: Color::from_rgb_u8(255, 100, 150),
        target_outline: Color::from_rgb_u8(200, 70, 120),
        selection: Color::from_rgb_u8(255, 255, 100),
        text: Color::from_rgb_u8(255, 255, 255),
        hud_background: Color::from_rgb_u8(50, 50, 70),
    };

    /// Fill and outline colors for a box.
    #[must_use]
    pub const fn box_colors(&self, on_target: bool) -> (Color, Color) {
        if on_target {
            (self.box_on_target, self.target_outline)
        } else {
            (self.box_fill, self.box_outline)
        }
    }

    /// Fill color for a target.
    #[must_use]
    pub const fn target_fill(&self, completed: bool) -> Color {
        if completed {
            self.box_on_target
        } else {
            self.target
        }
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::CLASSIC
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Discrete action requested on this frame, if any.
    pub action: Option<PlayerAction>,
    /// Whether the adapter detected a quit request on this frame.
    pub quit: bool,
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Colors used to draw the scene.
    pub palette: Palette,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, palette: Palette, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            palette,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Box Pusher scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the input captured on each
    /// frame and may replace the scene before it is drawn. Backends stop after
    /// delivering a frame whose input requests quitting.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq, Error)]
pub enum RenderingError {
    /// Boards need at least one column and one row.
    #[error("board must contain at least one cell (received {columns}x{rows})")]
    EmptyBoard {
        /// Provided column count.
        columns: u32,
        /// Provided row count.
        rows: u32,
    },
    /// The window cannot fit a single pixel per cell below the HUD.
    #[error("window {width}x{height} is too small to draw the board")]
    WindowTooSmall {
        /// Window width in pixels.
        width: f32,
        /// Window height in pixels.
        height: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_bytes_map_to_unit_channels() {
        let color = Color::from_rgb_u8(255, 0, 51);
        assert_eq!(color, Color::new(1.0, 0.0, 0.2, 1.0));
    }

    #[test]
    fn lighten_moves_towards_white() {
        let lightened = Color::new(0.0, 0.5, 1.0, 0.4).lighten(0.5);
        assert_eq!(lightened, Color::new(0.5, 0.75, 1.0, 0.4));
        assert_eq!(Color::new(0.0, 0.0, 0.0, 1.0).lighten(4.0).red, 1.0);
    }

    #[test]
    fn boxes_on_targets_swap_to_completion_colors() {
        let palette = Palette::default();
        assert_eq!(
            palette.box_colors(true),
            (palette.box_on_target, palette.target_outline)
        );
        assert_eq!(
            palette.box_colors(false),
            (palette.box_fill, palette.box_outline)
        );
        assert_eq!(palette.target_fill(true), palette.box_on_target);
        assert_eq!(palette.target_fill(false), Color::from_rgb_u8(255, 100, 150));
    }
}
