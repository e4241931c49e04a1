#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Box Pusher.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, so the crate depends on macroquad without its default `audio`
//! feature. The board is drawn with primitive shapes only.

mod board;
mod hud;

use anyhow::Result;
use box_pusher_core::{Direction, PlayerAction};
use box_pusher_rendering::{BoardLayout, FrameInput, Presentation, RenderingBackend};
use glam::Vec2;
use macroquad::input::{is_key_pressed, KeyCode};
use tracing::{info, warn};

/// Window size used when the caller does not request one.
pub const DEFAULT_WINDOW_SIZE: (i32, i32) = (800, 600);

/// Edge-triggered keys observed during a single frame.
#[doc(hidden)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyboardState {
    /// `W` or the up arrow.
    pub up: bool,
    /// `S` or the down arrow.
    pub down: bool,
    /// `A` or the left arrow.
    pub left: bool,
    /// `D` or the right arrow.
    pub right: bool,
    /// `Space`.
    pub select: bool,
    /// `R`.
    pub new_level: bool,
    /// `Escape` or `Q`.
    pub quit: bool,
}

impl KeyboardState {
    fn poll() -> Self {
        Self {
            up: is_key_pressed(KeyCode::W) || is_key_pressed(KeyCode::Up),
            down: is_key_pressed(KeyCode::S) || is_key_pressed(KeyCode::Down),
            left: is_key_pressed(KeyCode::A) || is_key_pressed(KeyCode::Left),
            right: is_key_pressed(KeyCode::D) || is_key_pressed(KeyCode::Right),
            select: is_key_pressed(KeyCode::Space),
            new_level: is_key_pressed(KeyCode::R),
            quit: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
        }
    }

    /// Resolves the frame input, keeping at most one action per frame.
    ///
    /// Movement wins over selection, which wins over a new-level request;
    /// directions resolve in up, down, left, right order.
    #[must_use]
    pub fn frame_input(self) -> FrameInput {
        let action = [
            (self.up, PlayerAction::Move(Direction::Up)),
            (self.down, PlayerAction::Move(Direction::Down)),
            (self.left, PlayerAction::Move(Direction::Left)),
            (self.right, PlayerAction::Move(Direction::Right)),
            (self.select, PlayerAction::ToggleSelection),
            (self.new_level, PlayerAction::NewLevel),
        ]
        .into_iter()
        .find_map(|(pressed, action)| pressed.then_some(action));

        FrameInput {
            action,
            quit: self.quit,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    window_size: (i32, i32),
    swap_interval: Option<i32>,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            swap_interval: None,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that opens a window of the default size.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the initial window size in pixels.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_size = (
            i32::try_from(width).unwrap_or(i32::MAX),
            i32::try_from(height).unwrap_or(i32::MAX),
        );
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(mut self, enabled: bool) -> Self {
        self.swap_interval = Some(i32::from(enabled));
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(FrameInput, &mut box_pusher_rendering::Scene) + 'static,
    {
        let Presentation {
            window_title,
            palette,
            scene,
        } = presentation;

        let (window_width, window_height) = self.window_size;
        let mut config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = self.swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let mut layout_error_reported = false;

            loop {
                let input = KeyboardState::poll().frame_input();
                update_scene(input, &mut scene);
                if input.quit {
                    info!(event = "window_closed");
                    break;
                }

                let window = Vec2::new(
                    macroquad::window::screen_width(),
                    macroquad::window::screen_height(),
                );
                macroquad::window::clear_background(to_macroquad_color(palette.background));

                match BoardLayout::fit(window, scene.columns, scene.rows) {
                    Ok(layout) => {
                        layout_error_reported = false;
                        let pulse = board::target_pulse(macroquad::time::get_time());
                        board::draw_board(&scene, &layout, &palette, pulse);
                    }
                    Err(error) => {
                        if !layout_error_reported {
                            warn!(event = "board_not_drawn", %error);
                            layout_error_reported = true;
                        }
                    }
                }
                hud::draw_hud(&scene.hud, window, &palette);

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn to_macroquad_color(color: box_pusher_rendering::Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
