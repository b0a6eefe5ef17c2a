//! The game contract the host loop drives, plus its optional capabilities.
//!
//! A [`Game`] produces one step of state per tick, draws the current frame, and
//! reports the size of the surface it wants to draw into. Everything else is an
//! optional capability: a game opts in by implementing the capability trait and
//! returning `Some(self)` from the matching accessor.
//!
//! # Example
//!
//! ```
//! use stagehand::{Canvas, Color, Flow, Game, GameResult, Lifecycle};
//!
//! struct Title {
//!     ticks: u32,
//! }
//!
//! impl Game for Title {
//!     fn update(&mut self) -> GameResult {
//!         self.ticks += 1;
//!         Ok(Flow::Continue)
//!     }
//!
//!     fn draw(&mut self, screen: &mut Canvas) {
//!         screen.fill(Color::BLACK);
//!     }
//!
//!     fn layout(&mut self, _outside_width: u32, _outside_height: u32) -> (u32, u32) {
//!         (320, 240)
//!     }
//!
//!     fn as_lifecycle(&mut self) -> Option<&mut dyn Lifecycle> {
//!         Some(self)
//!     }
//! }
//!
//! impl Lifecycle for Title {
//!     fn on_start(&mut self) {
//!         self.ticks = 0;
//!     }
//! }
//! ```

use glam::Affine2;

use crate::canvas::Canvas;
use crate::error::GameResult;

/// What the host loop should do after an update.
#[must_use]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Flow {
    /// Keep running.
    #[default]
    Continue,
    /// Stop the loop cleanly. Not a failure.
    Terminate,
}

impl Flow {
    pub fn is_terminate(self) -> bool {
        matches!(self, Flow::Terminate)
    }
}

/// A unit the host loop can update, draw, and lay out.
pub trait Game {
    /// Advance one tick.
    fn update(&mut self) -> GameResult;

    /// Draw the current frame.
    fn draw(&mut self, screen: &mut Canvas);

    /// Return the logical screen size for the given outside (window) size.
    fn layout(&mut self, outside_width: u32, outside_height: u32) -> (u32, u32);

    /// Lifecycle hooks, if this game wants them.
    fn as_lifecycle(&mut self) -> Option<&mut dyn Lifecycle> {
        None
    }

    /// Floating-point layout, if this game supports it.
    fn as_layout_f(&mut self) -> Option<&mut dyn LayoutF> {
        None
    }

    /// Custom final-screen composition, if this game provides one.
    fn as_final_screen_drawer(&mut self) -> Option<&mut dyn FinalScreenDrawer> {
        None
    }
}

impl<G: Game + ?Sized> Game for Box<G> {
    fn update(&mut self) -> GameResult {
        (**self).update()
    }

    fn draw(&mut self, screen: &mut Canvas) {
        (**self).draw(screen)
    }

    fn layout(&mut self, outside_width: u32, outside_height: u32) -> (u32, u32) {
        (**self).layout(outside_width, outside_height)
    }

    fn as_lifecycle(&mut self) -> Option<&mut dyn Lifecycle> {
        (**self).as_lifecycle()
    }

    fn as_layout_f(&mut self) -> Option<&mut dyn LayoutF> {
        (**self).as_layout_f()
    }

    fn as_final_screen_drawer(&mut self) -> Option<&mut dyn FinalScreenDrawer> {
        (**self).as_final_screen_drawer()
    }
}

/// Notifications fired around scene switches.
///
/// Every hook defaults to a no-op, so a scene overrides only the ones it needs.
pub trait Lifecycle {
    /// The scene became the current scene.
    fn on_start(&mut self) {}

    /// The scene stopped being the current scene.
    fn on_end(&mut self) {}

    /// The transition into this scene has finished.
    fn on_arrival(&mut self) {}

    /// A transition away from this scene has begun.
    fn on_departure(&mut self) {}
}

/// Layout with sub-pixel precision.
pub trait LayoutF {
    fn layout_f(&mut self, outside_width: f64, outside_height: f64) -> (f64, f64);
}

/// Composes the offscreen frame onto the final output surface.
pub trait FinalScreenDrawer {
    fn draw_final_screen(&mut self, screen: &mut Canvas, offscreen: &Canvas, transform: Affine2);
}

/// Ask a game for its screen size, preferring the precise layout when offered.
///
/// Games without [`LayoutF`] get their outside size clamped to at least one
/// pixel per axis and truncated before the integer layout is called.
pub fn layout_precise(game: &mut dyn Game, outside_width: f64, outside_height: f64) -> (f64, f64) {
    if let Some(precise) = game.as_layout_f() {
        return precise.layout_f(outside_width, outside_height);
    }

    let width = (outside_width as i64).max(1) as u32;
    let height = (outside_height as i64).max(1) as u32;
    let (width, height) = game.layout(width, height);
    (f64::from(width), f64::from(height))
}

/// Compose `offscreen` onto `screen` through the game's drawer, or the default blit.
pub fn draw_final_screen(
    game: &mut dyn Game,
    screen: &mut Canvas,
    offscreen: &Canvas,
    transform: Affine2,
) {
    match game.as_final_screen_drawer() {
        Some(drawer) => drawer.draw_final_screen(screen, offscreen, transform),
        None => crate::canvas::draw_final_screen_default(screen, offscreen, transform),
    }
}
