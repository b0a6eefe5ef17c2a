//! # Stagehand
//!
//! **Scene sequencing for fixed-rate game loops.**
//!
//! Split a game into scenes, switch between them with pluggable transitions,
//! and get lifecycle notifications around every switch. The host loop runs a
//! single [`Game`]; a [`scene::Sequence`] is one, so it drives whichever scene
//! is current.
//!
//! ## Quick Start
//!
//! ```no_run
//! use stagehand::scene::{FadeDrawer, LinearTransition, Sequence, Switcher};
//! use stagehand::*;
//!
//! struct Title {
//!     switcher: Switcher,
//!     input: SharedInput,
//! }
//!
//! struct Stage;
//!
//! impl Game for Title {
//!     fn update(&mut self) -> GameResult {
//!         if self.input.borrow().key_pressed(KeyCode::Enter) {
//!             let fade = LinearTransition::new(30, FadeDrawer::new(Color::BLACK));
//!             self.switcher.switch_with(Stage, fade);
//!         }
//!         Ok(Flow::Continue)
//!     }
//!
//!     fn draw(&mut self, screen: &mut Canvas) {
//!         screen.fill(Color::rgb(0.1, 0.1, 0.15));
//!     }
//!
//!     fn layout(&mut self, _w: u32, _h: u32) -> (u32, u32) {
//!         (320, 240)
//!     }
//! }
//!
//! impl Game for Stage {
//!     fn update(&mut self) -> GameResult {
//!         Ok(Flow::Continue)
//!     }
//!
//!     fn draw(&mut self, screen: &mut Canvas) {
//!         screen.fill(Color::rgb(0.2, 0.5, 0.2));
//!     }
//!
//!     fn layout(&mut self, _w: u32, _h: u32) -> (u32, u32) {
//!         (320, 240)
//!     }
//! }
//!
//! fn main() -> Result<(), RunError> {
//!     let input = Input::shared();
//!     let switcher = Switcher::new();
//!     let title = Title {
//!         switcher: switcher.clone(),
//!         input: input.clone(),
//!     };
//!
//!     run_game(
//!         Sequence::with_switcher(title, switcher),
//!         RunConfig::new().title("Stagehand").input(input),
//!     )
//! }
//! ```
//!
//! ## Pieces
//!
//! - [`Game`] is the contract the loop drives. [`Lifecycle`], [`LayoutF`] and
//!   [`FinalScreenDrawer`] are optional capabilities a game opts into.
//! - [`scene`] holds the sequence, the switch handle, and the transitions.
//! - [`Canvas`] is the CPU pixel buffer everything draws into.
//! - [`run_game`] opens a window and runs the loop.

mod app;
mod canvas;
mod error;
mod game;
mod gpu;
mod input;
mod present;
pub mod scene;

pub use app::{RunConfig, run_game};
pub use canvas::{Canvas, Color, draw_final_screen_default, fit_transform};
pub use error::{GameError, GameResult, RunError};
pub use game::{
    FinalScreenDrawer, Flow, Game, LayoutF, Lifecycle, draw_final_screen, layout_precise,
};
pub use gpu::GpuContext;
pub use input::{Input, SharedInput};

// Re-export glam math types for convenience
pub use glam::{Affine2, Vec2};

// Re-export commonly used winit types for convenience
pub use winit::event::MouseButton;
pub use winit::keyboard::KeyCode;
