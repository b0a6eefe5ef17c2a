//! Scene sequencing and transitions.
//!
//! A [`Sequence`] holds the current scene and swaps it for another on request,
//! optionally playing a [`Transition`] in between. Scenes get lifecycle
//! notifications around each switch through [`Lifecycle`](crate::Lifecycle).
//!
//! # Overview
//!
//! - [`Sequence`] is a [`Game`](crate::Game) itself, so it is what you hand to
//!   the host loop.
//! - [`Switcher`] is the handle scenes keep to request a switch.
//! - [`Transition`] is the effect contract; [`NopTransition`] switches instantly
//!   and [`LinearTransition`] runs for a fixed number of frames, drawing through
//!   a [`LinearTransitionDrawer`] such as [`FadeDrawer`].
//!
//! # Example
//!
//! ```no_run
//! use stagehand::scene::{FadeDrawer, LinearTransition, Sequence, Switcher};
//! use stagehand::{Canvas, Color, Flow, Game, GameResult, RunConfig, run_game};
//!
//! struct Title {
//!     switcher: Switcher,
//!     ticks: u32,
//! }
//!
//! struct Stage;
//!
//! impl Game for Title {
//!     fn update(&mut self) -> GameResult {
//!         self.ticks += 1;
//!         if self.ticks == 120 {
//!             let fade = LinearTransition::new(30, FadeDrawer::new(Color::BLACK));
//!             self.switcher.switch_with(Stage, fade);
//!         }
//!         Ok(Flow::Continue)
//!     }
//!
//!     fn draw(&mut self, screen: &mut Canvas) {
//!         screen.fill(Color::rgb(0.1, 0.1, 0.3));
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
//!         screen.fill(Color::rgb(0.1, 0.3, 0.1));
//!     }
//!
//!     fn layout(&mut self, _w: u32, _h: u32) -> (u32, u32) {
//!         (320, 240)
//!     }
//! }
//!
//! fn main() -> Result<(), stagehand::RunError> {
//!     let switcher = Switcher::new();
//!     let title = Title { switcher: switcher.clone(), ticks: 0 };
//!     run_game(Sequence::with_switcher(title, switcher), RunConfig::default())
//! }
//! ```

mod driver;
mod linear;
mod sequence;
mod switcher;
mod transition;

pub use linear::{
    Easing, FadeDrawer, LinearTransition, LinearTransitionDrawer, LinearTransitionProgress,
};
pub use sequence::Sequence;
pub use switcher::Switcher;
pub use transition::{NopTransition, Transition};
