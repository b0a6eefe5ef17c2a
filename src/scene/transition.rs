//! The transition contract and the no-op default.

use std::cell::RefCell;
use std::rc::Rc;

use crate::canvas::Canvas;
use crate::error::GameResult;
use crate::game::Flow;

/// A pluggable effect played while the sequence switches scenes.
///
/// A transition separates *when the scenes swap* ([`can_switch_scenes`]) from
/// *when the effect is over* ([`completed`]). A fade can swap at its midpoint so
/// the new scene is already live while the overlay clears.
///
/// The same value may be reused for several switches; [`reset`] is called at
/// the start of each one.
///
/// [`can_switch_scenes`]: Transition::can_switch_scenes
/// [`completed`]: Transition::completed
/// [`reset`]: Transition::reset
pub trait Transition {
    /// Rewind progress to the start. Called once per switch, before the first update.
    fn reset(&mut self);

    /// Advance one frame.
    fn update(&mut self) -> GameResult;

    /// Paint the effect on top of the frame the current scene just drew.
    fn draw(&mut self, screen: &mut Canvas);

    /// The effect has finished.
    fn completed(&self) -> bool;

    /// The outgoing scene may now be replaced by the incoming one.
    fn can_switch_scenes(&self) -> bool;
}

/// A transition that swaps and completes on its first update and draws nothing.
#[derive(Clone, Copy, Debug, Default)]
pub struct NopTransition;

impl Transition for NopTransition {
    fn reset(&mut self) {}

    fn update(&mut self) -> GameResult {
        Ok(Flow::Continue)
    }

    fn draw(&mut self, _screen: &mut Canvas) {}

    fn completed(&self) -> bool {
        true
    }

    fn can_switch_scenes(&self) -> bool {
        true
    }
}

impl<T: Transition + ?Sized> Transition for Box<T> {
    fn reset(&mut self) {
        (**self).reset()
    }

    fn update(&mut self) -> GameResult {
        (**self).update()
    }

    fn draw(&mut self, screen: &mut Canvas) {
        (**self).draw(screen)
    }

    fn completed(&self) -> bool {
        (**self).completed()
    }

    fn can_switch_scenes(&self) -> bool {
        (**self).can_switch_scenes()
    }
}

/// Shared handle, so one transition value can be kept by a scene and handed to
/// the sequence on every switch.
impl<T: Transition + ?Sized> Transition for Rc<RefCell<T>> {
    fn reset(&mut self) {
        self.borrow_mut().reset()
    }

    fn update(&mut self) -> GameResult {
        self.borrow_mut().update()
    }

    fn draw(&mut self, screen: &mut Canvas) {
        self.borrow_mut().draw(screen)
    }

    fn completed(&self) -> bool {
        self.borrow().completed()
    }

    fn can_switch_scenes(&self) -> bool {
        self.borrow().can_switch_scenes()
    }
}
