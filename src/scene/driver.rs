//! Runs one in-flight transition for a [`Sequence`].

use tracing::debug;

use crate::canvas::Canvas;
use crate::error::GameResult;
use crate::game::Game;

use super::sequence::Sequence;
use super::transition::Transition;

/// Drives a transition and performs the scene swap at the moment it allows.
///
/// Lives only while a switch is in progress. Holds the incoming scene until
/// the swap, after which `next` is `None`.
pub(crate) struct TransitionDriver {
    next: Option<Box<dyn Game>>,
    transition: Box<dyn Transition>,
    finished: bool,
}

impl TransitionDriver {
    pub(crate) fn new(next: Box<dyn Game>, transition: Box<dyn Transition>) -> Self {
        Self {
            next: Some(next),
            transition,
            finished: false,
        }
    }

    pub(crate) fn reset(&mut self) {
        self.transition.reset();
    }

    /// Advance the transition one frame.
    ///
    /// Errors and `Flow::Terminate` from the transition are returned as-is and
    /// skip the swap/complete checks for this frame.
    pub(crate) fn update(&mut self, sequence: &mut Sequence) -> GameResult {
        let flow = self.transition.update()?;
        if flow.is_terminate() {
            return Ok(flow);
        }

        let completed = self.transition.completed();

        // A transition that completes without ever allowing the swap still
        // swaps, so end/start never get skipped.
        if self.transition.can_switch_scenes() || completed {
            if let Some(next) = self.next.take() {
                debug!("transition swapping scenes");
                sequence.switch_scenes(next);
            }
        }

        if completed {
            debug!("transition completed");
            self.finished = true;
            sequence.end_transition();
        }

        Ok(flow)
    }

    pub(crate) fn draw(&mut self, screen: &mut Canvas) {
        self.transition.draw(screen);
    }

    pub(crate) fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn has_switched(&self) -> bool {
        self.next.is_none()
    }
}
