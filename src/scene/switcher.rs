//! Handle scenes use to ask their sequence for a switch.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::game::Game;

use super::transition::{NopTransition, Transition};

/// A switch request waiting for the sequence to pick it up.
pub(crate) struct PendingSwitch {
    pub(crate) next: Box<dyn Game>,
    pub(crate) transition: Box<dyn Transition>,
}

#[derive(Default)]
struct SwitchSlot {
    /// A transition driver is installed on the sequence.
    switching: bool,
    pending: Option<PendingSwitch>,
}

/// Cloneable handle for requesting scene switches from inside a scene.
///
/// A scene cannot borrow the sequence that is updating it, so it keeps a
/// `Switcher` instead. Requests are queued and the sequence installs them at
/// the next update boundary: right after the requesting scene's `update`
/// returns, or at the start of the next `update` when queued from elsewhere.
///
/// # Example
///
/// ```
/// use stagehand::scene::{Sequence, Switcher};
/// use stagehand::{Canvas, Flow, Game, GameResult};
///
/// struct Menu {
///     switcher: Switcher,
/// }
///
/// struct Level;
///
/// impl Game for Level {
///     fn update(&mut self) -> GameResult { Ok(Flow::Continue) }
///     fn draw(&mut self, _screen: &mut Canvas) {}
///     fn layout(&mut self, w: u32, h: u32) -> (u32, u32) { (w, h) }
/// }
///
/// impl Game for Menu {
///     fn update(&mut self) -> GameResult {
///         self.switcher.switch(Level);
///         Ok(Flow::Continue)
///     }
///     fn draw(&mut self, _screen: &mut Canvas) {}
///     fn layout(&mut self, w: u32, h: u32) -> (u32, u32) { (w, h) }
/// }
///
/// let switcher = Switcher::new();
/// let mut sequence = Sequence::with_switcher(Menu { switcher: switcher.clone() }, switcher);
/// assert_eq!(sequence.update().unwrap(), Flow::Continue);
/// assert!(sequence.is_switching());
/// ```
#[derive(Clone, Default)]
pub struct Switcher {
    slot: Rc<RefCell<SwitchSlot>>,
}

impl Switcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request an instant switch to `next`.
    pub fn switch<G: Game + 'static>(&self, next: G) -> bool {
        self.switch_with(next, NopTransition)
    }

    /// Request a switch to `next` through `transition`.
    ///
    /// Returns `false`, dropping both arguments, if a switch is already in
    /// flight or queued.
    pub fn switch_with<G, T>(&self, next: G, transition: T) -> bool
    where
        G: Game + 'static,
        T: Transition + 'static,
    {
        self.queue(PendingSwitch {
            next: Box::new(next),
            transition: Box::new(transition),
        })
    }

    /// A switch is in flight or waiting to start.
    pub fn is_switching(&self) -> bool {
        let slot = self.slot.borrow();
        slot.switching || slot.pending.is_some()
    }

    fn queue(&self, request: PendingSwitch) -> bool {
        let mut slot = self.slot.borrow_mut();
        if slot.switching || slot.pending.is_some() {
            trace!("switch request rejected, another switch is in flight");
            return false;
        }
        slot.pending = Some(request);
        true
    }

    pub(crate) fn take_pending(&self) -> Option<PendingSwitch> {
        self.slot.borrow_mut().pending.take()
    }

    pub(crate) fn set_switching(&self, switching: bool) {
        self.slot.borrow_mut().switching = switching;
    }
}

impl fmt::Debug for Switcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slot = self.slot.borrow();
        f.debug_struct("Switcher")
            .field("switching", &slot.switching)
            .field("pending", &slot.pending.is_some())
            .finish()
    }
}
