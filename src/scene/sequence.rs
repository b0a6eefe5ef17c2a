//! The sequence: runs one scene at a time and switches between them.

use glam::Affine2;
use tracing::debug;

use crate::canvas::Canvas;
use crate::error::GameResult;
use crate::game::{self, FinalScreenDrawer, Game, LayoutF, Lifecycle};

use super::driver::TransitionDriver;
use super::switcher::Switcher;
use super::transition::{NopTransition, Transition};

/// Runs a series of [`Game`]s one after another.
///
/// The sequence is itself a `Game`, so the host loop runs it like any single
/// scene, and sequences can be nested. It owns the current scene and at most
/// one in-flight transition.
///
/// Lifecycle hooks fire in this order for a switch from `A` to `B`:
///
/// 1. `A.on_departure` when the switch is accepted
/// 2. `A.on_end`, then `B.on_start`, when the transition allows the swap
/// 3. `B.on_arrival` when the transition completes
///
/// The very first scene gets `on_start` and `on_arrival` on the first update.
pub struct Sequence {
    current: Box<dyn Game>,
    driver: Option<TransitionDriver>,
    started: bool,
    switcher: Switcher,
}

impl Sequence {
    /// Create a sequence starting with `first`. No hook fires until the first update.
    pub fn new<G: Game + 'static>(first: G) -> Self {
        Self::with_switcher(first, Switcher::new())
    }

    /// Create a sequence that accepts requests from an existing [`Switcher`].
    ///
    /// Use this when the first scene needs the handle before the sequence exists.
    pub fn with_switcher<G: Game + 'static>(first: G, switcher: Switcher) -> Self {
        Self {
            current: Box::new(first),
            driver: None,
            started: false,
            switcher,
        }
    }

    /// Replace the first scene before the loop starts.
    ///
    /// No lifecycle hook fires. Use [`switch`](Self::switch) to change scenes
    /// while running.
    pub fn set_first<G: Game + 'static>(&mut self, first: G) {
        self.current = Box::new(first);
    }

    /// A handle scenes can keep to request switches on this sequence.
    pub fn switcher(&self) -> Switcher {
        self.switcher.clone()
    }

    /// A transition is in progress or a requested one has not been installed yet.
    pub fn is_switching(&self) -> bool {
        self.driver.is_some() || self.switcher.is_switching()
    }

    /// Whether the in-flight transition has already swapped scenes.
    pub fn has_swapped(&self) -> Option<bool> {
        self.driver.as_ref().map(TransitionDriver::has_switched)
    }

    /// The scene that is currently updated and drawn.
    pub fn current(&self) -> &dyn Game {
        &*self.current
    }

    /// Switch to `next` instantly. Lifecycle hooks still fire.
    pub fn switch<G: Game + 'static>(&mut self, next: G) -> bool {
        self.switch_with(next, NopTransition)
    }

    /// Switch to `next` through `transition`.
    ///
    /// Returns `false` and changes nothing while another switch is in flight.
    /// Otherwise the transition is reset, the current scene gets
    /// `on_departure`, and the switch proceeds over the following updates.
    pub fn switch_with<G, T>(&mut self, next: G, transition: T) -> bool
    where
        G: Game + 'static,
        T: Transition + 'static,
    {
        if self.is_switching() {
            debug!("switch rejected, a transition is already in progress");
            return false;
        }
        self.begin_transition(Box::new(next), Box::new(transition));
        true
    }

    pub fn notify_start(&mut self) {
        if let Some(hooks) = self.current.as_lifecycle() {
            hooks.on_start();
        }
        self.started = true;
    }

    pub fn notify_end(&mut self) {
        if let Some(hooks) = self.current.as_lifecycle() {
            hooks.on_end();
        }
    }

    pub fn notify_arrival(&mut self) {
        if let Some(hooks) = self.current.as_lifecycle() {
            hooks.on_arrival();
        }
    }

    pub fn notify_departure(&mut self) {
        if let Some(hooks) = self.current.as_lifecycle() {
            hooks.on_departure();
        }
    }

    fn begin_transition(&mut self, next: Box<dyn Game>, transition: Box<dyn Transition>) {
        debug!("switch accepted");
        let mut driver = TransitionDriver::new(next, transition);
        driver.reset();
        self.driver = Some(driver);
        self.switcher.set_switching(true);
        self.notify_departure();
    }

    /// Install a request queued through a [`Switcher`], if any.
    fn apply_pending(&mut self) {
        if self.driver.is_some() {
            return;
        }
        if let Some(request) = self.switcher.take_pending() {
            self.begin_transition(request.next, request.transition);
        }
    }

    /// Swap the outgoing scene for `next`. Called by the driver.
    pub(crate) fn switch_scenes(&mut self, next: Box<dyn Game>) {
        self.notify_end();
        self.current = next;
        self.notify_start();
    }

    /// Drop the finished driver and announce arrival. Called by the driver.
    pub(crate) fn end_transition(&mut self) {
        self.driver = None;
        self.switcher.set_switching(false);
        self.notify_arrival();
    }

    fn update_transition(&mut self) -> GameResult {
        let Some(mut driver) = self.driver.take() else {
            return Ok(crate::Flow::Continue);
        };

        let result = driver.update(self);
        if !driver.is_finished() {
            self.driver = Some(driver);
        }
        result
    }
}

impl Game for Sequence {
    fn update(&mut self) -> GameResult {
        self.apply_pending();

        let flow = self.update_transition()?;
        if flow.is_terminate() {
            return Ok(flow);
        }

        if !self.started {
            self.notify_start();
            self.notify_arrival();
        }

        let result = self.current.update();
        self.apply_pending();
        result
    }

    fn draw(&mut self, screen: &mut Canvas) {
        self.current.draw(screen);
        if let Some(driver) = &mut self.driver {
            driver.draw(screen);
        }
    }

    fn layout(&mut self, outside_width: u32, outside_height: u32) -> (u32, u32) {
        self.current.layout(outside_width, outside_height)
    }

    fn as_lifecycle(&mut self) -> Option<&mut dyn Lifecycle> {
        Some(self)
    }

    fn as_layout_f(&mut self) -> Option<&mut dyn LayoutF> {
        Some(self)
    }

    fn as_final_screen_drawer(&mut self) -> Option<&mut dyn FinalScreenDrawer> {
        Some(self)
    }
}

impl Lifecycle for Sequence {
    fn on_start(&mut self) {
        self.notify_start();
    }

    fn on_end(&mut self) {
        self.notify_end();
    }

    fn on_arrival(&mut self) {
        self.notify_arrival();
    }

    fn on_departure(&mut self) {
        self.notify_departure();
    }
}

impl LayoutF for Sequence {
    fn layout_f(&mut self, outside_width: f64, outside_height: f64) -> (f64, f64) {
        game::layout_precise(&mut *self.current, outside_width, outside_height)
    }
}

impl FinalScreenDrawer for Sequence {
    fn draw_final_screen(&mut self, screen: &mut Canvas, offscreen: &Canvas, transform: Affine2) {
        game::draw_final_screen(&mut *self.current, screen, offscreen, transform);
    }
}
