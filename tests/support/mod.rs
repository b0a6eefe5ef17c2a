//! Recording scenes and transitions, plus a headless stand-in for the host loop.

#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use stagehand::scene::Transition;
use stagehand::{
    Affine2, Canvas, FinalScreenDrawer, Flow, Game, GameError, GameResult, LayoutF, Lifecycle,
    layout_precise,
};

/// Shared log of `name:event` entries.
#[derive(Clone, Default)]
pub struct Recorder {
    logs: Rc<RefCell<Vec<String>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, name: &str, event: &str) {
        self.logs.borrow_mut().push(format!("{name}:{event}"));
    }

    pub fn logs(&self) -> Vec<String> {
        self.logs.borrow().clone()
    }

    /// Entries whose event is not in `skip`.
    pub fn logs_without(&self, skip: &[&str]) -> Vec<String> {
        self.logs
            .borrow()
            .iter()
            .filter(|entry| {
                let event = entry.split_once(':').map_or(entry.as_str(), |(_, e)| e);
                !skip.contains(&event)
            })
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.logs.borrow_mut().clear();
    }
}

type UpdateFn = Box<dyn FnMut() -> GameResult>;

/// A scene that records every call made on it.
///
/// Without an update function, `update` returns [`Flow::Terminate`].
pub struct TestScene {
    name: &'static str,
    recorder: Recorder,
    update_fn: Option<UpdateFn>,
    layout: (u32, u32),
    layout_f: Option<(f64, f64)>,
    lifecycle: bool,
    final_screen: bool,
}

impl TestScene {
    pub fn new(name: &'static str, recorder: &Recorder) -> Self {
        Self {
            name,
            recorder: recorder.clone(),
            update_fn: None,
            layout: (3, 3),
            layout_f: None,
            lifecycle: false,
            final_screen: false,
        }
    }

    pub fn on_update(mut self, f: impl FnMut() -> GameResult + 'static) -> Self {
        self.update_fn = Some(Box::new(f));
        self
    }

    /// Keep returning `Continue` forever.
    pub fn running(self) -> Self {
        self.on_update(|| Ok(Flow::Continue))
    }

    pub fn with_lifecycle(mut self) -> Self {
        self.lifecycle = true;
        self
    }

    pub fn with_layout(mut self, width: u32, height: u32) -> Self {
        self.layout = (width, height);
        self
    }

    pub fn with_layout_f(mut self, width: f64, height: f64) -> Self {
        self.layout_f = Some((width, height));
        self
    }

    pub fn with_final_screen(mut self) -> Self {
        self.final_screen = true;
        self
    }

    fn append(&self, event: &str) {
        self.recorder.append(self.name, event);
    }
}

impl Game for TestScene {
    fn update(&mut self) -> GameResult {
        self.append("update");
        match &mut self.update_fn {
            Some(f) => f(),
            None => Ok(Flow::Terminate),
        }
    }

    fn draw(&mut self, _screen: &mut Canvas) {
        self.append("draw");
    }

    fn layout(&mut self, _outside_width: u32, _outside_height: u32) -> (u32, u32) {
        self.append("layout");
        self.layout
    }

    fn as_lifecycle(&mut self) -> Option<&mut dyn Lifecycle> {
        if self.lifecycle { Some(self) } else { None }
    }

    fn as_layout_f(&mut self) -> Option<&mut dyn LayoutF> {
        if self.layout_f.is_some() {
            Some(self)
        } else {
            None
        }
    }

    fn as_final_screen_drawer(&mut self) -> Option<&mut dyn FinalScreenDrawer> {
        if self.final_screen { Some(self) } else { None }
    }
}

impl Lifecycle for TestScene {
    fn on_start(&mut self) {
        self.append("onstart");
    }

    fn on_end(&mut self) {
        self.append("onend");
    }

    fn on_arrival(&mut self) {
        self.append("onarrival");
    }

    fn on_departure(&mut self) {
        self.append("ondeparture");
    }
}

impl LayoutF for TestScene {
    fn layout_f(&mut self, _outside_width: f64, _outside_height: f64) -> (f64, f64) {
        self.append("layoutf");
        self.layout_f.unwrap_or_default()
    }
}

impl FinalScreenDrawer for TestScene {
    fn draw_final_screen(&mut self, _screen: &mut Canvas, _offscreen: &Canvas, _transform: Affine2) {
        self.append("drawfinalscreen");
    }
}

/// A transition that allows the swap at `switch_frames` and completes at `max_frames`.
pub struct TestTransition {
    name: &'static str,
    recorder: Recorder,
    switch_frames: u32,
    max_frames: u32,
    current_frame: u32,
}

impl TestTransition {
    pub fn new(name: &'static str, recorder: &Recorder, switch_frames: u32, max_frames: u32) -> Self {
        Self {
            name,
            recorder: recorder.clone(),
            switch_frames,
            max_frames,
            current_frame: 0,
        }
    }
}

impl Transition for TestTransition {
    fn reset(&mut self) {
        self.current_frame = 0;
        self.recorder.append(self.name, "reset");
    }

    fn update(&mut self) -> GameResult {
        self.recorder.append(self.name, "update");
        if self.current_frame < self.max_frames {
            self.current_frame += 1;
        }
        Ok(Flow::Continue)
    }

    fn draw(&mut self, _screen: &mut Canvas) {
        self.recorder.append(self.name, "draw");
    }

    fn completed(&self) -> bool {
        self.current_frame >= self.max_frames
    }

    fn can_switch_scenes(&self) -> bool {
        self.current_frame >= self.switch_frames
    }
}

/// Drive `game` the way the host loop does, for at most 100 frames.
///
/// Stops cleanly on `Flow::Terminate` and returns the first update error.
pub fn run_for_test(game: &mut dyn Game) -> Result<u32, GameError> {
    let mut screen = Canvas::new(3, 3);
    let mut final_screen = Canvas::new(3, 3);

    for frame in 0..100 {
        let _ = layout_precise(game, 0.0, 0.0);

        if game.update()?.is_terminate() {
            return Ok(frame);
        }

        game.draw(&mut screen);
        if let Some(drawer) = game.as_final_screen_drawer() {
            drawer.draw_final_screen(&mut final_screen, &screen, Affine2::IDENTITY);
        }
    }
    Ok(100)
}

/// Install a test subscriber so `RUST_LOG`-style output shows up with `--nocapture`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
