use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::canvas::{Canvas, fit_transform};
use crate::error::{GameResult, RunError};
use crate::game::{self, Flow, Game};
use crate::gpu::GpuContext;
use crate::input::{Input, SharedInput};
use crate::present::PresentPass;

/// Configuration for the window and the fixed-rate update loop.
#[derive(Clone, Debug)]
pub struct RunConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Updates per second. Draws happen once per redraw regardless.
    pub ticks_per_second: u32,
    /// Upper bound on catch-up updates in a single frame.
    pub max_ticks_per_frame: u32,
    /// Input state the loop feeds. Share it with scenes that poll input.
    pub input: Option<SharedInput>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            title: "Stagehand".to_string(),
            width: 640,
            height: 480,
            ticks_per_second: 60,
            max_ticks_per_frame: 5,
            input: None,
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn ticks_per_second(mut self, ticks: u32) -> Self {
        self.ticks_per_second = ticks.max(1);
        self
    }

    pub fn max_ticks_per_frame(mut self, ticks: u32) -> Self {
        self.max_ticks_per_frame = ticks.max(1);
        self
    }

    pub fn input(mut self, input: SharedInput) -> Self {
        self.input = Some(input);
        self
    }
}

/// Open a window and drive `game` until it terminates or the window closes.
///
/// Each frame the loop asks the game for its layout, runs as many fixed-rate
/// updates as have accumulated, draws into an offscreen canvas of the layout
/// size, then composes that onto the window through the game's final-screen
/// drawer (or the default scaled blit).
///
/// Returns `Ok(())` when an update returns [`Flow::Terminate`] or the window is
/// closed, and the update's error wrapped in [`RunError::Game`] when one fails.
///
/// # Example
/// ```no_run
/// use stagehand::scene::Sequence;
/// use stagehand::{Canvas, Color, Flow, Game, GameResult, RunConfig, run_game};
///
/// struct Blank;
///
/// impl Game for Blank {
///     fn update(&mut self) -> GameResult {
///         Ok(Flow::Continue)
///     }
///
///     fn draw(&mut self, screen: &mut Canvas) {
///         screen.fill(Color::BLACK);
///     }
///
///     fn layout(&mut self, w: u32, h: u32) -> (u32, u32) {
///         (w, h)
///     }
/// }
///
/// run_game(
///     Sequence::new(Blank),
///     RunConfig::new().title("Blank").size(1280, 720),
/// )
/// .unwrap();
/// ```
pub fn run_game<G: Game + 'static>(game: G, config: RunConfig) -> Result<(), RunError> {
    let event_loop = EventLoop::new().map_err(RunError::EventLoop)?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut host = Host {
        state: HostState::Pending {
            config,
            game: Box::new(game),
        },
        outcome: Ok(()),
    };

    event_loop.run_app(&mut host).map_err(RunError::EventLoop)?;
    host.outcome
}

struct Host {
    state: HostState,
    outcome: Result<(), RunError>,
}

enum HostState {
    Pending {
        config: RunConfig,
        game: Box<dyn Game>,
    },
    Running(Box<Running>),
    Exited,
}

struct Running {
    window: Arc<Window>,
    gpu: GpuContext,
    present: PresentPass,
    game: Box<dyn Game>,
    input: SharedInput,
    offscreen: Canvas,
    screen: Canvas,
    tick: Duration,
    max_ticks: u32,
    accumulator: Duration,
    last_frame: Instant,
}

impl Host {
    fn stop(&mut self, event_loop: &ActiveEventLoop, outcome: Result<(), RunError>) {
        if let Err(err) = &outcome {
            error!(error = %err, "game loop failed");
        }
        self.outcome = outcome;
        self.state = HostState::Exited;
        event_loop.exit();
    }
}

impl ApplicationHandler for Host {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if !matches!(self.state, HostState::Pending { .. }) {
            return;
        }
        let HostState::Pending { config, game } =
            std::mem::replace(&mut self.state, HostState::Exited)
        else {
            return;
        };

        match Running::new(event_loop, config, game) {
            Ok(running) => {
                info!(
                    width = running.gpu.width(),
                    height = running.gpu.height(),
                    "game loop started"
                );
                self.state = HostState::Running(Box::new(running));
            }
            Err(err) => self.stop(event_loop, Err(err)),
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let HostState::Running(running) = &mut self.state else {
            return;
        };

        running.input.borrow_mut().handle_event(&event);

        match event {
            WindowEvent::CloseRequested => {
                info!("window closed");
                self.stop(event_loop, Ok(()));
            }
            WindowEvent::Resized(size) => {
                running.gpu.resize(size.width, size.height);
            }
            WindowEvent::RedrawRequested => match running.frame() {
                Ok(Flow::Continue) => {}
                Ok(Flow::Terminate) => {
                    info!("game requested termination");
                    self.stop(event_loop, Ok(()));
                }
                Err(err) => self.stop(event_loop, Err(err.into())),
            },
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let HostState::Running(running) = &self.state {
            running.window.request_redraw();
        }
    }
}

impl Running {
    fn new(
        event_loop: &ActiveEventLoop,
        config: RunConfig,
        game: Box<dyn Game>,
    ) -> Result<Self, RunError> {
        let window_attrs = WindowAttributes::default()
            .with_title(&config.title)
            .with_inner_size(winit::dpi::LogicalSize::new(config.width, config.height));

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .map_err(RunError::Window)?,
        );
        let gpu = GpuContext::new(window.clone())?;
        let present = PresentPass::new(&gpu);

        Ok(Self {
            window,
            gpu,
            present,
            game,
            input: config.input.unwrap_or_else(Input::shared),
            offscreen: Canvas::new(1, 1),
            screen: Canvas::new(1, 1),
            tick: Duration::from_secs(1) / config.ticks_per_second.max(1),
            max_ticks: config.max_ticks_per_frame.max(1),
            accumulator: Duration::ZERO,
            last_frame: Instant::now(),
        })
    }

    /// Layout, catch-up updates, draw, compose, present.
    fn frame(&mut self) -> GameResult {
        let (width, height) = (self.gpu.width(), self.gpu.height());
        let (logical_w, logical_h) =
            game::layout_precise(&mut *self.game, f64::from(width), f64::from(height));

        let now = Instant::now();
        self.accumulator += now.duration_since(self.last_frame);
        self.last_frame = now;

        let mut ticks = 0;
        while self.accumulator >= self.tick && ticks < self.max_ticks {
            self.accumulator -= self.tick;
            ticks += 1;

            let flow = self.game.update()?;
            self.input.borrow_mut().end_tick();
            if flow.is_terminate() {
                return Ok(flow);
            }
        }
        if self.accumulator >= self.tick {
            debug!(
                behind = ?self.accumulator,
                "update loop fell behind, dropping backlog"
            );
            self.accumulator = Duration::ZERO;
        }

        self.offscreen.resize(
            (logical_w.ceil() as u32).max(1),
            (logical_h.ceil() as u32).max(1),
        );
        self.offscreen.clear();
        self.game.draw(&mut self.offscreen);

        self.screen.resize(width, height);
        let transform = fit_transform(self.offscreen.size(), (width, height));
        game::draw_final_screen(&mut *self.game, &mut self.screen, &self.offscreen, transform);

        self.present();
        Ok(Flow::Continue)
    }

    fn present(&mut self) {
        let output = match self.gpu.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost or outdated, reconfiguring");
                self.gpu.reconfigure();
                return;
            }
            Err(err) => {
                warn!(error = %err, "skipping frame");
                return;
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Present Encoder"),
            });

        self.present
            .render(&self.gpu, &mut encoder, &view, &self.screen);

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_clamps_tick_rates() {
        let config = RunConfig::new()
            .title("Demo")
            .size(320, 200)
            .ticks_per_second(0)
            .max_ticks_per_frame(0);

        assert_eq!(config.title, "Demo");
        assert_eq!((config.width, config.height), (320, 200));
        assert_eq!(config.ticks_per_second, 1);
        assert_eq!(config.max_ticks_per_frame, 1);
        assert!(config.input.is_none());
    }

    #[test]
    fn builder_shares_input() {
        let input = Input::shared();
        let config = RunConfig::default().input(input.clone());
        let shared = config.input.expect("input set");
        assert!(std::rc::Rc::ptr_eq(&shared, &input));
    }
}
