//! Two scenes joined by a fade.
//!
//! Press Enter on the title to fade into the stage. On the stage, the arrow
//! keys move the square, Escape flashes back to the title and Q quits.

use stagehand::scene::{Easing, FadeDrawer, LinearTransition, Sequence, Switcher};
use stagehand::{
    Canvas, Color, Flow, Game, GameResult, Input, KeyCode, Lifecycle, RunConfig, RunError,
    SharedInput, run_game,
};
use tracing::info;

const WIDTH: u32 = 320;
const HEIGHT: u32 = 180;

struct Title {
    switcher: Switcher,
    input: SharedInput,
    ticks: u32,
}

impl Title {
    fn new(switcher: &Switcher, input: &SharedInput) -> Self {
        Self {
            switcher: switcher.clone(),
            input: input.clone(),
            ticks: 0,
        }
    }
}

impl Game for Title {
    fn update(&mut self) -> GameResult {
        self.ticks += 1;
        if self.input.borrow().key_pressed(KeyCode::Enter) {
            let stage = Stage::new(&self.switcher, &self.input);
            let fade = LinearTransition::new(40, FadeDrawer::new(Color::BLACK));
            self.switcher.switch_with(stage, fade);
        }
        Ok(Flow::Continue)
    }

    fn draw(&mut self, screen: &mut Canvas) {
        screen.fill(Color::rgb(0.08, 0.08, 0.14));

        // Blinking prompt bar
        if (self.ticks / 30) % 2 == 0 {
            screen.fill_rect(110, 120, 100, 8, Color::rgb(0.9, 0.9, 0.9));
        }
        screen.fill_rect(60, 50, 200, 40, Color::rgb(0.85, 0.45, 0.2));
    }

    fn layout(&mut self, _outside_width: u32, _outside_height: u32) -> (u32, u32) {
        (WIDTH, HEIGHT)
    }

    fn as_lifecycle(&mut self) -> Option<&mut dyn Lifecycle> {
        Some(self)
    }
}

impl Lifecycle for Title {
    fn on_start(&mut self) {
        self.ticks = 0;
        info!("title started");
    }

    fn on_departure(&mut self) {
        info!("leaving title");
    }
}

struct Stage {
    switcher: Switcher,
    input: SharedInput,
    x: i32,
    y: i32,
}

impl Stage {
    fn new(switcher: &Switcher, input: &SharedInput) -> Self {
        Self {
            switcher: switcher.clone(),
            input: input.clone(),
            x: (WIDTH / 2) as i32,
            y: (HEIGHT / 2) as i32,
        }
    }
}

impl Game for Stage {
    fn update(&mut self) -> GameResult {
        let input = self.input.borrow();
        if input.key_pressed(KeyCode::KeyQ) {
            return Ok(Flow::Terminate);
        }
        if input.key_pressed(KeyCode::Escape) {
            let title = Title::new(&self.switcher, &self.input);
            let flash = LinearTransition::new(16, FadeDrawer::new(Color::WHITE).easing(Easing::EaseOut))
                .switch_at(4);
            self.switcher.switch_with(title, flash);
        }

        if input.key_down(KeyCode::ArrowLeft) {
            self.x -= 2;
        }
        if input.key_down(KeyCode::ArrowRight) {
            self.x += 2;
        }
        if input.key_down(KeyCode::ArrowUp) {
            self.y -= 2;
        }
        if input.key_down(KeyCode::ArrowDown) {
            self.y += 2;
        }
        self.x = self.x.clamp(0, WIDTH as i32 - 16);
        self.y = self.y.clamp(0, HEIGHT as i32 - 16);

        Ok(Flow::Continue)
    }

    fn draw(&mut self, screen: &mut Canvas) {
        screen.fill(Color::rgb(0.1, 0.3, 0.15));
        screen.fill_rect(self.x, self.y, 16, 16, Color::rgb(0.95, 0.85, 0.3));
    }

    fn layout(&mut self, _outside_width: u32, _outside_height: u32) -> (u32, u32) {
        (WIDTH, HEIGHT)
    }

    fn as_lifecycle(&mut self) -> Option<&mut dyn Lifecycle> {
        Some(self)
    }
}

impl Lifecycle for Stage {
    fn on_arrival(&mut self) {
        info!("stage ready");
    }

    fn on_end(&mut self) {
        info!("stage finished");
    }
}

fn main() -> Result<(), RunError> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let input = Input::shared();
    let switcher = Switcher::new();
    let title = Title::new(&switcher, &input);

    run_game(
        Sequence::with_switcher(title, switcher),
        RunConfig::new()
            .title("Stagehand - scenes")
            .size(WIDTH * 3, HEIGHT * 3)
            .input(input),
    )
}
