//! Frame-counted transitions and the fade effect built on them.

use crate::canvas::{Canvas, Color};
use crate::error::GameResult;
use crate::game::Flow;

use super::transition::Transition;

/// Easing functions for smooth transitions.
///
/// These control the acceleration curve of transition animations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Easing {
    /// Constant speed throughout.
    #[default]
    Linear,
    /// Start slow, accelerate.
    EaseIn,
    /// Start fast, decelerate.
    EaseOut,
    /// Start slow, speed up, then slow down.
    EaseInOut,
}

impl Easing {
    /// Apply the easing function to a linear progress value (0.0 to 1.0).
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
                }
            }
        }
    }
}

/// Where a [`LinearTransition`] is, handed to its drawer every frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LinearTransitionProgress {
    /// Frames elapsed since the switch began, `0..=max_frames`.
    pub current_frame: u32,
    /// Total length of the transition in frames.
    pub max_frames: u32,
    /// Frame at which the scenes swap.
    pub switch_frame: u32,
}

impl LinearTransitionProgress {
    /// Linear progress in `0.0..=1.0`.
    pub fn rate(&self) -> f32 {
        if self.max_frames == 0 {
            return 1.0;
        }
        self.current_frame as f32 / self.max_frames as f32
    }

    /// Whether the incoming scene is already the current one.
    pub fn switched(&self) -> bool {
        self.current_frame >= self.switch_frame
    }
}

/// Draws the visuals of a [`LinearTransition`].
pub trait LinearTransitionDrawer {
    fn draw(&mut self, screen: &mut Canvas, progress: LinearTransitionProgress);
}

impl<F> LinearTransitionDrawer for F
where
    F: FnMut(&mut Canvas, LinearTransitionProgress),
{
    fn draw(&mut self, screen: &mut Canvas, progress: LinearTransitionProgress) {
        self(screen, progress)
    }
}

/// A transition that runs for a fixed number of frames.
///
/// Every frame from `0` to `max_frames` is drawn exactly once; the update after
/// the last frame marks the transition completed. Scenes swap once
/// `switch_frame` is reached, by default halfway through.
///
/// # Example
///
/// ```
/// use stagehand::scene::{FadeDrawer, LinearTransition};
/// use stagehand::Color;
///
/// let fade = LinearTransition::new(30, FadeDrawer::new(Color::BLACK));
/// let flash = LinearTransition::new(10, FadeDrawer::new(Color::WHITE)).switch_at(2);
/// ```
#[derive(Clone, Debug)]
pub struct LinearTransition<D> {
    drawer: D,
    current_frame: u32,
    max_frames: u32,
    switch_frame: u32,
    finished: bool,
}

impl<D: LinearTransitionDrawer> LinearTransition<D> {
    pub fn new(max_frames: u32, drawer: D) -> Self {
        Self {
            drawer,
            current_frame: 0,
            max_frames,
            switch_frame: max_frames / 2,
            finished: false,
        }
    }

    /// Swap scenes at `frame` instead of the midpoint. Clamped to `max_frames`.
    pub fn switch_at(mut self, frame: u32) -> Self {
        self.switch_frame = frame.min(self.max_frames);
        self
    }

    pub fn progress(&self) -> LinearTransitionProgress {
        LinearTransitionProgress {
            current_frame: self.current_frame,
            max_frames: self.max_frames,
            switch_frame: self.switch_frame,
        }
    }

    pub fn drawer(&self) -> &D {
        &self.drawer
    }
}

impl<D: LinearTransitionDrawer> Transition for LinearTransition<D> {
    fn reset(&mut self) {
        self.current_frame = 0;
        self.finished = false;
    }

    fn update(&mut self) -> GameResult {
        if self.current_frame < self.max_frames {
            self.current_frame += 1;
        } else {
            self.finished = true;
        }
        Ok(Flow::Continue)
    }

    fn draw(&mut self, screen: &mut Canvas) {
        let progress = self.progress();
        self.drawer.draw(screen, progress);
    }

    fn completed(&self) -> bool {
        self.finished
    }

    fn can_switch_scenes(&self) -> bool {
        self.current_frame >= self.switch_frame
    }
}

/// Fade to a solid color, then fade back in from it.
///
/// The overlay reaches full opacity at the switch frame, so the swap itself is
/// never visible.
#[derive(Clone, Copy, Debug)]
pub struct FadeDrawer {
    pub color: Color,
    pub easing: Easing,
}

impl FadeDrawer {
    pub fn new(color: Color) -> Self {
        Self {
            color,
            easing: Easing::EaseInOut,
        }
    }

    /// Set the easing function for this fade.
    pub fn easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Overlay opacity for the given progress.
    pub fn alpha(&self, progress: LinearTransitionProgress) -> f32 {
        let LinearTransitionProgress {
            current_frame,
            max_frames,
            switch_frame,
        } = progress;

        let raw = if current_frame < switch_frame {
            current_frame as f32 / switch_frame as f32
        } else if max_frames > switch_frame {
            1.0 - (current_frame - switch_frame) as f32 / (max_frames - switch_frame) as f32
        } else {
            1.0
        };
        self.easing.apply(raw)
    }
}

impl LinearTransitionDrawer for FadeDrawer {
    fn draw(&mut self, screen: &mut Canvas, progress: LinearTransitionProgress) {
        screen.overlay(self.color, self.alpha(progress));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_frames<D: LinearTransitionDrawer>(t: &mut LinearTransition<D>) -> Vec<(u32, bool, bool)> {
        let mut screen = Canvas::new(1, 1);
        let mut seen = Vec::new();
        t.reset();
        while !t.completed() {
            t.draw(&mut screen);
            seen.push((t.progress().current_frame, t.can_switch_scenes(), t.completed()));
            assert_eq!(t.update().unwrap(), Flow::Continue);
        }
        seen
    }

    #[test]
    fn every_frame_is_drawn_once() {
        let mut frames = Vec::new();
        let mut t = LinearTransition::new(5, |_: &mut Canvas, p: LinearTransitionProgress| {
            frames.push((p.current_frame, p.max_frames));
        });
        run_frames(&mut t);
        drop(t);

        assert_eq!(frames, vec![(0, 5), (1, 5), (2, 5), (3, 5), (4, 5), (5, 5)]);
    }

    #[test]
    fn switches_at_midpoint_by_default() {
        let mut t = LinearTransition::new(4, FadeDrawer::new(Color::BLACK));
        let seen = run_frames(&mut t);
        let switch_flags: Vec<bool> = seen.iter().map(|(_, s, _)| *s).collect();
        assert_eq!(switch_flags, vec![false, false, true, true, true]);
    }

    #[test]
    fn reset_rearms_a_finished_transition() {
        let mut t = LinearTransition::new(2, FadeDrawer::new(Color::BLACK)).switch_at(9);
        assert_eq!(t.progress().switch_frame, 2);

        run_frames(&mut t);
        assert!(t.completed());

        t.reset();
        assert!(!t.completed());
        assert!(!t.can_switch_scenes());
        assert_eq!(t.progress().current_frame, 0);
    }

    #[test]
    fn zero_length_transition_completes_after_one_update() {
        let mut t = LinearTransition::new(0, FadeDrawer::new(Color::BLACK));
        t.reset();
        assert!(t.can_switch_scenes());
        assert!(!t.completed());
        assert_eq!(t.update().unwrap(), Flow::Continue);
        assert!(t.completed());
    }

    #[test]
    fn fade_peaks_at_switch_frame() {
        let fade = FadeDrawer::new(Color::BLACK).easing(Easing::Linear);
        let at = |current_frame| LinearTransitionProgress {
            current_frame,
            max_frames: 10,
            switch_frame: 5,
        };

        assert_eq!(fade.alpha(at(0)), 0.0);
        assert!((fade.alpha(at(2)) - 0.4).abs() < 1e-6);
        assert_eq!(fade.alpha(at(5)), 1.0);
        assert!((fade.alpha(at(8)) - 0.4).abs() < 1e-6);
        assert_eq!(fade.alpha(at(10)), 0.0);
    }

    #[test]
    fn easing_endpoints() {
        for easing in [Easing::Linear, Easing::EaseIn, Easing::EaseOut, Easing::EaseInOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
        assert_eq!(Easing::EaseIn.apply(0.5), 0.25);
    }
}
