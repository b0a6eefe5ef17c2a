mod support;

use stagehand::scene::{
    FadeDrawer, LinearTransition, LinearTransitionProgress, Sequence, Switcher,
};
use stagehand::{Canvas, Color, Flow, Game, GameResult};
use support::{Recorder, TestScene, run_for_test};

fn terminate_after(limit: u32) -> impl FnMut() -> GameResult {
    let mut count = 0;
    move || {
        count += 1;
        Ok(if count <= limit {
            Flow::Continue
        } else {
            Flow::Terminate
        })
    }
}

#[test]
fn linear_transition_draws_every_frame_once() {
    let r = Recorder::new();
    let switcher = Switcher::new();

    let drawer_log = r.clone();
    let transition = LinearTransition::new(
        5,
        move |_: &mut Canvas, progress: LinearTransitionProgress| {
            drawer_log.append(
                "t",
                &format!("{} {}", progress.current_frame, progress.max_frames),
            );
        },
    );

    let s2 = TestScene::new("s2", &r).on_update(terminate_after(10));
    let mut pending = Some((s2, transition));

    let sw = switcher.clone();
    let s1 = TestScene::new("s1", &r).on_update(move || {
        if let Some((next, transition)) = pending.take() {
            assert!(sw.switch_with(next, transition));
        }
        Ok(Flow::Continue)
    });

    let mut seq = Sequence::with_switcher(s1, switcher);
    run_for_test(&mut seq).unwrap();

    let drawn: Vec<String> = r
        .logs()
        .into_iter()
        .filter(|entry| entry.starts_with("t:"))
        .collect();
    assert_eq!(drawn, ["t:0 5", "t:1 5", "t:2 5", "t:3 5", "t:4 5", "t:5 5"]);
}

#[test]
fn scenes_swap_at_the_switch_frame() {
    let r = Recorder::new();
    let mut seq = Sequence::new(TestScene::new("s1", &r).running());
    assert_eq!(seq.update().unwrap(), Flow::Continue);

    let fade = LinearTransition::new(6, FadeDrawer::new(Color::BLACK)).switch_at(3);
    assert!(seq.switch_with(TestScene::new("s2", &r).running(), fade));

    let mut swapped_at = None;
    for frame in 1..=7 {
        assert_eq!(seq.update().unwrap(), Flow::Continue);
        if swapped_at.is_none() && seq.has_swapped() != Some(false) {
            swapped_at = Some(frame);
        }
    }

    assert_eq!(swapped_at, Some(3));
    assert!(!seq.is_switching());
}

#[test]
fn fade_hides_the_swap() {
    let r = Recorder::new();
    let mut seq = Sequence::new(TestScene::new("s1", &r).running());
    let mut screen = Canvas::new(2, 2);
    assert_eq!(seq.update().unwrap(), Flow::Continue);

    let fade = LinearTransition::new(4, FadeDrawer::new(Color::BLACK));
    assert!(seq.switch_with(TestScene::new("s2", &r).running(), fade));

    // Two updates reach the default switch frame, where the overlay is opaque.
    for _ in 0..2 {
        assert_eq!(seq.update().unwrap(), Flow::Continue);
    }
    screen.fill(Color::WHITE);
    seq.draw(&mut screen);

    assert_eq!(seq.has_swapped(), Some(true));
    assert_eq!(screen.pixel(0, 0), Some(image::Rgba([0, 0, 0, 255])));
}
