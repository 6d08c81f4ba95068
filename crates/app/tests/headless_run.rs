//! Drives the simulation through the shell's fixed-step loop without a
//! window, checking the loop math and determinism glue hold together.

use cryptrun_app::app_loop::{self, FIXED_DT, FixedStep};
use cryptrun_core::{Game, GameConfig, GamePhase, InputFrame, Vec2};

fn walk_right() -> InputFrame {
    InputFrame { movement: Vec2::new(1.0, 0.0), ..InputFrame::default() }
}

#[test]
fn uneven_frame_times_still_advance_in_exact_steps() {
    let mut game = Game::new(21, GameConfig::default());
    let mut fixed = FixedStep::new();

    let frame_times = [0.004_f32, 0.021, 0.009, 0.033, 0.016, 0.05];
    let mut total_steps = 0;
    for frame_dt in frame_times {
        total_steps += app_loop::drive(&mut game, &mut fixed, frame_dt, &walk_right());
    }

    assert_eq!(u64::from(total_steps), game.current_tick());
    let budget = frame_times.iter().sum::<f32>() / FIXED_DT;
    assert!((total_steps as f32) <= budget.ceil());
}

#[test]
fn two_shells_with_the_same_seed_and_frames_agree() {
    let run = || {
        let mut game = Game::new(90_210, GameConfig::default());
        let mut fixed = FixedStep::new();
        for frame in 0..240 {
            let frame_dt = if frame % 3 == 0 { 0.022 } else { 0.014 };
            app_loop::drive(&mut game, &mut fixed, frame_dt, &walk_right());
        }
        game.snapshot_hash()
    };
    assert_eq!(run(), run());
}

#[test]
fn the_shell_loop_reaches_playing_after_the_first_frame() {
    let mut game = Game::new(5, GameConfig::default());
    let mut fixed = FixedStep::new();
    app_loop::drive(&mut game, &mut fixed, FIXED_DT, &InputFrame::default());
    assert_eq!(game.phase(), GamePhase::Playing);
}
