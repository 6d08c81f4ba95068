//! Fixed-timestep driver. Rendered frames arrive at whatever rate the
//! display runs; the simulation only ever advances in `FIXED_DT` steps,
//! with a per-frame step cap so a long hitch cannot snowball.

use cryptrun_core::{Game, InputFrame};

pub const FIXED_DT: f32 = 1.0 / 60.0;
const MAX_STEPS_PER_FRAME: u32 = 5;

#[derive(Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Banks the frame time and returns how many fixed steps to simulate.
    /// Time beyond the step cap is dropped rather than carried forward.
    pub fn steps_for_frame(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        let mut steps = 0;
        while self.accumulator >= FIXED_DT && steps < MAX_STEPS_PER_FRAME {
            self.accumulator -= FIXED_DT;
            steps += 1;
        }
        if self.accumulator >= FIXED_DT {
            self.accumulator = 0.0;
        }
        steps
    }
}

/// Advances the game by every fixed step owed for this frame, reusing the
/// same input frame for each step.
pub fn drive(game: &mut Game, fixed: &mut FixedStep, frame_dt: f32, input: &InputFrame) -> u32 {
    let steps = fixed.steps_for_frame(frame_dt);
    for _ in 0..steps {
        game.tick(FIXED_DT, input);
    }
    steps
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sub_step_frames_accumulate_until_a_step_is_owed() {
        let mut fixed = FixedStep::new();
        assert_eq!(fixed.steps_for_frame(FIXED_DT * 0.6), 0);
        assert_eq!(fixed.steps_for_frame(FIXED_DT * 0.6), 1);
    }

    #[test]
    fn a_normal_frame_costs_one_step() {
        let mut fixed = FixedStep::new();
        assert_eq!(fixed.steps_for_frame(FIXED_DT), 1);
        assert_eq!(fixed.steps_for_frame(FIXED_DT), 1);
    }

    #[test]
    fn long_hitches_are_capped_and_surplus_dropped() {
        let mut fixed = FixedStep::new();
        assert_eq!(fixed.steps_for_frame(FIXED_DT * 40.0), 5);
        // The surplus was discarded, not banked.
        assert_eq!(fixed.steps_for_frame(FIXED_DT * 0.5), 0);
    }

    #[test]
    fn negative_frame_time_is_ignored() {
        let mut fixed = FixedStep::new();
        assert_eq!(fixed.steps_for_frame(-1.0), 0);
        assert_eq!(fixed.steps_for_frame(FIXED_DT), 1);
    }

    #[test]
    fn drive_ticks_the_game_once_per_owed_step() {
        use cryptrun_core::GameConfig;

        let mut game = Game::new(3, GameConfig::default());
        let mut fixed = FixedStep::new();
        let before = game.current_tick();

        let steps = drive(&mut game, &mut fixed, FIXED_DT * 3.0, &InputFrame::default());
        assert_eq!(steps, 3);
        assert_eq!(game.current_tick(), before + 3);
    }
}
