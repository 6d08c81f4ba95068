//! Small game-phase state machine with deferred application. Requests made
//! while a tick is running are staged and applied at the next tick boundary,
//! so a transition handler can never re-enter another transition.

use super::*;

pub(super) struct PhaseMachine {
    current: GamePhase,
    staged: Option<GamePhase>,
}

fn transition_allowed(from: GamePhase, to: GamePhase) -> bool {
    matches!(
        (from, to),
        (GamePhase::Loading, GamePhase::Playing)
            | (GamePhase::Playing, GamePhase::LevelTransition)
            | (GamePhase::LevelTransition, GamePhase::Playing)
            | (GamePhase::Playing, GamePhase::GameOver)
    )
}

impl PhaseMachine {
    /// Starts in `Loading` with `Playing` already staged; the first tick
    /// flips into play rather than the constructor.
    pub(super) fn new() -> Self {
        Self { current: GamePhase::Loading, staged: Some(GamePhase::Playing) }
    }

    pub(super) fn current(&self) -> GamePhase {
        self.current
    }

    /// Stages a transition for the next tick boundary. Disallowed requests
    /// are rejected and logged; the machine stays where it is. A later
    /// request in the same tick replaces an earlier staged one.
    pub(super) fn request(&mut self, to: GamePhase, log: &mut Vec<LogEvent>) -> bool {
        if !transition_allowed(self.current, to) {
            log.push(LogEvent::PhaseRejected { from: self.current, to });
            return false;
        }
        self.staged = Some(to);
        true
    }

    /// Applies the staged transition, if any, returning the edge taken.
    pub(super) fn apply_staged(&mut self) -> Option<(GamePhase, GamePhase)> {
        let to = self.staged.take()?;
        let from = self.current;
        self.current = to;
        Some((from, to))
    }
}
