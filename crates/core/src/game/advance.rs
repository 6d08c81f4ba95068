//! The fixed-step tick. Order is load-bearing: staged phase changes and the
//! pending level swap apply at the boundary, then doors and entity behavior,
//! physics, collision resolution, room activation, and finally the sweep of
//! removal-flagged entities. Room clear checks therefore always see
//! post-collision entity state.

use super::*;

impl Game {
    pub fn tick(&mut self, dt: f32, input: &InputFrame) {
        if let Some((from, to)) = self.phase.apply_staged() {
            self.log.push(LogEvent::PhaseChanged { from, to });
        }

        match self.phase.current() {
            GamePhase::LevelTransition => {
                self.apply_pending_transition();
                self.tick += 1;
                return;
            }
            GamePhase::Loading | GamePhase::GameOver => {
                self.tick += 1;
                return;
            }
            GamePhase::Playing => {}
        }

        // Culling scope for this tick is wherever the player stood at its
        // start; activation re-derives it after physics.
        let player_tile = self.world.grid.world_to_tile(self.world.player().pos);
        self.world.active_room = self.world.room_at_tile(player_tile);

        self.update_doors(dt);
        self.update_player(dt, input);
        self.update_enemies(dt);
        self.update_projectiles(dt);
        self.integrate_knockback(dt);
        self.resolve_collisions(dt);
        self.update_room_activation();
        self.sweep_removed();

        self.tick += 1;
    }

    fn sweep_removed(&mut self) {
        self.world.entities.retain(|_, entity| !entity.removed);
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{add_enemy, idle_input, move_input, two_room_fixture};
    use super::*;
    use crate::state::EntityKind;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn fresh_games_load_for_one_tick_then_play() {
        let mut game = Game::new(11, GameConfig::default());
        assert_eq!(game.phase(), GamePhase::Loading);

        game.tick(DT, &idle_input());
        assert_eq!(game.phase(), GamePhase::Playing);
        assert!(game.log().contains(&LogEvent::PhaseChanged {
            from: GamePhase::Loading,
            to: GamePhase::Playing,
        }));
    }

    #[test]
    fn movement_input_moves_the_player() {
        let mut game = two_room_fixture();
        let before = game.world.player().pos;

        for _ in 0..10 {
            game.tick(DT, &move_input(1.0, 0.0));
        }
        assert!(game.world.player().pos.x > before.x);
        assert_eq!(game.world.player().pos.y, before.y);
    }

    #[test]
    fn removal_flagged_entities_are_swept_at_tick_end() {
        let mut game = two_room_fixture();
        let enemy = add_enemy(&mut game, EnemyKind::Walker, Vec2::new(460.0, 180.0), 1);
        game.world.entities[enemy].removed = true;

        game.tick(DT, &idle_input());
        assert!(!game.world.entities.contains_key(enemy));
    }

    #[test]
    fn scheduled_descent_regenerates_the_level_one_tick_later() {
        let mut game = two_room_fixture();
        game.world.rooms[1].triggered = true;
        game.world.rooms[1].cleared = true;
        if let EntityKind::ExitPortal(portal) =
            &mut game.world.entities[game.world.exit_portal_id].kind
        {
            portal.open = true;
        }
        game.world.player_mut().pos = game.world.exit_point;

        game.tick(DT, &idle_input());
        assert!(game.pending_transition.is_some());
        assert_eq!(game.depth(), 1);

        // Boundary tick: enter LevelTransition and swap the level in.
        game.tick(DT, &idle_input());
        assert_eq!(game.depth(), 2);
        assert!(game.log().contains(&LogEvent::LevelAdvanced { depth: 2 }));
        assert_eq!(game.world.player().pos, game.world.spawn_point);

        // One more boundary to come back to play.
        game.tick(DT, &idle_input());
        assert_eq!(game.phase(), GamePhase::Playing);
    }

    #[test]
    fn game_over_freezes_the_world() {
        let mut game = two_room_fixture();
        game.world.player_mut().hp = 1;
        let player_pos = game.world.player().pos;
        add_enemy(&mut game, EnemyKind::Walker, player_pos + Vec2::new(5.0, 0.0), 0);

        game.tick(DT, &idle_input());
        assert!(game.log().contains(&LogEvent::PlayerDied));

        game.tick(DT, &idle_input());
        assert_eq!(game.phase(), GamePhase::GameOver);
        let tick_before = game.current_tick();
        game.tick(DT, &idle_input());
        assert_eq!(game.current_tick(), tick_before + 1);
        assert_eq!(game.phase(), GamePhase::GameOver);
    }
}
