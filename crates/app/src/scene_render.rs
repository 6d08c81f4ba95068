//! Read-only rendering of the simulation: tiles in view, doors with their
//! slide offsets, entities colored by kind, transient effects, and a small
//! HUD line. Nothing in here mutates game state.

use cryptrun_core::state::EntityKind;
use cryptrun_core::{
    EffectEvent, EffectKind, Game, GamePhase, Orientation, PickupKind, Pos, TileKind, Vec2,
};
use macroquad::prelude::*;

const FLOOR_COLOR: Color = Color { r: 0.16, g: 0.16, b: 0.19, a: 1.0 };
const WALL_COLOR: Color = Color { r: 0.07, g: 0.07, b: 0.09, a: 1.0 };
const DOOR_COLOR: Color = Color { r: 0.45, g: 0.32, b: 0.14, a: 1.0 };
const HUD_FONT_SIZE: f32 = 22.0;

pub struct SceneCamera {
    offset: Vec2,
}

impl SceneCamera {
    pub fn centered_on(target: Vec2, screen: Vec2) -> Self {
        Self { offset: target - screen * 0.5 }
    }

    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        world - self.offset
    }
}

/// Inclusive tile index range overlapping the viewport, clamped to the
/// grid. Used to skip drawing the rest of the level.
pub fn visible_tile_range(
    offset: Vec2,
    screen: Vec2,
    tile_size: f32,
    grid_width: usize,
    grid_height: usize,
) -> (usize, usize, usize, usize) {
    let min_x = (offset.x / tile_size).floor().max(0.0) as usize;
    let min_y = (offset.y / tile_size).floor().max(0.0) as usize;
    let max_x = (((offset.x + screen.x) / tile_size).ceil().max(0.0) as usize)
        .min(grid_width.saturating_sub(1));
    let max_y = (((offset.y + screen.y) / tile_size).ceil().max(0.0) as usize)
        .min(grid_height.saturating_sub(1));
    (min_x, min_y, max_x, max_y)
}

pub fn draw_frame(game: &Game, camera: &SceneCamera, effects: &[EffectEvent], run_seed: u64) {
    clear_background(BLACK);
    draw_tiles(game, camera);
    draw_entities(game, camera);
    draw_effects(camera, effects);
    draw_hud(game, run_seed);
}

fn draw_tiles(game: &Game, camera: &SceneCamera) {
    let grid = &game.world().grid;
    let screen = Vec2::new(screen_width(), screen_height());
    let (min_x, min_y, max_x, max_y) =
        visible_tile_range(camera.offset, screen, grid.tile_size, grid.width, grid.height);

    for tile_y in min_y..=max_y {
        for tile_x in min_x..=max_x {
            let pos = Pos { y: tile_y as i32, x: tile_x as i32 };
            let color = match grid.tile_at(pos) {
                TileKind::Floor => FLOOR_COLOR,
                TileKind::Wall => WALL_COLOR,
            };
            let screen_pos = camera.to_screen(Vec2::new(
                tile_x as f32 * grid.tile_size,
                tile_y as f32 * grid.tile_size,
            ));
            draw_rectangle(screen_pos.x, screen_pos.y, grid.tile_size, grid.tile_size, color);
        }
    }
}

fn draw_entities(game: &Game, camera: &SceneCamera) {
    let world = game.world();
    let tile_size = world.grid.tile_size;

    for id in world.render_order(|entity| entity.pos.y) {
        let entity = &world.entities[id];
        let screen_pos = camera.to_screen(entity.pos);

        match &entity.kind {
            EntityKind::Door(door) => {
                // The slab retracts along its own axis as the door opens.
                let visible = (tile_size - door.slide).max(0.0);
                let top_left = camera.to_screen(
                    entity.pos - Vec2::new(tile_size / 2.0, tile_size / 2.0),
                );
                match door.orientation {
                    Orientation::Horizontal => {
                        draw_rectangle(top_left.x, top_left.y, visible, tile_size / 2.0, DOOR_COLOR);
                    }
                    Orientation::Vertical => {
                        draw_rectangle(top_left.x, top_left.y, tile_size / 2.0, visible, DOOR_COLOR);
                    }
                }
            }
            EntityKind::Player(_) => {
                let color = if entity.flash_timer > 0.0 { WHITE } else { SKYBLUE };
                draw_circle(screen_pos.x, screen_pos.y, entity.radius, color);
            }
            EntityKind::Enemy(_) => {
                let color = if entity.flash_timer > 0.0 { WHITE } else { RED };
                draw_circle(screen_pos.x, screen_pos.y, entity.radius, color);
            }
            EntityKind::Projectile(shot) => {
                let color = if shot.from_player { YELLOW } else { ORANGE };
                draw_circle(screen_pos.x, screen_pos.y, entity.radius, color);
            }
            EntityKind::Pickup(pickup) => {
                let color = match pickup {
                    PickupKind::Coin { .. } => GOLD,
                    PickupKind::HealthPack => GREEN,
                };
                draw_circle(screen_pos.x, screen_pos.y, entity.radius, color);
            }
            EntityKind::ExitPortal(portal) => {
                let color = if portal.open { PURPLE } else { DARKGRAY };
                draw_circle(screen_pos.x, screen_pos.y, entity.radius, color);
            }
            EntityKind::Altar { used } => {
                let color = if *used { DARKGRAY } else { VIOLET };
                draw_rectangle(
                    screen_pos.x - entity.radius,
                    screen_pos.y - entity.radius,
                    entity.radius * 2.0,
                    entity.radius * 2.0,
                    color,
                );
            }
        }
    }
}

fn draw_effects(camera: &SceneCamera, effects: &[EffectEvent]) {
    for effect in effects {
        let screen_pos = camera.to_screen(effect.pos);
        match effect.kind {
            EffectKind::Spark => draw_circle(screen_pos.x, screen_pos.y, 4.0, YELLOW),
            EffectKind::Impact => draw_circle(screen_pos.x, screen_pos.y, 6.0, WHITE),
            EffectKind::Explosion => {
                draw_circle_lines(screen_pos.x, screen_pos.y, 60.0, 3.0, ORANGE);
            }
        }
    }
}

fn draw_hud(game: &Game, run_seed: u64) {
    let player = game.world().player();
    let line = format!(
        "depth {}  hp {}/{}  score {}  seed {}",
        game.depth(),
        player.hp,
        player.max_hp,
        game.score(),
        crate::format_seed(run_seed),
    );
    draw_text(&line, 16.0, 28.0, HUD_FONT_SIZE, WHITE);

    match game.phase() {
        GamePhase::GameOver => {
            let recap = format!(
                "you fell - run hash {}",
                crate::format_snapshot_hash(game.snapshot_hash()),
            );
            draw_text(&recap, 16.0, 56.0, HUD_FONT_SIZE, RED);
        }
        GamePhase::LevelTransition => {
            draw_text("descending...", 16.0, 56.0, HUD_FONT_SIZE, PURPLE);
        }
        GamePhase::Loading | GamePhase::Playing => {}
    }
}
