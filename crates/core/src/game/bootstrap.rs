//! World construction for a freshly generated level: doors spawned at every
//! socket, rooms linked to their doors, the exit portal and altar objects
//! placed, and the player installed at the spawn point.

use slotmap::SlotMap;

use super::*;
use crate::levelgen::{self, GeneratedLevel};
use crate::progression::{self, ProgressionSnapshot};
use crate::state::{
    DoorState, Entity, EntityKind, PlayerState, PortalState, Room, TileGrid,
};

impl Game {
    pub fn new(run_seed: u64, config: GameConfig) -> Self {
        Self::with_progression(run_seed, config, 1, BTreeSet::new())
    }

    /// Reconstructs a run from persisted progression. Levels are always
    /// regenerated from the seed and depth, never restored tile-for-tile.
    pub fn from_snapshot(run_seed: u64, config: GameConfig, snapshot: &ProgressionSnapshot) -> Self {
        let upgrades = snapshot.unlocked_upgrades.iter().cloned().collect();
        Self::with_progression(run_seed, config, snapshot.depth.max(1), upgrades)
    }

    fn with_progression(
        run_seed: u64,
        config: GameConfig,
        depth: u32,
        unlocked_upgrades: BTreeSet<String>,
    ) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(run_seed);
        let outcome = levelgen::generate_level(run_seed, depth, &config);

        let mut log = Vec::new();
        if outcome.fell_back {
            log.push(LogEvent::GenerationFellBack { depth });
        }
        log.push(LogEvent::LevelGenerated {
            depth,
            room_count: outcome.level.rooms.len(),
            retries: outcome.retries,
        });

        let world = install_world(&config, &unlocked_upgrades, outcome.level, depth, None);
        let spatial = SpatialHash::new(config.spatial.cell_size);

        Self {
            run_seed,
            tick: 0,
            config,
            rng,
            world,
            spatial,
            phase: PhaseMachine::new(),
            pending_transition: None,
            unlocked_upgrades,
            score: 0,
            log,
            effects: Vec::new(),
        }
    }
}

/// Builds the runtime world for one level. A carried player keeps its hp
/// and derived stats but is repositioned at the new spawn point.
pub(super) fn install_world(
    config: &GameConfig,
    unlocked_upgrades: &BTreeSet<String>,
    level: GeneratedLevel,
    depth: u32,
    carried_player: Option<Entity>,
) -> WorldState {
    let grid = TileGrid::from_level(&level);
    let mut entities: SlotMap<EntityId, Entity> = SlotMap::with_key();

    // Doors first so rooms can map socket indices to door keys.
    let mut door_ids = Vec::with_capacity(level.door_sockets.len());
    for socket in &level.door_sockets {
        let door = Entity {
            id: EntityId::default(),
            pos: grid.tile_center(socket.tile),
            radius: grid.tile_size / 2.0,
            collision: CollisionKind::Wall,
            removed: false,
            affinity: RoomAffinity::Global,
            mass: 0.0,
            knockback: Vec2::ZERO,
            friction: 0.0,
            hp: 0,
            max_hp: 0,
            flash_timer: 0.0,
            kind: EntityKind::Door(DoorState {
                tile: socket.tile,
                orientation: socket.orientation,
                phase: DoorPhase::Closed,
                locked: false,
                slide: 0.0,
            }),
        };
        let id = entities.insert(door);
        entities[id].id = id;
        door_ids.push(id);
    }

    let spawn_point = grid.tile_center(level.spawn_tile);
    let exit_point = grid.tile_center(level.exit_tile);

    // Degenerate single-room layouts make the spawn room the exit; the
    // portal must start open because a pre-cleared room never re-clears.
    let spawn_is_exit = level.rooms.first().is_some_and(|room| room.is_exit);
    let portal = Entity {
        id: EntityId::default(),
        pos: exit_point,
        radius: grid.tile_size / 2.0,
        collision: CollisionKind::Portal,
        removed: false,
        affinity: RoomAffinity::Global,
        mass: 0.0,
        knockback: Vec2::ZERO,
        friction: 0.0,
        hp: 0,
        max_hp: 0,
        flash_timer: 0.0,
        kind: EntityKind::ExitPortal(PortalState { open: spawn_is_exit }),
    };
    let exit_portal_id = entities.insert(portal);
    entities[exit_portal_id].id = exit_portal_id;

    let mut rooms = Vec::with_capacity(level.rooms.len());
    for (index, plan) in level.rooms.iter().enumerate() {
        if plan.kind == RoomKind::Altar {
            let altar = Entity {
                id: EntityId::default(),
                pos: grid.tile_center(plan.rect.center()),
                radius: grid.tile_size / 2.0,
                collision: CollisionKind::Wall,
                removed: false,
                affinity: RoomAffinity::Global,
                mass: 0.0,
                knockback: Vec2::ZERO,
                friction: 0.0,
                hp: 0,
                max_hp: 0,
                flash_timer: 0.0,
                kind: EntityKind::Altar { used: false },
            };
            let altar_id = entities.insert(altar);
            entities[altar_id].id = altar_id;
        }

        rooms.push(Room {
            rect: plan.rect,
            kind: plan.kind,
            is_exit: plan.is_exit,
            // The spawn room never gates anything.
            triggered: index == 0,
            cleared: index == 0,
            doors: plan.socket_indices.iter().map(|&socket| door_ids[socket]).collect(),
            roster: plan.roster.clone(),
        });
    }

    let player = match carried_player {
        Some(mut player) => {
            player.pos = spawn_point;
            player.knockback = Vec2::ZERO;
            player.flash_timer = 0.0;
            player
        }
        None => {
            let max_hp = progression::player_max_hp(config, unlocked_upgrades);
            Entity {
                id: EntityId::default(),
                pos: spawn_point,
                radius: config.player.radius,
                collision: CollisionKind::Player,
                removed: false,
                affinity: RoomAffinity::Global,
                mass: 1.0,
                knockback: Vec2::ZERO,
                friction: 8.0,
                hp: max_hp,
                max_hp,
                flash_timer: 0.0,
                kind: EntityKind::Player(PlayerState { fire_cooldown: 0.0 }),
            }
        }
    };
    let player_id = entities.insert(player);
    entities[player_id].id = player_id;

    let active_room = rooms.iter().position(|room| room.rect.contains(level.spawn_tile));

    WorldState {
        grid,
        rooms,
        entities,
        player_id,
        exit_portal_id,
        spawn_point,
        exit_point,
        active_room,
        depth,
    }
}
