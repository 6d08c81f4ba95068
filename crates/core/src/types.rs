use slotmap::new_key_type;

new_key_type! {
    pub struct EntityId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f32 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    pub fn distance(self, other: Self) -> f32 {
        (self - other).length()
    }

    pub fn distance_squared(self, other: Self) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    pub fn normalized(self) -> Self {
        let len = self.length();
        if len > 0.0001 { Self { x: self.x / len, y: self.y / len } } else { Self::ZERO }
    }

    /// Clamp to unit length; shorter vectors pass through unchanged.
    pub fn clamped_to_unit(self) -> Self {
        if self.length() > 1.0 { self.normalized() } else { self }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Self { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl std::ops::Mul<f32> for Vec2 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self {
        Self { x: self.x * rhs, y: self.y * rhs }
    }
}

/// Axis-aligned box in world units. Overlap is inclusive-exclusive, so
/// boxes sharing an edge do not overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self { x: center.x - radius, y: center.y - radius, width: radius * 2.0, height: radius * 2.0 }
    }

    pub fn expanded(self, pad: f32) -> Self {
        Self {
            x: self.x - pad,
            y: self.y - pad,
            width: self.width + pad * 2.0,
            height: self.height + pad * 2.0,
        }
    }

    pub fn overlaps(self, other: Self) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TileKind {
    Wall,
    Floor,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RoomKind {
    Spawn,
    Combat,
    Elite,
    Loot,
    Altar,
    Boss,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EnemyKind {
    Walker,
    Shooter,
    Smart,
    Stealth,
    Rapid,
    Shotgun,
    Heavy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CollisionKind {
    None,
    Player,
    Enemy,
    Item,
    Projectile,
    Portal,
    Wall,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorPhase {
    Closed,
    Opening,
    Open,
    Closing,
}

/// Which room an entity belongs to for activity culling and clear checks.
/// `Global` entities (player, projectiles, doors, pickups) always simulate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoomAffinity {
    Global,
    Room(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MovementStrategy {
    Chase,
    PathfindingChase,
    Stationary,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AttackStrategy {
    Melee,
    SingleShot,
    Spread { count: u32, arc: f32 },
    BurstRadial { count: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PickupKind {
    Coin { value: u32 },
    HealthPack,
}

/// Normalized per-tick input contract. The shell translates raw device
/// state into this; the core never sees keys or pointers.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InputFrame {
    pub movement: Vec2,
    pub aim: Vec2,
    pub fire: bool,
    pub interact: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GamePhase {
    Loading,
    Playing,
    LevelTransition,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationError {
    NoViableLayout { attempts: u32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogEvent {
    LevelGenerated { depth: u32, room_count: usize, retries: u32 },
    GenerationFellBack { depth: u32 },
    RoomTriggered { room: usize },
    RoomCleared { room: usize },
    DoorsLocked { room: usize },
    DoorsUnlocked { room: usize },
    ExitPortalOpened,
    LevelAdvanceScheduled,
    LevelAdvanced { depth: u32 },
    PhaseChanged { from: GamePhase, to: GamePhase },
    PhaseRejected { from: GamePhase, to: GamePhase },
    EnemySlain { kind: EnemyKind },
    UpgradeUnlocked { key: &'static str },
    PlayerDied,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectKind {
    Spark,
    Impact,
    Explosion,
}

/// Transient render-facing effect request, drained by the shell each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectEvent {
    pub kind: EffectKind,
    pub pos: Vec2,
}
