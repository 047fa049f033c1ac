/// All game entity types: data plus trivial accessors, no game logic.

use std::sync::Arc;

use crate::assets::{GameContext, Sprite};
use crate::mask::Mask;

// ── Obstacle variants ─────────────────────────────────────────────────────────

/// Visual identity of an obstacle.  Purely cosmetic: every variant collides
/// and takes damage the same way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObstacleKind {
    /// Blue satellite.
    Starlink1,
    /// Purple satellite.
    Starlink2,
    /// Brown rock.
    Asteroid1,
    /// Grey rock.
    Asteroid2,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 4] = [
        ObstacleKind::Starlink1,
        ObstacleKind::Starlink2,
        ObstacleKind::Asteroid1,
        ObstacleKind::Asteroid2,
    ];

    /// Look up a variant by its colour name or its own name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "blue" | "starlink1" => Some(ObstacleKind::Starlink1),
            "purple" | "starlink2" => Some(ObstacleKind::Starlink2),
            "brown" | "asteroid1" => Some(ObstacleKind::Asteroid1),
            "grey" | "gray" | "asteroid2" => Some(ObstacleKind::Asteroid2),
            _ => None,
        }
    }

    pub fn color_name(self) -> &'static str {
        match self {
            ObstacleKind::Starlink1 => "blue",
            ObstacleKind::Starlink2 => "purple",
            ObstacleKind::Asteroid1 => "brown",
            ObstacleKind::Asteroid2 => "grey",
        }
    }
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Direction of travel.  Screen y grows downward, so `Up` is negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Heading {
    Up,
    Down,
}

impl Heading {
    pub fn sign(self) -> i32 {
        match self {
            Heading::Up => -1,
            Heading::Down => 1,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Projectile {
    pub x: i32,
    pub y: i32,
    pub heading: Heading,
    pub sprite: Arc<Sprite>,
}

impl Projectile {
    pub fn mask(&self) -> &Mask {
        self.sprite.mask()
    }
}

// ── Actors ────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    Player,
    Obstacle(ObstacleKind),
}

/// Any simulated body: the player craft or a piece of debris.
#[derive(Clone, Debug)]
pub struct Actor {
    pub x: i32,
    pub y: i32,
    /// Always within `0..=max_health`.
    pub health: u32,
    pub max_health: u32,
    pub sprite: Arc<Sprite>,
    /// Sprite used for shots fired by this actor.
    pub laser: Arc<Sprite>,
    /// Ticks since the last shot; 0 means ready to fire.
    pub cooldown: u32,
    pub projectiles: Vec<Projectile>,
    pub role: Role,
}

impl Actor {
    pub fn player(x: i32, y: i32, ctx: &GameContext) -> Self {
        Self::with_sprite(x, y, Role::Player, ctx.assets.player.clone(), ctx)
    }

    pub fn obstacle(x: i32, y: i32, kind: ObstacleKind, ctx: &GameContext) -> Self {
        Self::with_sprite(x, y, Role::Obstacle(kind), ctx.assets.obstacle(kind).clone(), ctx)
    }

    fn with_sprite(x: i32, y: i32, role: Role, sprite: Arc<Sprite>, ctx: &GameContext) -> Self {
        Self {
            x,
            y,
            health: ctx.config.max_health,
            max_health: ctx.config.max_health,
            sprite,
            laser: ctx.assets.laser.clone(),
            cooldown: 0,
            projectiles: Vec::new(),
            role,
        }
    }

    pub fn mask(&self) -> &Mask {
        self.sprite.mask()
    }

    pub fn width(&self) -> i32 {
        self.sprite.width()
    }

    pub fn height(&self) -> i32 {
        self.sprite.height()
    }

    pub fn is_destroyed(&self) -> bool {
        self.health == 0
    }

    /// The player shoots upward; debris would shoot downward.
    pub fn laser_heading(&self) -> Heading {
        match self.role {
            Role::Player => Heading::Up,
            Role::Obstacle(_) => Heading::Down,
        }
    }
}

// ── Session ───────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    /// Lives or health ran out; the banner is showing and gameplay is frozen.
    Lost,
    /// The loss banner has run its course.
    Finished,
}

/// The entire state of one run.  Cloneable so `compute::tick` can return a
/// new copy without mutating the original.
#[derive(Clone, Debug)]
pub struct GameSession {
    pub player: Actor,
    /// Active wave; order carries no meaning.
    pub obstacles: Vec<Actor>,
    pub score: u32,
    pub level: u32,
    /// Obstacles spawned by the most recent wave.
    pub wavelength: u32,
    pub lives: u32,
    pub status: GameStatus,
    /// Ticks spent in the `Lost` state.
    pub lost_ticks: u32,
    pub frame: u64,
}

impl GameSession {
    pub fn new(ctx: &GameContext) -> Self {
        let config = &ctx.config;
        Self {
            player: Actor::player(config.player_start_x, config.player_start_y, ctx),
            obstacles: Vec::new(),
            score: 0,
            level: 0,
            wavelength: config.starting_wavelength,
            lives: config.starting_lives,
            status: GameStatus::Playing,
            lost_ticks: 0,
            frame: 0,
        }
    }

    /// Once set, stays set for the rest of the session.
    pub fn is_lost(&self) -> bool {
        self.status != GameStatus::Playing
    }
}
