/// Sprites and the application context that owns them.
///
/// `Assets` is built once at startup and passed by reference into the
/// simulation and renderer.  Entities hold cheap `Arc` handles to the
/// sprites they were created with.

use std::sync::Arc;

use crossterm::style::Color;

use crate::config::GameConfig;
use crate::entities::ObstacleKind;
use crate::mask::Mask;

// ── Art ───────────────────────────────────────────────────────────────────────

const ORBITER_ART: &[&str] = &[
    "  A  ",
    " [#] ",
    "/###\\",
];

// Centred inside a ship-wide frame so shots leave from the nose.
const LASER_ART: &[&str] = &["  |  "];

const STARLINK1_ART: &[&str] = &[
    "=[#]=",
    "  |  ",
];

const STARLINK2_ART: &[&str] = &[
    "[=O=]",
    " / \\ ",
];

const ASTEROID1_ART: &[&str] = &[
    " .@@. ",
    "@@@@@@",
    " '@@' ",
];

const ASTEROID2_ART: &[&str] = &[
    " ## ",
    "####",
    " ## ",
];

// ── Sprite ────────────────────────────────────────────────────────────────────

/// Glyph art plus the collision mask derived from it.
#[derive(Debug)]
pub struct Sprite {
    pub name: &'static str,
    pub art: Vec<String>,
    pub color: Color,
    mask: Mask,
}

impl Sprite {
    pub fn new(name: &'static str, rows: &[&str], color: Color, cell_w: i32, cell_h: i32) -> Self {
        Self {
            name,
            art: rows.iter().map(|r| r.to_string()).collect(),
            color,
            mask: Mask::from_art(rows, cell_w, cell_h),
        }
    }

    pub fn mask(&self) -> &Mask {
        &self.mask
    }

    /// Bounding-box width in world pixels.
    pub fn width(&self) -> i32 {
        self.mask.width()
    }

    /// Bounding-box height in world pixels.
    pub fn height(&self) -> i32 {
        self.mask.height()
    }
}

// ── Application context ───────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Assets {
    pub player: Arc<Sprite>,
    pub laser: Arc<Sprite>,
    starlink1: Arc<Sprite>,
    starlink2: Arc<Sprite>,
    asteroid1: Arc<Sprite>,
    asteroid2: Arc<Sprite>,
}

impl Assets {
    pub fn new(config: &GameConfig) -> Self {
        let (w, h) = (config.cell_width, config.cell_height);
        let sprite = |name: &'static str, rows: &[&str], color: Color| {
            Arc::new(Sprite::new(name, rows, color, w, h))
        };
        Self {
            player: sprite("orbiter", ORBITER_ART, Color::White),
            laser: sprite("laser", LASER_ART, Color::Red),
            starlink1: sprite("starlink1", STARLINK1_ART, Color::Blue),
            starlink2: sprite("starlink2", STARLINK2_ART, Color::Magenta),
            asteroid1: sprite("asteroid1", ASTEROID1_ART, Color::DarkYellow),
            asteroid2: sprite("asteroid2", ASTEROID2_ART, Color::Grey),
        }
    }

    pub fn obstacle(&self, kind: ObstacleKind) -> &Arc<Sprite> {
        match kind {
            ObstacleKind::Starlink1 => &self.starlink1,
            ObstacleKind::Starlink2 => &self.starlink2,
            ObstacleKind::Asteroid1 => &self.asteroid1,
            ObstacleKind::Asteroid2 => &self.asteroid2,
        }
    }
}

/// Everything a run needs that never changes while it plays.
#[derive(Debug, Clone)]
pub struct GameContext {
    pub config: GameConfig,
    pub assets: Assets,
}

impl GameContext {
    pub fn new(config: GameConfig) -> Self {
        let assets = Assets::new(&config);
        Self { config, assets }
    }
}

impl Default for GameContext {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}
