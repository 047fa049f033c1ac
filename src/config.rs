//! Tunable game constants.
//!
//! Every number the simulation depends on lives in `GameConfig` so a run can
//! be reshaped from a JSON file without recompiling.  Missing fields fall
//! back to the defaults below.

use std::path::Path;

use anyhow::{bail, Context};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Viewport width in world pixels.
    pub width: i32,
    /// Viewport height in world pixels.
    pub height: i32,
    /// Target ticks per second.
    pub fps: u32,

    pub player_velocity: i32,
    pub obstacle_velocity: i32,
    pub laser_velocity: i32,

    pub starting_lives: u32,
    /// Obstacle count before the first level-up.
    pub starting_wavelength: u32,
    /// Obstacles added per level.
    pub wave_increment: u32,

    pub max_health: u32,
    /// Health removed by a laser hit or an obstacle ramming the player.
    pub hit_damage: u32,
    /// Space kept free under the player for the health bar.
    pub bottom_margin: i32,

    pub spawn_x_min: i32,
    /// Distance from the right edge that spawned obstacles stay clear of.
    pub spawn_x_right_margin: i32,
    pub spawn_y_min: i32,
    pub spawn_y_max: i32,

    /// How long the "mission failed" banner stays up before the run ends.
    pub loss_seconds: u32,

    pub health_bar_gap: i32,
    pub health_bar_thickness: i32,

    /// World pixels covered by one terminal cell.
    pub cell_width: i32,
    pub cell_height: i32,

    pub player_start_x: i32,
    pub player_start_y: i32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 900,
            height: 700,
            fps: 60,

            player_velocity: 5,
            obstacle_velocity: 1,
            laser_velocity: 6,

            starting_lives: 5,
            starting_wavelength: 5,
            wave_increment: 2,

            max_health: 100,
            hit_damage: 10,
            bottom_margin: 15,

            spawn_x_min: 50,
            spawn_x_right_margin: 100,
            spawn_y_min: -1500,
            spawn_y_max: -100,

            loss_seconds: 3,

            health_bar_gap: 10,
            health_bar_thickness: 10,

            cell_width: 10,
            cell_height: 20,

            player_start_x: 300,
            player_start_y: 600,
        }
    }
}

impl GameConfig {
    /// Ticks an actor must wait between shots (half a second).
    pub fn cooldown_ticks(&self) -> u32 {
        self.fps / 2
    }

    /// Ticks the loss banner is held before the session finishes.
    pub fn loss_ticks(&self) -> u32 {
        self.fps.saturating_mul(self.loss_seconds)
    }

    /// Horizontal spawn range, upper bound exclusive.
    pub fn spawn_x_range(&self) -> std::ops::Range<i32> {
        self.spawn_x_min..self.width - self.spawn_x_right_margin
    }

    pub fn spawn_y_range(&self) -> std::ops::Range<i32> {
        self.spawn_y_min..self.spawn_y_max
    }

    /// Read a JSON config file and validate it.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        config.validate()?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.width <= 0 || self.height <= 0 {
            bail!("viewport must be non-empty, got {}x{}", self.width, self.height);
        }
        if self.fps == 0 {
            bail!("fps must be positive");
        }
        if self.player_velocity <= 0 || self.obstacle_velocity <= 0 || self.laser_velocity <= 0 {
            bail!("velocities must be positive");
        }
        if self.max_health == 0 {
            bail!("max_health must be positive");
        }
        if self.spawn_x_range().is_empty() || self.spawn_y_range().is_empty() {
            bail!("spawn ranges must be non-empty");
        }
        if self.spawn_y_max > 0 {
            bail!("obstacles must spawn above the top edge, got spawn_y_max {}", self.spawn_y_max);
        }
        if self.wave_increment == 0 {
            bail!("wave_increment must be positive so every level brings a bigger wave");
        }
        if self.cell_width <= 0 || self.cell_height <= 0 {
            bail!("cell size must be positive");
        }
        Ok(())
    }
}
