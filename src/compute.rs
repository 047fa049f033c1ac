/// Game-logic functions.
///
/// Entity-level helpers mutate the actor they are handed and nothing else.
/// `tick` takes an immutable reference to the current `GameSession` (and an
/// RNG handle) and returns a brand-new `GameSession`.  Side effects are
/// limited to the injected RNG.

use rand::Rng;

use crate::assets::GameContext;
use crate::config::GameConfig;
use crate::entities::{Actor, GameSession, GameStatus, ObstacleKind, Projectile, Role};
use crate::input::TickInput;
use crate::mask::Mask;

/// Score awarded per obstacle shot down.
pub fn score_for(kind: ObstacleKind) -> u32 {
    match kind {
        ObstacleKind::Starlink1 | ObstacleKind::Starlink2 => 150,
        ObstacleKind::Asteroid1 | ObstacleKind::Asteroid2 => 100,
    }
}

// ── Collision ─────────────────────────────────────────────────────────────────

fn masks_touch(a: &Mask, a_pos: (i32, i32), b: &Mask, b_pos: (i32, i32)) -> bool {
    a.overlap(b, (b_pos.0 - a_pos.0, b_pos.1 - a_pos.1))
}

/// Pixel-exact test of whether two actors' sprites touch.
pub fn collide(a: &Actor, b: &Actor) -> bool {
    masks_touch(a.mask(), (a.x, a.y), b.mask(), (b.x, b.y))
}

// ── Projectiles ───────────────────────────────────────────────────────────────

/// Advance a shot `speed` pixels along its heading.
pub fn move_projectile(projectile: &mut Projectile, speed: i32) {
    projectile.y += projectile.heading.sign() * speed;
}

/// True once the projectile's y leaves `[0, height]`.  Both ends are still
/// on screen.
pub fn is_off_screen(projectile: &Projectile, height: i32) -> bool {
    !(0..=height).contains(&projectile.y)
}

pub fn projectile_hits(projectile: &Projectile, target: &Actor) -> bool {
    masks_touch(
        target.mask(),
        (target.x, target.y),
        projectile.mask(),
        (projectile.x, projectile.y),
    )
}

// ── Actor helpers ─────────────────────────────────────────────────────────────

/// Advance the shot timer.  Counts up from 1 while locked and wraps to 0
/// (ready) once it reaches `cooldown_ticks`.  A ready actor stays at 0.
pub fn cooldown_tick(actor: &mut Actor, cooldown_ticks: u32) {
    if actor.cooldown >= cooldown_ticks {
        actor.cooldown = 0;
    } else if actor.cooldown > 0 {
        actor.cooldown += 1;
    }
}

/// Fire from the actor's position if the cooldown allows it.  Returns whether
/// a projectile was launched.
pub fn shoot(actor: &mut Actor) -> bool {
    if actor.cooldown != 0 {
        return false;
    }
    actor.projectiles.push(Projectile {
        x: actor.x,
        y: actor.y,
        heading: actor.laser_heading(),
        sprite: actor.laser.clone(),
    });
    actor.cooldown = 1;
    true
}

/// Health never drops below zero.
pub fn damage(actor: &mut Actor, amount: u32) {
    actor.health = actor.health.saturating_sub(amount);
}

/// Move an obstacle straight down.
pub fn move_obstacle(obstacle: &mut Actor, delta_y: i32) {
    obstacle.y += delta_y;
}

/// Advance `actor`'s shots against a single target.  Shots that leave the
/// screen are dropped; shots that hit cost the target `hit_damage` health and
/// are dropped too.
pub fn update_projectiles(actor: &mut Actor, target: &mut Actor, config: &GameConfig) {
    cooldown_tick(actor, config.cooldown_ticks());

    let mut live = Vec::with_capacity(actor.projectiles.len());
    for mut projectile in std::mem::take(&mut actor.projectiles) {
        move_projectile(&mut projectile, config.laser_velocity);
        if is_off_screen(&projectile, config.height) {
            continue;
        }
        if projectile_hits(&projectile, target) {
            damage(target, config.hit_damage);
            log::debug!("Shot hit {:?}, health now {}", target.role, target.health);
            continue;
        }
        live.push(projectile);
    }
    actor.projectiles = live;
}

/// Advance the player's shots against the whole wave.  A hit destroys the
/// struck obstacle outright and consumes the shot; one shot takes out at most
/// one obstacle.  Returns the kinds destroyed, in the order they were hit.
pub fn update_player_projectiles(
    player: &mut Actor,
    obstacles: &mut Vec<Actor>,
    config: &GameConfig,
) -> Vec<ObstacleKind> {
    cooldown_tick(player, config.cooldown_ticks());

    let mut destroyed = vec![false; obstacles.len()];
    let mut kinds = Vec::new();
    let mut live = Vec::with_capacity(player.projectiles.len());

    for mut projectile in std::mem::take(&mut player.projectiles) {
        move_projectile(&mut projectile, config.laser_velocity);
        if is_off_screen(&projectile, config.height) {
            continue;
        }
        let hit = obstacles
            .iter()
            .enumerate()
            .position(|(i, o)| !destroyed[i] && projectile_hits(&projectile, o));
        match hit {
            Some(i) => {
                destroyed[i] = true;
                if let Role::Obstacle(kind) = obstacles[i].role {
                    kinds.push(kind);
                }
            }
            None => live.push(projectile),
        }
    }

    player.projectiles = live;
    let mut flags = destroyed.into_iter();
    obstacles.retain(|_| !flags.next().unwrap_or(false));
    kinds
}

// ── Health bar ────────────────────────────────────────────────────────────────

/// Geometry of the bar drawn under the player, in world pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HealthBar {
    pub x: i32,
    pub y: i32,
    /// Full width of the background segment (the sprite width).
    pub width: i32,
    /// Width of the foreground segment.
    pub fill: i32,
    pub thickness: i32,
}

/// `floor(width * health / max_health)`, clamped to `[0, width]`.
pub fn fill_width(width: i32, health: u32, max_health: u32) -> i32 {
    if max_health == 0 || width <= 0 {
        return 0;
    }
    let fill = i64::from(width) * i64::from(health) / i64::from(max_health);
    fill.clamp(0, i64::from(width)) as i32
}

pub fn health_bar(actor: &Actor, config: &GameConfig) -> HealthBar {
    let width = actor.width();
    HealthBar {
        x: actor.x,
        y: actor.y + actor.height() + config.health_bar_gap,
        width,
        fill: fill_width(width, actor.health, actor.max_health),
        thickness: config.health_bar_thickness,
    }
}

// ── Player movement ───────────────────────────────────────────────────────────

/// Apply held directions.  Each step is taken only if the whole sprite stays
/// inside the viewport, with `bottom_margin` kept free below it.
pub fn move_player(player: &mut Actor, input: &TickInput, config: &GameConfig) {
    let vel = config.player_velocity;
    if input.left && player.x - vel > 0 {
        player.x -= vel;
    }
    if input.right && player.x + vel + player.width() < config.width {
        player.x += vel;
    }
    if input.up && player.y - vel > 0 {
        player.y -= vel;
    }
    if input.down && player.y + vel + player.height() + config.bottom_margin < config.height {
        player.y += vel;
    }
}

// ── Waves ─────────────────────────────────────────────────────────────────────

/// Level up and queue the next wave above the top edge.  Random vertical
/// offsets stagger the obstacles' arrival.
pub fn spawn_wave(state: &mut GameSession, ctx: &GameContext, rng: &mut impl Rng) {
    let config = &ctx.config;
    state.level += 1;
    state.wavelength += config.wave_increment;

    for _ in 0..state.wavelength {
        let x = rng.gen_range(config.spawn_x_range());
        let y = rng.gen_range(config.spawn_y_range());
        let kind = ObstacleKind::ALL[rng.gen_range(0..ObstacleKind::ALL.len())];
        state.obstacles.push(Actor::obstacle(x, y, kind, ctx));
    }

    log::info!("Level {}: {} obstacles incoming", state.level, state.wavelength);
}

// ── Per-tick update ───────────────────────────────────────────────────────────

/// Advance the session by one tick.  All randomness comes through `rng` so
/// callers control determinism (useful for tests with a seeded RNG).
pub fn tick(
    state: &GameSession,
    input: &TickInput,
    ctx: &GameContext,
    rng: &mut impl Rng,
) -> GameSession {
    let config = &ctx.config;
    let mut next = state.clone();
    next.frame += 1;

    if next.status == GameStatus::Finished {
        return next;
    }

    // ── 1. Refill the wave ───────────────────────────────────────────────────
    if !next.is_lost() && next.obstacles.is_empty() {
        spawn_wave(&mut next, ctx, rng);
    }

    // ── 2. Loss check; gameplay freezes while the banner shows ───────────────
    if !next.is_lost() && (next.lives == 0 || next.player.is_destroyed()) {
        next.status = GameStatus::Lost;
        log::info!(
            "Mission failed at level {} with score {} (lives {}, health {})",
            next.level,
            next.score,
            next.lives,
            next.player.health
        );
    }
    if next.is_lost() {
        next.lost_ticks += 1;
        if next.lost_ticks > config.loss_ticks() {
            next.status = GameStatus::Finished;
            log::info!("Session finished after {} frames", next.frame);
        }
        return next;
    }

    // ── 3. Player controls ───────────────────────────────────────────────────
    move_player(&mut next.player, input, config);
    if input.fire {
        shoot(&mut next.player);
    }

    // ── 4. Obstacles: fall, fire, escape or ram ──────────────────────────────
    let mut survivors = Vec::with_capacity(next.obstacles.len());
    for mut obstacle in std::mem::take(&mut next.obstacles) {
        move_obstacle(&mut obstacle, config.obstacle_velocity);
        update_projectiles(&mut obstacle, &mut next.player, config);

        if obstacle.y + obstacle.height() > config.height {
            next.lives = next.lives.saturating_sub(1);
            log::debug!("Obstacle slipped past, {} lives left", next.lives);
            continue;
        }
        if collide(&obstacle, &next.player) {
            damage(&mut next.player, config.hit_damage);
            log::debug!("Rammed by {:?}, health now {}", obstacle.role, next.player.health);
            continue;
        }
        survivors.push(obstacle);
    }
    next.obstacles = survivors;

    // ── 5. Player shots against the wave ─────────────────────────────────────
    let destroyed = update_player_projectiles(&mut next.player, &mut next.obstacles, config);
    next.score += destroyed.into_iter().map(score_for).sum::<u32>();

    next
}
