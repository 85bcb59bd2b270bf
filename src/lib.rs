//! Star Collector - a platform arcade game rules engine
//!
//! Core modules:
//! - `sim`: Deterministic rules engine (game phases, scoring, spawns, contact policy)
//! - `settings`: Data-driven tunables loaded from JSON
//!
//! Rendering, physics integration and input polling live in an external
//! engine shell. The shell feeds events into [`sim::Game`] and applies the
//! commands it drains back out.

pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use settings::{Settings, SettingsError};
pub use sim::Game;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Play field dimensions
    pub const FIELD_WIDTH: f32 = 800.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    /// Hazards spawn on the half of the field the player is not in
    pub const FIELD_MIDPOINT_X: f32 = FIELD_WIDTH / 2.0;

    /// Player defaults
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SPAWN_Y: f32 = 450.0;
    pub const PLAYER_BOUNCE: f32 = 0.2;
    pub const PLAYER_RUN_SPEED: f32 = 160.0;
    /// Upward impulse when jumping (applied as negative y velocity)
    pub const PLAYER_JUMP_IMPULSE: f32 = 330.0;
    /// Tint applied when the player is hit
    pub const HIT_TINT: u32 = 0xff0000;

    /// Collectible layout: one star per slot, `STAR_COUNT` slots
    pub const STAR_COUNT: usize = 12;
    pub const STAR_FIRST_X: f32 = 12.0;
    pub const STAR_STEP_X: f32 = 70.0;
    /// Stars (re)spawn at the top edge and fall onto the platforms
    pub const STAR_SPAWN_Y: f32 = 0.0;
    pub const STAR_BOUNCE_MIN: f32 = 0.4;
    pub const STAR_BOUNCE_MAX: f32 = 0.8;
    pub const POINTS_PER_STAR: u64 = 10;
    /// Upper bound for a configured star value
    pub const MAX_POINTS_PER_STAR: u64 = 1_000_000;

    /// Hazard defaults
    pub const HAZARD_SPAWN_Y: f32 = 16.0;
    pub const HAZARD_BOUNCE: f32 = 1.0;
    /// Vertical speed is rolled from [-MAX, MAX]
    pub const HAZARD_MAX_VERTICAL_SPEED: i32 = 200;
    /// Upper bound for a configured hazard vertical speed
    pub const HAZARD_VERTICAL_SPEED_LIMIT: i32 = 10_000;

    /// Platforms: (x, y, scale). The first entry is the ground.
    pub const PLATFORMS: [(f32, f32, f32); 4] = [
        (400.0, 568.0, 2.0),
        (600.0, 400.0, 1.0),
        (50.0, 250.0, 1.0),
        (750.0, 220.0, 1.0),
    ];

    /// Background image centre
    pub const SKY_POS: (f32, f32) = (400.0, 300.0);

    /// Asset keys
    pub const SKY_KEY: &str = "sky";
    pub const GROUND_KEY: &str = "ground";
    pub const STAR_KEY: &str = "star";
    pub const HAZARD_KEY: &str = "ufo";
    pub const PLAYER_KEY: &str = "dude";
    pub const PLAYER_FRAME_SIZE: (u32, u32) = (32, 48);
}

/// Horizontal spawn position of a collectible slot
#[inline]
pub fn star_slot_x(slot: usize) -> f32 {
    consts::STAR_FIRST_X + consts::STAR_STEP_X * slot as f32
}

/// Player spawn point
#[inline]
pub fn player_spawn() -> Vec2 {
    Vec2::new(consts::PLAYER_SPAWN_X, consts::PLAYER_SPAWN_Y)
}
