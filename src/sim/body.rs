//! Mirrored physics bodies
//!
//! The physics collaborator owns the real bodies. The rules engine keeps a
//! mirror of the parts it reads (position, velocity, contact flags) and
//! mutates it alongside the commands it issues.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Stable handle shared with the physics collaborator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// What a body represents in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    Player,
    Star,
    Hazard,
    Platform,
}

impl BodyKind {
    /// Sprite/texture key the renderer draws this body with
    pub fn sprite_key(&self) -> &'static str {
        match self {
            BodyKind::Player => PLAYER_KEY,
            BodyKind::Star => STAR_KEY,
            BodyKind::Hazard => HAZARD_KEY,
            BodyKind::Platform => GROUND_KEY,
        }
    }
}

/// Contact flags reported by the physics step for one body
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Touching {
    /// Contact on the body's top surface
    pub up: bool,
    /// Contact on the body's bottom surface
    pub down: bool,
    /// Contact on the left or right surface
    pub side: bool,
}

impl Touching {
    pub const NONE: Touching = Touching {
        up: false,
        down: false,
        side: false,
    };

    pub fn up() -> Self {
        Self {
            up: true,
            ..Self::NONE
        }
    }

    pub fn down() -> Self {
        Self {
            down: true,
            ..Self::NONE
        }
    }

    pub fn side() -> Self {
        Self {
            side: true,
            ..Self::NONE
        }
    }
}

/// Capabilities the rules need from any game object backed by a physics body
pub trait PhysicsBody {
    fn id(&self) -> EntityId;
    fn kind(&self) -> BodyKind;

    fn position(&self) -> Vec2;
    fn set_position(&mut self, pos: Vec2);

    fn velocity(&self) -> Vec2;
    fn set_velocity_x(&mut self, vx: f32);
    fn set_velocity_y(&mut self, vy: f32);

    fn touching(&self) -> Touching;
    fn set_touching(&mut self, touching: Touching);

    /// Whether the body takes part in simulation and rendering
    fn is_enabled(&self) -> bool;
    fn set_enabled(&mut self, enabled: bool);
}

/// The single concrete body type behind every entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub id: EntityId,
    pub kind: BodyKind,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Restitution per axis
    pub bounce: Vec2,
    pub collide_world_bounds: bool,
    pub enabled: bool,
    pub touching: Touching,
}

impl Body {
    pub fn new(id: EntityId, kind: BodyKind, pos: Vec2) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            bounce: Vec2::ZERO,
            collide_world_bounds: false,
            enabled: true,
            touching: Touching::NONE,
        }
    }

    /// Apply a position/velocity/contact report from the physics step
    pub fn sync(&mut self, pos: Vec2, vel: Vec2, touching: Touching) {
        self.pos = pos;
        self.vel = vel;
        self.touching = touching;
    }
}

impl PhysicsBody for Body {
    fn id(&self) -> EntityId {
        self.id
    }

    fn kind(&self) -> BodyKind {
        self.kind
    }

    fn position(&self) -> Vec2 {
        self.pos
    }

    fn set_position(&mut self, pos: Vec2) {
        self.pos = pos;
    }

    fn velocity(&self) -> Vec2 {
        self.vel
    }

    fn set_velocity_x(&mut self, vx: f32) {
        self.vel.x = vx;
    }

    fn set_velocity_y(&mut self, vy: f32) {
        self.vel.y = vy;
    }

    fn touching(&self) -> Touching {
        self.touching
    }

    fn set_touching(&mut self, touching: Touching) {
        self.touching = touching;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}
