//! Events delivered by the engine shell
//!
//! The physics step reports body state and contacts as it runs. Instead of
//! handling them inside engine callbacks, the shell pushes them onto an
//! [`EventQueue`] which the rules engine drains once per frame in a fixed
//! order: body syncs, then overlaps, then collisions. Within each kind events
//! keep their arrival order.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{EntityId, Touching};

/// Decoded per-frame input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputSignal {
    pub left: bool,
    pub right: bool,
    /// Jump
    pub up: bool,
    /// Restart after game over
    pub restart: bool,
}

/// Resolved horizontal intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Neither,
}

impl InputSignal {
    /// Left wins when both directions are held
    pub fn direction(&self) -> Direction {
        if self.left {
            Direction::Left
        } else if self.right {
            Direction::Right
        } else {
            Direction::Neither
        }
    }
}

/// Notifications from the physics step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PhysicsEvent {
    /// Current state of a dynamic body after the step
    BodySync {
        id: EntityId,
        pos: Vec2,
        vel: Vec2,
        touching: Touching,
    },
    /// Player passes through a star
    Overlap {
        player: EntityId,
        star: EntityId,
    },
    /// Player and hazard collided, with contact flags for both bodies
    Collision {
        player: EntityId,
        hazard: EntityId,
        player_touching: Touching,
        hazard_touching: Touching,
    },
}

/// Per-session event queue
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    syncs: Vec<PhysicsEvent>,
    overlaps: Vec<PhysicsEvent>,
    collisions: Vec<PhysicsEvent>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: PhysicsEvent) {
        match event {
            PhysicsEvent::BodySync { .. } => self.syncs.push(event),
            PhysicsEvent::Overlap { .. } => self.overlaps.push(event),
            PhysicsEvent::Collision { .. } => self.collisions.push(event),
        }
    }

    pub fn len(&self) -> usize {
        self.syncs.len() + self.overlaps.len() + self.collisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Take every queued event in delivery order
    pub fn drain(&mut self) -> Vec<PhysicsEvent> {
        let mut events = Vec::with_capacity(self.len());
        events.append(&mut self.syncs);
        events.append(&mut self.overlaps);
        events.append(&mut self.collisions);
        events
    }
}
