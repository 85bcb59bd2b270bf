//! Deterministic rules engine
//!
//! All gameplay decisions live here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - Events drained in a fixed order once per frame
//! - No rendering or platform dependencies

pub mod body;
pub mod commands;
pub mod events;
pub mod rules;
pub mod state;
pub mod tick;

pub use body::{Body, BodyKind, EntityId, PhysicsBody, Touching};
pub use commands::{
    AnimKey, Command, CommandBuffer, Group, PhysicsCommand, RenderCommand, TextCommand, TextId,
};
pub use events::{Direction, EventQueue, InputSignal, PhysicsEvent};
pub use rules::{ContactOutcome, SpawnTrigger, is_stomp};
pub use state::{GamePhase, GameSession, Hazard, Hud, Platform, Player, RngState, Star, Tint};
pub use tick::{FrameOutcome, Game, update};
