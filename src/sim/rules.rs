//! Contact resolution and spawn policy
//!
//! Handlers for the two contact kinds the physics step reports:
//! - player overlaps a star: score it, and spawn hazards at the thresholds
//! - player collides with a hazard: stomp it or end the round
//!
//! Every handler tolerates stale or unknown ids and does nothing for them.

use glam::Vec2;
use rand::Rng;

use super::body::{Body, BodyKind, EntityId, Touching};
use super::commands::{
    AnimKey, CommandBuffer, GAME_OVER_TEXT, Group, PhysicsCommand, RESTART_TEXT, RenderCommand,
    TextCommand, TextId, score_text,
};
use super::state::{GamePhase, GameSession, Hazard, Tint};
use crate::consts::*;
use crate::settings::Settings;
use crate::star_slot_x;

/// Why a hazard appeared
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnTrigger {
    /// One star left in the cycle
    LastStar,
    /// Every star collected and the set was refilled
    Refill,
}

/// Outcome of a player/hazard collision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Player landed on top, hazard destroyed
    Stomp,
    /// Any other geometry, round over
    Hit,
    /// Nothing happened (already over, or unknown ids)
    Ignored,
}

/// A stomp needs the hazard touched on top AND the player touched underneath.
/// Checking one side only lets a side graze on the hazard's top edge count.
pub fn is_stomp(player: Touching, hazard: Touching) -> bool {
    hazard.up && player.down
}

/// Horizontal spawn range on the half of the field away from the player
pub fn hazard_spawn_range(player_x: f32) -> (i32, i32) {
    let mid = FIELD_MIDPOINT_X as i32;
    if player_x < FIELD_MIDPOINT_X {
        (mid, FIELD_WIDTH as i32)
    } else {
        (0, mid)
    }
}

/// Player passes through a star
pub fn handle_star_overlap(
    session: &mut GameSession,
    settings: &Settings,
    player: EntityId,
    star: EntityId,
    commands: &mut CommandBuffer,
) {
    if session.phase == GamePhase::GameOver {
        log::debug!("Ignoring star overlap during game over");
        return;
    }
    if player != session.player.body.id {
        log::debug!("Ignoring star overlap for unknown player {:?}", player);
        return;
    }
    let Some(entry) = session.star_mut(star) else {
        log::debug!("Ignoring overlap with unknown star {:?}", star);
        return;
    };
    if !entry.is_active() {
        return;
    }

    commands.disable(&mut entry.body);

    session.score = session.score.saturating_add(settings.points_per_star);
    session.hud.score = score_text(session.score);
    commands.text(TextCommand::Set {
        id: TextId::Score,
        content: session.hud.score.clone(),
    });

    let remaining = session.active_stars();

    if remaining == 1 {
        session.hud.hide(TextId::Title, commands);
        spawn_hazard(session, settings, SpawnTrigger::LastStar, commands);
    }

    if remaining == 0 {
        refill_stars(session, commands);
        spawn_hazard(session, settings, SpawnTrigger::Refill, commands);
    }
}

/// Bring every star back at its slot, dropping in from the top edge
fn refill_stars(session: &mut GameSession, commands: &mut CommandBuffer) {
    for star in &mut session.stars {
        let pos = Vec2::new(star_slot_x(star.slot), STAR_SPAWN_Y);
        commands.enable_at(&mut star.body, pos);
    }
    log::info!("All stars collected, refilled {}", session.stars.len());
}

/// Spawn one hazard on the far side of the field from the player
pub fn spawn_hazard(
    session: &mut GameSession,
    settings: &Settings,
    trigger: SpawnTrigger,
    commands: &mut CommandBuffer,
) -> EntityId {
    let (lo, hi) = hazard_spawn_range(session.player.body.pos.x);
    let x = session.rng.random_range(lo..=hi) as f32;
    let max_vy = settings
        .hazard_max_vertical_speed
        .clamp(0, HAZARD_VERTICAL_SPEED_LIMIT);
    let vy = session.rng.random_range(-max_vy..=max_vy) as f32;

    let id = EntityId(session.next_entity_id());
    let mut body = Body::new(id, BodyKind::Hazard, Vec2::new(x, HAZARD_SPAWN_Y));
    body.bounce = Vec2::splat(HAZARD_BOUNCE);
    body.collide_world_bounds = true;

    commands.physics(PhysicsCommand::CreateBody {
        id,
        kind: BodyKind::Hazard,
        group: Group::Hazards,
        pos: body.pos,
        scale: 1.0,
    });
    commands.physics(PhysicsCommand::SetBounce {
        id,
        x: HAZARD_BOUNCE,
        y: HAZARD_BOUNCE,
    });
    commands.physics(PhysicsCommand::SetCollideWorldBounds { id, enabled: true });
    commands.set_velocity_y(&mut body, vy);

    session.hazards.push(Hazard { body });
    session.hazards_spawned += 1;

    log::info!(
        "Hazard {:?} spawned ({:?}) at x={} vy={}, {} active",
        id,
        trigger,
        x,
        vy,
        session.hazards.len()
    );
    id
}

/// Player collides with a hazard
pub fn handle_hazard_collision(
    session: &mut GameSession,
    player: EntityId,
    hazard: EntityId,
    player_touching: Touching,
    hazard_touching: Touching,
    commands: &mut CommandBuffer,
) -> ContactOutcome {
    if session.phase == GamePhase::GameOver {
        return ContactOutcome::Ignored;
    }
    if player != session.player.body.id {
        log::debug!("Ignoring hazard contact for unknown player {:?}", player);
        return ContactOutcome::Ignored;
    }
    let Some(index) = session.hazard_index(hazard) else {
        log::debug!("Ignoring contact with unknown hazard {:?}", hazard);
        return ContactOutcome::Ignored;
    };

    if is_stomp(player_touching, hazard_touching) {
        let stomped = session.hazards.remove(index);
        commands.destroy(&stomped.body);
        log::info!("Hazard {:?} stomped, {} left", hazard, session.hazards.len());
        return ContactOutcome::Stomp;
    }

    game_over(session, commands);
    ContactOutcome::Hit
}

/// Freeze the world and show the game over screen
fn game_over(session: &mut GameSession, commands: &mut CommandBuffer) {
    commands.physics(PhysicsCommand::Pause);
    session.physics_paused = true;

    let player = &mut session.player;
    player.tint = Tint::Hit;
    commands.render(RenderCommand::SetTint {
        id: player.body.id,
        color: HIT_TINT,
    });
    player.anim = AnimKey::Turn;
    commands.render(RenderCommand::PlayAnimation {
        id: player.body.id,
        key: AnimKey::Turn,
    });

    commands.show_text(TextId::GameOver, GAME_OVER_TEXT);
    commands.show_text(TextId::Restart, RESTART_TEXT);
    session.hud.game_over = true;
    session.hud.restart = true;

    session.phase = GamePhase::GameOver;
    log::info!("Game over with score {}", session.score);
}
