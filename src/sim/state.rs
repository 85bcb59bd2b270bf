//! Game state and core rules types
//!
//! A [`GameSession`] holds everything belonging to one round. Restarting
//! discards the session and builds a new one, so nothing carries over.

use glam::Vec2;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::body::{Body, BodyKind, EntityId, PhysicsBody};
use super::commands::{
    AnimKey, CommandBuffer, Group, INSTRUCTIONS_TEXT, PhysicsCommand, RenderCommand, TITLE_TEXT,
    TextCommand, TextId, score_text,
};
use super::events::EventQueue;
use crate::consts::*;
use crate::{player_spawn, star_slot_x};

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first move
    NotStarted,
    /// Active gameplay
    Playing,
    /// Player was hit, waiting for restart
    GameOver,
}

/// Player tint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Tint {
    Normal,
    Hit,
}

/// The player sprite
#[derive(Debug, Clone, Serialize)]
pub struct Player {
    pub body: Body,
    pub anim: AnimKey,
    pub tint: Tint,
}

/// A collectible star
#[derive(Debug, Clone, Serialize)]
pub struct Star {
    pub body: Body,
    /// Fixes the horizontal spawn position
    pub slot: usize,
}

impl Star {
    pub fn is_active(&self) -> bool {
        self.body.is_enabled()
    }
}

/// A roaming hazard
#[derive(Debug, Clone, Serialize)]
pub struct Hazard {
    pub body: Body,
}

/// A static platform
#[derive(Debug, Clone, Serialize)]
pub struct Platform {
    pub body: Body,
    pub scale: f32,
}

/// Which HUD texts are currently shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hud {
    pub title: bool,
    pub instructions: bool,
    pub game_over: bool,
    pub restart: bool,
    pub score: String,
}

impl Hud {
    /// Whether a text element is currently shown
    pub fn is_visible(&self, id: TextId) -> bool {
        match id {
            TextId::Title => self.title,
            TextId::Instructions => self.instructions,
            TextId::GameOver => self.game_over,
            TextId::Restart => self.restart,
            TextId::Score => true,
        }
    }

    /// Hide a text element. Hiding something already hidden does nothing.
    pub fn hide(&mut self, id: TextId, commands: &mut CommandBuffer) {
        let flag = match id {
            TextId::Title => &mut self.title,
            TextId::Instructions => &mut self.instructions,
            TextId::GameOver => &mut self.game_over,
            TextId::Restart => &mut self.restart,
            TextId::Score => return,
        };
        if *flag {
            *flag = false;
            commands.text(TextCommand::Hide { id });
        }
    }
}

/// RNG seed/stream pair. Each round draws from its own stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RngState {
    pub seed: u64,
    pub stream: u64,
}

impl RngState {
    pub fn new(seed: u64, stream: u64) -> Self {
        Self { seed, stream }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::new(self.seed, self.stream)
    }
}

/// Complete state of one round
#[derive(Debug, Clone, Serialize)]
pub struct GameSession {
    /// RNG seed and stream for this round
    pub rng_state: RngState,
    #[serde(skip)]
    pub(crate) rng: Pcg32,
    /// Current phase
    pub phase: GamePhase,
    /// Set by the first directional input
    pub started: bool,
    /// Score
    pub score: u64,
    /// Hazards spawned this round, including destroyed ones
    pub hazards_spawned: u32,
    /// Physics simulation paused
    pub physics_paused: bool,
    pub player: Player,
    /// Sorted by id (slot order)
    pub stars: Vec<Star>,
    /// Sorted by id (spawn order)
    pub hazards: Vec<Hazard>,
    pub platforms: Vec<Platform>,
    pub hud: Hud,
    #[serde(skip)]
    pub(crate) events: EventQueue,
    next_id: u32,
}

impl GameSession {
    /// Build a fresh round, issuing every command needed to create its scene.
    /// Entity ids start at `first_id` so they never collide with ids of a
    /// previous round.
    pub fn new(rng_state: RngState, first_id: u32, commands: &mut CommandBuffer) -> Self {
        use rand::Rng;

        let mut next_id = first_id;
        let mut alloc = || {
            let id = EntityId(next_id);
            next_id += 1;
            id
        };
        let mut rng = rng_state.to_rng();

        commands.render(RenderCommand::AddImage {
            key: SKY_KEY.to_string(),
            pos: Vec2::new(SKY_POS.0, SKY_POS.1),
        });

        // Platforms
        let platforms: Vec<Platform> = PLATFORMS
            .iter()
            .map(|&(x, y, scale)| {
                let body = Body::new(alloc(), BodyKind::Platform, Vec2::new(x, y));
                commands.physics(PhysicsCommand::CreateBody {
                    id: body.id,
                    kind: body.kind,
                    group: Group::Platforms,
                    pos: body.pos,
                    scale,
                });
                Platform { body, scale }
            })
            .collect();

        commands.show_text(TextId::Title, TITLE_TEXT);
        commands.show_text(TextId::Instructions, INSTRUCTIONS_TEXT);

        // Player
        let mut body = Body::new(alloc(), BodyKind::Player, player_spawn());
        body.bounce = Vec2::splat(PLAYER_BOUNCE);
        body.collide_world_bounds = true;
        commands.physics(PhysicsCommand::CreateBody {
            id: body.id,
            kind: body.kind,
            group: Group::Player,
            pos: body.pos,
            scale: 1.0,
        });
        commands.physics(PhysicsCommand::SetBounce {
            id: body.id,
            x: PLAYER_BOUNCE,
            y: PLAYER_BOUNCE,
        });
        commands.physics(PhysicsCommand::SetCollideWorldBounds {
            id: body.id,
            enabled: true,
        });
        let player = Player {
            body,
            anim: AnimKey::Turn,
            tint: Tint::Normal,
        };

        for key in [AnimKey::Left, AnimKey::Turn, AnimKey::Right] {
            let (first_frame, last_frame) = key.frames();
            commands.render(RenderCommand::DefineAnimation {
                key,
                sheet: PLAYER_KEY.to_string(),
                first_frame,
                last_frame,
                frame_rate: key.frame_rate(),
                looping: key.looping(),
            });
        }

        commands.physics(PhysicsCommand::AddCollider {
            a: Group::Player,
            b: Group::Platforms,
            notify: false,
        });

        // Stars
        let stars: Vec<Star> = (0..STAR_COUNT)
            .map(|slot| {
                let mut body = Body::new(
                    alloc(),
                    BodyKind::Star,
                    Vec2::new(star_slot_x(slot), STAR_SPAWN_Y),
                );
                body.bounce.y = rng.random_range(STAR_BOUNCE_MIN..STAR_BOUNCE_MAX);
                commands.physics(PhysicsCommand::CreateBody {
                    id: body.id,
                    kind: body.kind,
                    group: Group::Stars,
                    pos: body.pos,
                    scale: 1.0,
                });
                commands.physics(PhysicsCommand::SetBounce {
                    id: body.id,
                    x: 0.0,
                    y: body.bounce.y,
                });
                Star { body, slot }
            })
            .collect();

        commands.physics(PhysicsCommand::AddCollider {
            a: Group::Stars,
            b: Group::Platforms,
            notify: false,
        });
        commands.physics(PhysicsCommand::AddOverlap {
            a: Group::Player,
            b: Group::Stars,
        });

        let score = 0;
        commands.show_text(TextId::Score, &score_text(score));

        commands.physics(PhysicsCommand::AddCollider {
            a: Group::Hazards,
            b: Group::Platforms,
            notify: false,
        });
        commands.physics(PhysicsCommand::AddCollider {
            a: Group::Player,
            b: Group::Hazards,
            notify: true,
        });

        log::info!(
            "Session created (seed {}, stream {}, ids {}..{})",
            rng_state.seed,
            rng_state.stream,
            first_id,
            next_id
        );

        Self {
            rng_state,
            rng,
            phase: GamePhase::NotStarted,
            started: false,
            score,
            hazards_spawned: 0,
            physics_paused: false,
            player,
            stars,
            hazards: Vec::new(),
            platforms,
            hud: Hud {
                title: true,
                instructions: true,
                game_over: false,
                restart: false,
                score: score_text(score),
            },
            events: EventQueue::new(),
            next_id,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// First id not yet handed out
    pub fn id_watermark(&self) -> u32 {
        self.next_id
    }

    /// Number of stars still in play
    pub fn active_stars(&self) -> usize {
        self.stars.iter().filter(|s| s.is_active()).count()
    }

    pub fn star_index(&self, id: EntityId) -> Option<usize> {
        self.stars.binary_search_by_key(&id, |s| s.body.id).ok()
    }

    pub fn star_mut(&mut self, id: EntityId) -> Option<&mut Star> {
        let i = self.star_index(id)?;
        Some(&mut self.stars[i])
    }

    pub fn hazard_index(&self, id: EntityId) -> Option<usize> {
        self.hazards.binary_search_by_key(&id, |h| h.body.id).ok()
    }

    /// Mutable access to any dynamic body by id
    pub fn body_mut(&mut self, id: EntityId) -> Option<&mut Body> {
        if self.player.body.id == id {
            return Some(&mut self.player.body);
        }
        if let Some(i) = self.star_index(id) {
            return Some(&mut self.stars[i].body);
        }
        let i = self.hazard_index(id)?;
        Some(&mut self.hazards[i].body)
    }

    /// Queued events not yet handled
    pub fn pending_events(&self) -> usize {
        self.events.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::commands::Command;

    fn session() -> (GameSession, CommandBuffer) {
        let mut commands = CommandBuffer::new();
        let session = GameSession::new(RngState::new(42, 0), 1, &mut commands);
        (session, commands)
    }

    #[test]
    fn test_new_session_layout() {
        let (session, _) = session();
        assert_eq!(session.phase, GamePhase::NotStarted);
        assert_eq!(session.score, 0);
        assert_eq!(session.platforms.len(), 4);
        assert_eq!(session.stars.len(), STAR_COUNT);
        assert_eq!(session.active_stars(), STAR_COUNT);
        assert!(session.hazards.is_empty());
        assert_eq!(session.player.body.pos, Vec2::new(100.0, 450.0));
        assert!(session.hud.title && session.hud.instructions);
        assert!(!session.hud.game_over);

        for (slot, star) in session.stars.iter().enumerate() {
            assert_eq!(star.slot, slot);
            assert_eq!(star.body.pos.x, 12.0 + 70.0 * slot as f32);
            assert!((0.4..0.8).contains(&star.body.bounce.y));
        }
    }

    #[test]
    fn test_ids_sorted_and_unique() {
        let (mut session, _) = session();
        // Platforms 1..=4, player 5, stars 6..=17
        assert_eq!(session.player.body.id, EntityId(5));
        assert_eq!(session.stars[0].body.id, EntityId(6));
        assert_eq!(session.stars[11].body.id, EntityId(17));
        assert_eq!(session.id_watermark(), 18);
        assert_eq!(session.next_entity_id(), 18);
        assert!(session.star_mut(EntityId(9)).is_some());
        assert!(session.star_mut(EntityId(5)).is_none());
        assert!(session.body_mut(EntityId(5)).is_some());
        assert!(session.body_mut(EntityId(99)).is_none());
    }

    #[test]
    fn test_scene_registers_contacts() {
        let (_, mut commands) = session();
        let drained = commands.drain();
        assert!(drained.contains(&Command::Physics(PhysicsCommand::AddOverlap {
            a: Group::Player,
            b: Group::Stars,
        })));
        assert!(drained.contains(&Command::Physics(PhysicsCommand::AddCollider {
            a: Group::Player,
            b: Group::Hazards,
            notify: true,
        })));
        let texts = drained
            .iter()
            .filter(|c| matches!(c, Command::Text(TextCommand::Show { .. })))
            .count();
        assert_eq!(texts, 3);
    }

    #[test]
    fn test_hud_hide_idempotent() {
        let (mut session, mut commands) = session();
        commands.drain();
        session.hud.hide(TextId::Title, &mut commands);
        session.hud.hide(TextId::Title, &mut commands);
        session.hud.hide(TextId::Score, &mut commands);
        assert_eq!(commands.len(), 1);
        assert!(!session.hud.is_visible(TextId::Title));
    }

    #[test]
    fn test_same_seed_same_bounces() {
        let (a, _) = session();
        let (b, _) = session();
        let bounces = |s: &GameSession| {
            s.stars
                .iter()
                .map(|st| st.body.bounce.y)
                .collect::<Vec<_>>()
        };
        assert_eq!(bounces(&a), bounces(&b));
    }
}
