//! Per-frame update and frame driver
//!
//! [`Game`] owns the current [`GameSession`] and the outgoing command buffer.
//! Each call to [`Game::frame`] first handles the physics events queued since
//! the previous frame, then applies the frame's input.

use super::body::PhysicsBody;
use super::commands::{
    self, AnimKey, Command, CommandBuffer, PhysicsCommand, RenderCommand, TextCommand, TextId,
};
use super::events::{Direction, InputSignal, PhysicsEvent};
use super::rules::{handle_hazard_collision, handle_star_overlap};
use super::state::{GamePhase, GameSession, RngState};
use crate::settings::{Settings, SettingsError};

/// What the frame driver must do after an update
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    /// Restart was requested from game over
    Restart,
}

/// Apply one frame of input to the session
pub fn update(
    session: &mut GameSession,
    settings: &Settings,
    input: &InputSignal,
    commands: &mut CommandBuffer,
) -> FrameOutcome {
    // Only the restart key is read once the round is over
    if session.phase == GamePhase::GameOver {
        if input.restart {
            return FrameOutcome::Restart;
        }
        return FrameOutcome::Continue;
    }

    let was_started = session.started;

    match input.direction() {
        Direction::Left => {
            commands.set_velocity_x(&mut session.player.body, -settings.run_speed);
            play_animation(session, AnimKey::Left, commands);
            mark_started(session);
        }
        Direction::Right => {
            commands.set_velocity_x(&mut session.player.body, settings.run_speed);
            play_animation(session, AnimKey::Right, commands);
            mark_started(session);
        }
        Direction::Neither => {
            commands.set_velocity_x(&mut session.player.body, 0.0);
            play_animation(session, AnimKey::Turn, commands);
        }
    }

    if input.up && session.player.body.touching().down {
        commands.set_velocity_y(&mut session.player.body, -settings.jump_impulse);
    }

    // By default the instructions go away one frame after the first move
    let hide = if settings.hide_instructions_immediately {
        session.started
    } else {
        was_started
    };
    if hide {
        session.hud.hide(TextId::Instructions, commands);
    }

    FrameOutcome::Continue
}

fn play_animation(session: &mut GameSession, key: AnimKey, commands: &mut CommandBuffer) {
    if session.player.anim == key {
        return;
    }
    session.player.anim = key;
    commands.render(RenderCommand::PlayAnimation {
        id: session.player.body.id,
        key,
    });
}

fn mark_started(session: &mut GameSession) {
    session.started = true;
    if session.phase == GamePhase::NotStarted {
        session.phase = GamePhase::Playing;
        log::info!("Round started");
    }
}

/// Apply one queued physics event
pub fn dispatch_event(
    session: &mut GameSession,
    settings: &Settings,
    event: PhysicsEvent,
    commands: &mut CommandBuffer,
) {
    match event {
        PhysicsEvent::BodySync {
            id,
            pos,
            vel,
            touching,
        } => match session.body_mut(id) {
            Some(body) => body.sync(pos, vel, touching),
            None => log::debug!("Ignoring sync for unknown body {:?}", id),
        },
        PhysicsEvent::Overlap { player, star } => {
            handle_star_overlap(session, settings, player, star, commands);
        }
        PhysicsEvent::Collision {
            player,
            hazard,
            player_touching,
            hazard_touching,
        } => {
            handle_hazard_collision(
                session,
                player,
                hazard,
                player_touching,
                hazard_touching,
                commands,
            );
        }
    }
}

/// The rules engine as driven by an engine shell
#[derive(Debug)]
pub struct Game {
    settings: Settings,
    seed: u64,
    /// Rounds played, the current one included
    round: u64,
    frames: u64,
    session: GameSession,
    commands: CommandBuffer,
}

impl Game {
    /// Create a game and its first session. `fallback_seed` is used when the
    /// settings carry no seed. Out-of-range settings are rejected.
    pub fn new(settings: Settings, fallback_seed: u64) -> Result<Self, SettingsError> {
        settings.validate()?;
        let seed = settings.seed_or(fallback_seed);
        let mut commands = CommandBuffer::new();
        let session = GameSession::new(RngState::new(seed, 0), 1, &mut commands);
        log::info!("Game created with seed {}", seed);
        Ok(Self {
            settings,
            seed,
            round: 1,
            frames: 0,
            session,
            commands,
        })
    }

    /// Asset loads the shell performs before the first frame
    pub fn preload_commands() -> Vec<Command> {
        commands::preload_commands()
    }

    /// Queue a physics notification for the next frame
    pub fn push_event(&mut self, event: PhysicsEvent) {
        self.session.events.push(event);
    }

    /// Run one frame. Queued events are handled in order (body syncs,
    /// overlaps, collisions), then the input is applied. With no input yet
    /// available the update step is skipped.
    pub fn frame(&mut self, input: Option<&InputSignal>) {
        self.frames += 1;

        for event in self.session.events.drain() {
            dispatch_event(&mut self.session, &self.settings, event, &mut self.commands);
        }

        let Some(input) = input else {
            return;
        };

        if update(&mut self.session, &self.settings, input, &mut self.commands)
            == FrameOutcome::Restart
        {
            self.restart();
        }
    }

    /// Throw the current session away and build a new one
    fn restart(&mut self) {
        log::info!(
            "Restarting after round {} (score {})",
            self.round,
            self.session.score
        );

        for id in [
            TextId::Title,
            TextId::Instructions,
            TextId::GameOver,
            TextId::Restart,
            TextId::Score,
        ] {
            if self.session.hud.is_visible(id) {
                self.commands.text(TextCommand::Hide { id });
            }
        }
        self.commands.physics(PhysicsCommand::ResetWorld);
        self.commands.render(RenderCommand::ClearScene);
        self.commands.physics(PhysicsCommand::Resume);

        let first_id = self.session.id_watermark();
        let rng_state = RngState::new(self.seed, self.round);
        self.round += 1;
        self.session = GameSession::new(rng_state, first_id, &mut self.commands);
    }

    /// Take every command issued since the last drain
    pub fn drain_commands(&mut self) -> Vec<Command> {
        self.commands.drain()
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn phase(&self) -> GamePhase {
        self.session.phase
    }

    pub fn score(&self) -> u64 {
        self.session.score
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn round(&self) -> u64 {
        self.round
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// JSON snapshot of the current session for debugging tools
    pub fn snapshot_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.session)
    }
}
