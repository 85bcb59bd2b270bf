//! Commands issued to the engine shell
//!
//! The rules engine never touches rendering or physics resources directly.
//! It records what should happen in a [`CommandBuffer`] and the shell drains
//! and applies the commands after each frame.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::body::{BodyKind, EntityId, PhysicsBody};
use crate::consts::*;

/// Collision groups the physics collaborator tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Group {
    Player,
    Platforms,
    Stars,
    Hazards,
}

/// Named animation clips on the player spritesheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimKey {
    Left,
    Turn,
    Right,
}

impl AnimKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimKey::Left => "left",
            AnimKey::Turn => "turn",
            AnimKey::Right => "right",
        }
    }

    /// Inclusive spritesheet frame range
    pub fn frames(&self) -> (u32, u32) {
        match self {
            AnimKey::Left => (0, 3),
            AnimKey::Turn => (4, 4),
            AnimKey::Right => (5, 8),
        }
    }

    pub fn frame_rate(&self) -> u32 {
        match self {
            AnimKey::Turn => 20,
            _ => 10,
        }
    }

    /// Running clips loop, the idle pose is a single frame
    pub fn looping(&self) -> bool {
        !matches!(self, AnimKey::Turn)
    }
}

/// HUD text elements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextId {
    Title,
    Instructions,
    Score,
    GameOver,
    Restart,
}

impl TextId {
    /// Top-left screen position
    pub fn position(&self) -> Vec2 {
        match self {
            TextId::Title => Vec2::new(140.0, 55.0),
            TextId::Instructions => Vec2::new(188.0, 130.0),
            TextId::Score => Vec2::new(16.0, 16.0),
            TextId::GameOver => Vec2::new(240.0, 55.0),
            TextId::Restart => Vec2::new(212.0, 130.0),
        }
    }

    /// Font size in pixels
    pub fn font_size(&self) -> u32 {
        match self {
            TextId::Title => 64,
            TextId::GameOver => 58,
            TextId::Score => 32,
            TextId::Instructions | TextId::Restart => 28,
        }
    }
}

pub const TITLE_TEXT: &str = "STAR COLLECTOR";
pub const INSTRUCTIONS_TEXT: &str = "Press an arrow key to move";
pub const GAME_OVER_TEXT: &str = "GAME OVER";
pub const RESTART_TEXT: &str = "Press space to restart";
pub const TEXT_COLOR: &str = "#fff";

/// Score display string
pub fn score_text(score: u64) -> String {
    format!("Score: {}", score)
}

/// Commands for the physics simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum PhysicsCommand {
    CreateBody {
        id: EntityId,
        kind: BodyKind,
        group: Group,
        pos: Vec2,
        scale: f32,
    },
    DestroyBody {
        id: EntityId,
    },
    /// Remove from simulation and hide, keeping the body for reuse
    DisableBody {
        id: EntityId,
    },
    /// Reset to `pos` and show again
    EnableBody {
        id: EntityId,
        pos: Vec2,
    },
    /// Axes left as `None` keep their current velocity
    SetVelocity {
        id: EntityId,
        x: Option<f32>,
        y: Option<f32>,
    },
    SetBounce {
        id: EntityId,
        x: f32,
        y: f32,
    },
    SetCollideWorldBounds {
        id: EntityId,
        enabled: bool,
    },
    /// Solid contact between two groups. With `notify` set the shell reports
    /// each contact back as a collision event.
    AddCollider {
        a: Group,
        b: Group,
        notify: bool,
    },
    /// Pass-through contact, reported back as overlap events
    AddOverlap {
        a: Group,
        b: Group,
    },
    Pause,
    Resume,
    /// Tear down every body, collider and overlap registration
    ResetWorld,
}

/// Commands for sprites, images and animation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum RenderCommand {
    LoadImage {
        key: String,
        path: String,
    },
    LoadSpritesheet {
        key: String,
        path: String,
        frame_width: u32,
        frame_height: u32,
    },
    AddImage {
        key: String,
        pos: Vec2,
    },
    DefineAnimation {
        key: AnimKey,
        sheet: String,
        first_frame: u32,
        last_frame: u32,
        frame_rate: u32,
        looping: bool,
    },
    PlayAnimation {
        id: EntityId,
        key: AnimKey,
    },
    SetTint {
        id: EntityId,
        color: u32,
    },
    /// Destroy every sprite and image
    ClearScene,
}

/// Commands for the text presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op")]
pub enum TextCommand {
    Show {
        id: TextId,
        content: String,
        pos: Vec2,
        font_size: u32,
        color: String,
    },
    Set {
        id: TextId,
        content: String,
    },
    Hide {
        id: TextId,
    },
}

/// Any command, routed by collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target", content = "command")]
pub enum Command {
    Physics(PhysicsCommand),
    Render(RenderCommand),
    Text(TextCommand),
}

/// Outbox of commands produced during a frame
#[derive(Debug, Default)]
pub struct CommandBuffer {
    commands: Vec<Command>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn physics(&mut self, command: PhysicsCommand) {
        self.commands.push(Command::Physics(command));
    }

    pub fn render(&mut self, command: RenderCommand) {
        self.commands.push(Command::Render(command));
    }

    pub fn text(&mut self, command: TextCommand) {
        self.commands.push(Command::Text(command));
    }

    /// Take all buffered commands in issue order
    pub fn drain(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    // --- Body helpers: update the mirror and record the matching command ---

    pub fn set_velocity_x(&mut self, body: &mut impl PhysicsBody, vx: f32) {
        if body.velocity().x == vx {
            return;
        }
        body.set_velocity_x(vx);
        self.physics(PhysicsCommand::SetVelocity {
            id: body.id(),
            x: Some(vx),
            y: None,
        });
    }

    pub fn set_velocity_y(&mut self, body: &mut impl PhysicsBody, vy: f32) {
        body.set_velocity_y(vy);
        self.physics(PhysicsCommand::SetVelocity {
            id: body.id(),
            x: None,
            y: Some(vy),
        });
    }

    pub fn disable(&mut self, body: &mut impl PhysicsBody) {
        body.set_enabled(false);
        self.physics(PhysicsCommand::DisableBody { id: body.id() });
    }

    pub fn enable_at(&mut self, body: &mut impl PhysicsBody, pos: Vec2) {
        body.set_enabled(true);
        body.set_position(pos);
        body.set_velocity_x(0.0);
        body.set_velocity_y(0.0);
        self.physics(PhysicsCommand::EnableBody { id: body.id(), pos });
    }

    pub fn destroy(&mut self, body: &impl PhysicsBody) {
        self.physics(PhysicsCommand::DestroyBody { id: body.id() });
    }

    // --- Text helpers ---

    pub fn show_text(&mut self, id: TextId, content: &str) {
        self.text(TextCommand::Show {
            id,
            content: content.to_string(),
            pos: id.position(),
            font_size: id.font_size(),
            color: TEXT_COLOR.to_string(),
        });
    }
}

/// Asset manifest the shell must load before the first session starts
pub fn preload_commands() -> Vec<Command> {
    let image = |key: &str| {
        Command::Render(RenderCommand::LoadImage {
            key: key.to_string(),
            path: format!("assets/{}.png", asset_file(key)),
        })
    };
    vec![
        image(SKY_KEY),
        image(GROUND_KEY),
        image(STAR_KEY),
        image(HAZARD_KEY),
        Command::Render(RenderCommand::LoadSpritesheet {
            key: PLAYER_KEY.to_string(),
            path: format!("assets/{}.png", PLAYER_KEY),
            frame_width: PLAYER_FRAME_SIZE.0,
            frame_height: PLAYER_FRAME_SIZE.1,
        }),
    ]
}

/// The ground texture ships as `platform.png`
fn asset_file(key: &str) -> &str {
    if key == GROUND_KEY { "platform" } else { key }
}
