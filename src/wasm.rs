//! Browser bindings
//!
//! Lets a JavaScript engine shell (sprites, arcade physics, keyboard) drive
//! the rules engine. Events go in as plain numbers and flags; commands come
//! back out as a JSON array.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::settings::Settings;
use crate::sim::{EntityId, Game, InputSignal, PhysicsEvent, Touching};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Star Collector rules engine loaded");
}

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn touching(up: bool, down: bool, side: bool) -> Touching {
    Touching { up, down, side }
}

/// Game handle exported to JavaScript
#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
    input: Option<InputSignal>,
}

#[wasm_bindgen]
impl WasmGame {
    /// Create a game. `settings_json` may be empty for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(settings_json: &str) -> Result<WasmGame, JsValue> {
        let settings = if settings_json.trim().is_empty() {
            Settings::default()
        } else {
            Settings::from_json(settings_json).map_err(to_js_error)?
        };
        let seed = js_sys::Date::now() as u64;
        Ok(Self {
            game: Game::new(settings, seed).map_err(to_js_error)?,
            input: None,
        })
    }

    /// Asset manifest as JSON
    pub fn preload(&self) -> Result<String, JsValue> {
        serde_json::to_string(&Game::preload_commands()).map_err(to_js_error)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn sync_body(
        &mut self,
        id: u32,
        x: f32,
        y: f32,
        vx: f32,
        vy: f32,
        up: bool,
        down: bool,
        side: bool,
    ) {
        self.game.push_event(PhysicsEvent::BodySync {
            id: EntityId(id),
            pos: Vec2::new(x, y),
            vel: Vec2::new(vx, vy),
            touching: touching(up, down, side),
        });
    }

    pub fn overlap(&mut self, player: u32, star: u32) {
        self.game.push_event(PhysicsEvent::Overlap {
            player: EntityId(player),
            star: EntityId(star),
        });
    }

    #[allow(clippy::too_many_arguments)]
    pub fn collision(
        &mut self,
        player: u32,
        hazard: u32,
        player_up: bool,
        player_down: bool,
        player_side: bool,
        hazard_up: bool,
        hazard_down: bool,
        hazard_side: bool,
    ) {
        self.game.push_event(PhysicsEvent::Collision {
            player: EntityId(player),
            hazard: EntityId(hazard),
            player_touching: touching(player_up, player_down, player_side),
            hazard_touching: touching(hazard_up, hazard_down, hazard_side),
        });
    }

    /// Record the decoded keyboard state. Until this is called once, frames
    /// skip the input step.
    pub fn set_input(&mut self, left: bool, right: bool, up: bool, restart: bool) {
        self.input = Some(InputSignal {
            left,
            right,
            up,
            restart,
        });
    }

    /// Run one frame and return the issued commands as JSON
    pub fn frame(&mut self) -> Result<String, JsValue> {
        self.game.frame(self.input.as_ref());
        serde_json::to_string(&self.game.drain_commands()).map_err(to_js_error)
    }

    pub fn score(&self) -> f64 {
        self.game.score() as f64
    }

    pub fn phase(&self) -> String {
        format!("{:?}", self.game.phase())
    }
}
