//! Star Collector entry point
//!
//! The browser build is driven through the `wasm` bindings in the library.
//! Natively this runs a scripted headless round against the rules engine and
//! logs what the engine shell would have been told to do.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Star Collector (native) starting...");
    log::info!("Native mode has no renderer; running a headless demo round");

    let settings = match std::env::args().nth(1) {
        Some(path) => match star_collector::Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("{}", e);
                std::process::exit(1);
            }
        },
        None => star_collector::Settings::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    if let Err(e) = demo_round(settings, seed) {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_start in the library
}

/// Collect every star once, stomp the first hazard, then run into the second
/// and restart.
#[cfg(not(target_arch = "wasm32"))]
fn demo_round(
    settings: star_collector::Settings,
    seed: u64,
) -> Result<(), star_collector::SettingsError> {
    use star_collector::sim::{Game, InputSignal, PhysicsEvent, Touching};

    let mut game = Game::new(settings, seed)?;
    let mut issued = Game::preload_commands().len();
    let right = InputSignal {
        right: true,
        ..Default::default()
    };

    let player = game.session().player.body.id;
    let stars: Vec<_> = game.session().stars.iter().map(|s| s.body.id).collect();
    for star in stars {
        game.push_event(PhysicsEvent::Overlap { player, star });
        game.frame(Some(&right));
        issued += game.drain_commands().len();
    }
    log::info!(
        "Collected a full set: score {}, {} hazards spawned",
        game.score(),
        game.session().hazards_spawned
    );

    let hazards: Vec<_> = game.session().hazards.iter().map(|h| h.body.id).collect();
    if let [first, second, ..] = hazards[..] {
        game.push_event(PhysicsEvent::Collision {
            player,
            hazard: first,
            player_touching: Touching::down(),
            hazard_touching: Touching::up(),
        });
        game.push_event(PhysicsEvent::Collision {
            player,
            hazard: second,
            player_touching: Touching::side(),
            hazard_touching: Touching::side(),
        });
        game.frame(Some(&InputSignal::default()));
        issued += game.drain_commands().len();
    }
    log::info!("Phase after contacts: {:?}", game.phase());

    game.frame(Some(&InputSignal {
        restart: true,
        ..Default::default()
    }));
    issued += game.drain_commands().len();

    log::info!(
        "Round {} ready in phase {:?} after {} frames, {} commands issued",
        game.round(),
        game.phase(),
        game.frames(),
        issued
    );
    println!(
        "Demo complete: seed {}, round {}, {} commands issued",
        game.seed(),
        game.round(),
        issued
    );
    Ok(())
}
