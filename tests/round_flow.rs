use star_collector::Settings;
use star_collector::sim::{
    Command, EntityId, Game, GamePhase, InputSignal, PhysicsCommand, PhysicsEvent, TextCommand,
    TextId, Touching,
};

fn new_game(seed: u64) -> Game {
    let mut game = Game::new(Settings::default(), seed).unwrap();
    game.drain_commands();
    game
}

fn idle() -> InputSignal {
    InputSignal::default()
}

fn capture(game: &mut Game, slot: usize) {
    let player = game.session().player.body.id;
    let star = game.session().stars[slot].body.id;
    game.push_event(PhysicsEvent::Overlap { player, star });
    game.frame(Some(&idle()));
}

fn creates_hazard(command: &Command) -> bool {
    matches!(
        command,
        Command::Physics(PhysicsCommand::CreateBody {
            kind: star_collector::sim::BodyKind::Hazard,
            ..
        })
    )
}

#[test]
fn eleven_captures_spawn_one_hazard_and_hide_title() {
    let mut game = new_game(3);
    for slot in [4, 0, 11, 7, 2, 9, 1, 10, 5, 3, 8] {
        capture(&mut game, slot);
    }

    assert_eq!(game.session().active_stars(), 1);
    assert_eq!(game.session().hazards.len(), 1);
    assert!(!game.session().hud.title);

    let commands = game.drain_commands();
    assert_eq!(commands.iter().filter(|c| creates_hazard(c)).count(), 1);
    assert!(commands.contains(&Command::Text(TextCommand::Hide { id: TextId::Title })));

    capture(&mut game, 6);
    assert_eq!(game.session().active_stars(), 12);
    assert_eq!(game.session().hazards.len(), 2);
    assert_eq!(game.score(), 120);
    let commands = game.drain_commands();
    assert_eq!(commands.iter().filter(|c| creates_hazard(c)).count(), 1);
    let enables = commands
        .iter()
        .filter(|c| matches!(c, Command::Physics(PhysicsCommand::EnableBody { .. })))
        .count();
    assert_eq!(enables, 12);
}

#[test]
fn second_cycle_spawns_two_more() {
    let mut game = new_game(9);
    for _ in 0..2 {
        for slot in 0..12 {
            capture(&mut game, slot);
        }
    }
    assert_eq!(game.score(), 240);
    assert_eq!(game.session().hazards_spawned, 4);
    // The title is only hidden once
    assert!(!game.session().hud.title);
}

#[test]
fn stomp_between_spawns_leaves_one_hazard() {
    let mut game = new_game(5);
    for slot in 0..11 {
        capture(&mut game, slot);
    }
    let player = game.session().player.body.id;
    let hazard = game.session().hazards[0].body.id;
    game.push_event(PhysicsEvent::Collision {
        player,
        hazard,
        player_touching: Touching::down(),
        hazard_touching: Touching::up(),
    });
    game.frame(Some(&idle()));
    assert_eq!(game.phase(), GamePhase::NotStarted);
    assert!(game.session().hazards.is_empty());

    capture(&mut game, 11);
    assert_eq!(game.session().hazards.len(), 1);
    assert_eq!(game.session().hazards_spawned, 2);
}

#[test]
fn collisions_are_handled_after_overlaps_in_a_frame() {
    let mut game = new_game(11);
    for slot in 0..11 {
        capture(&mut game, slot);
    }
    let player = game.session().player.body.id;
    let hazard = game.session().hazards[0].body.id;
    let last = game.session().stars[11].body.id;

    // Queued collision first, overlap second: the overlap still scores
    game.push_event(PhysicsEvent::Collision {
        player,
        hazard,
        player_touching: Touching::side(),
        hazard_touching: Touching::NONE,
    });
    game.push_event(PhysicsEvent::Overlap { player, star: last });
    game.frame(Some(&idle()));

    assert_eq!(game.score(), 120);
    assert_eq!(game.phase(), GamePhase::GameOver);
}

#[test]
fn full_restart_cycle() {
    let mut game = new_game(21);
    game.frame(Some(&InputSignal {
        left: true,
        ..Default::default()
    }));
    assert_eq!(game.phase(), GamePhase::Playing);

    for slot in 0..12 {
        capture(&mut game, slot);
    }
    let player = game.session().player.body.id;
    let hazard = game.session().hazards[1].body.id;
    game.push_event(PhysicsEvent::Collision {
        player,
        hazard,
        player_touching: Touching::up(),
        hazard_touching: Touching::down(),
    });
    game.frame(Some(&idle()));
    assert_eq!(game.phase(), GamePhase::GameOver);
    assert!(game.session().physics_paused);

    // Idle frames in game over change nothing
    game.drain_commands();
    game.frame(Some(&idle()));
    assert!(game.drain_commands().is_empty());

    game.frame(Some(&InputSignal {
        restart: true,
        ..Default::default()
    }));
    let session = game.session();
    assert_eq!(session.phase, GamePhase::NotStarted);
    assert_eq!(session.score, 0);
    assert_eq!(session.active_stars(), 12);
    assert!(session.hazards.is_empty());
    assert_eq!(session.player.body.pos.x, 100.0);
    assert_eq!(session.player.body.pos.y, 450.0);

    // Old hazard ids are unknown to the new session
    game.push_event(PhysicsEvent::Collision {
        player: game.session().player.body.id,
        hazard,
        player_touching: Touching::side(),
        hazard_touching: Touching::side(),
    });
    game.frame(Some(&idle()));
    assert_eq!(game.phase(), GamePhase::NotStarted);

    // A stale player id is ignored as well
    game.push_event(PhysicsEvent::Overlap {
        player: EntityId(player.0),
        star: game.session().stars[0].body.id,
    });
    game.frame(Some(&idle()));
    assert_eq!(game.score(), 0);
}

#[test]
fn restarted_rounds_use_fresh_rng_stream() {
    let mut game = new_game(77);
    let first: Vec<f32> = game.session().stars.iter().map(|s| s.body.bounce.y).collect();
    let player = game.session().player.body.id;
    for slot in 0..11 {
        capture(&mut game, slot);
    }
    let hazard = game.session().hazards[0].body.id;
    game.push_event(PhysicsEvent::Collision {
        player,
        hazard,
        player_touching: Touching::side(),
        hazard_touching: Touching::side(),
    });
    game.frame(Some(&idle()));
    game.frame(Some(&InputSignal {
        restart: true,
        ..Default::default()
    }));
    let second: Vec<f32> = game.session().stars.iter().map(|s| s.body.bounce.y).collect();
    assert_ne!(first, second);
    assert_eq!(game.session().rng_state.stream, 1);
}
