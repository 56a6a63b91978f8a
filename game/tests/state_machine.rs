use std::time::Duration;

use firefly_core::{
    AudioCue, CellCoord, Command, Direction, DirectionalInput, Event, GameStateKind, Rgb, Slide,
    Speaker,
};
use firefly_game::{apply, query, Game, GameConfig, GameError, InMemoryLevels};
use firefly_system_motion::{GridEntity, GuideConfig, PlayerConfig};

const STEP: Duration = Duration::from_millis(100);

// The guide walks (2,1) -> (2,2) -> (2,3); the player reaches (2,3) by
// stepping east then south twice.
const LEVEL: [&str; 5] = ["#####", "#Pd #", "# d #", "# F##", "#####"];

fn config(total_levels: u32, slides: Vec<Slide>) -> GameConfig {
    GameConfig {
        initial_level: 1,
        total_levels,
        player: PlayerConfig {
            move_cadence: STEP,
            animation_cadence: STEP,
        },
        guide: GuideConfig {
            move_cadence: STEP,
            animation_cadence: STEP,
        },
        slides,
    }
}

fn slides(count: usize) -> Vec<Slide> {
    (0..count)
        .map(|index| {
            Slide::new(
                Speaker::Firefly,
                format!("line {index}"),
                Rgb::new(255, 255, 255),
            )
        })
        .collect()
}

fn campaign(levels: u32) -> InMemoryLevels {
    (1..=levels).fold(InMemoryLevels::new(), |source, level| source.with_level(level, &LEVEL))
}

fn game(total_levels: u32, slide_count: usize) -> Game {
    Game::new(
        config(total_levels, slides(slide_count)),
        Box::new(campaign(total_levels)),
    )
}

fn send(game: &mut Game, command: Command) -> Vec<Event> {
    let mut events = Vec::new();
    apply(game, command, &mut events).expect("command applies");
    events
}

fn tick(game: &mut Game, direction: Option<Direction>) -> Vec<Event> {
    let input = direction.map_or(DirectionalInput::IDLE, DirectionalInput::toward);
    send(game, Command::Tick { dt: STEP, input })
}

fn walk_to_exit(game: &mut Game) -> Vec<Event> {
    let mut events = Vec::new();
    for direction in [Direction::East, Direction::South, Direction::South] {
        events.extend(tick(game, Some(direction)));
    }
    events
}

#[test]
fn boot_starts_menu_theme_once() {
    let mut game = game(1, 0);

    let first = send(&mut game, Command::Boot);
    let second = send(&mut game, Command::Boot);

    assert_eq!(
        first,
        vec![Event::AudioStarted {
            cue: AudioCue::MenuTheme,
            looped: true
        }]
    );
    assert!(second.is_empty());
    assert_eq!(query::state(&game), GameStateKind::Menu);
}

#[test]
fn confirm_on_menu_enters_fresh_level() {
    let mut game = game(3, 0);
    let _ = send(&mut game, Command::Boot);

    let events = send(&mut game, Command::Confirm);

    assert_eq!(
        events,
        vec![
            Event::StateChanged {
                from: GameStateKind::Menu,
                to: GameStateKind::Play
            },
            Event::LevelStarted { level: 1 },
            Event::AudioStopped {
                cue: AudioCue::MenuTheme
            },
            Event::AudioStarted {
                cue: AudioCue::GameTheme,
                looped: true
            },
        ]
    );
    let player = query::player(&game).expect("player during play");
    assert_eq!(player.cell(), CellCoord::new(1, 1));
    let guide = query::guide(&game).expect("guide during play");
    assert_eq!(guide.cell(), CellCoord::new(2, 1));
}

#[test]
fn finishing_a_level_loads_the_next_one() {
    let mut game = game(2, 0);
    let _ = send(&mut game, Command::Confirm);

    let events = walk_to_exit(&mut game);

    assert!(events.contains(&Event::LevelCompleted { level: 1 }));
    assert!(events.contains(&Event::LevelStarted { level: 2 }));
    assert!(
        !events.iter().any(|event| matches!(event, Event::AudioStopped { .. })),
        "gameplay theme keeps playing between levels"
    );
    assert_eq!(query::state(&game), GameStateKind::Play);
    let player = query::player(&game).expect("player during play");
    assert_eq!(player.cell(), CellCoord::new(1, 1), "player respawns");
}

#[test]
fn finishing_final_level_enters_slideshow() {
    let mut game = game(1, 2);
    let _ = send(&mut game, Command::Confirm);

    let events = walk_to_exit(&mut game);

    assert!(events.contains(&Event::AudioStopped {
        cue: AudioCue::GameTheme
    }));
    assert!(events.contains(&Event::StateChanged {
        from: GameStateKind::Play,
        to: GameStateKind::Slideshow
    }));
    assert!(events.contains(&Event::SlideShown { index: 0 }));
    assert_eq!(
        events
            .iter()
            .filter(|event| matches!(event, Event::StateChanged { .. }))
            .count(),
        1,
        "the final transition happens exactly once"
    );
    let text = query::slide(&game).map(|slide| slide.text.as_str());
    assert_eq!(text, Some("line 0"));
    assert!(query::player(&game).is_some(), "portraits keep the player");

    let _ = tick(&mut game, None);
    assert_eq!(query::state(&game), GameStateKind::Slideshow);
}

#[test]
fn finishing_final_level_without_slides_ends_the_game() {
    let mut game = game(1, 0);
    let _ = send(&mut game, Command::Confirm);

    let events = walk_to_exit(&mut game);

    assert!(events.contains(&Event::StateChanged {
        from: GameStateKind::Play,
        to: GameStateKind::End
    }));
    assert_eq!(query::state(&game), GameStateKind::End);
}

#[test]
fn confirm_walks_through_slides_then_ends() {
    let mut game = game(1, 2);
    let _ = send(&mut game, Command::Confirm);
    let _ = walk_to_exit(&mut game);

    assert_eq!(
        send(&mut game, Command::Confirm),
        vec![Event::SlideShown { index: 1 }]
    );
    assert_eq!(
        send(&mut game, Command::Confirm),
        vec![Event::StateChanged {
            from: GameStateKind::Slideshow,
            to: GameStateKind::End
        }]
    );
    assert!(query::player(&game).is_none());
}

#[test]
fn cancel_during_play_returns_to_menu_and_keeps_level() {
    let mut game = game(2, 0);
    let _ = send(&mut game, Command::Boot);
    let _ = send(&mut game, Command::Confirm);
    let events = walk_to_exit(&mut game);
    assert!(events.contains(&Event::LevelStarted { level: 2 }));

    let events = send(&mut game, Command::Cancel);

    assert_eq!(
        events,
        vec![
            Event::StateChanged {
                from: GameStateKind::Play,
                to: GameStateKind::Menu
            },
            Event::AudioStopped {
                cue: AudioCue::GameTheme
            },
            Event::AudioStarted {
                cue: AudioCue::MenuTheme,
                looped: true
            },
        ]
    );
    assert!(query::level_grid(&game).is_none());

    let events = send(&mut game, Command::Confirm);
    assert!(events.contains(&Event::LevelStarted { level: 2 }));
}

#[test]
fn cancel_on_end_screen_terminates() {
    let mut game = game(1, 0);
    let _ = send(&mut game, Command::Confirm);
    let _ = walk_to_exit(&mut game);

    let events = send(&mut game, Command::Cancel);

    assert_eq!(events, vec![Event::Terminated]);
    assert!(!query::is_running(&game));
}

#[test]
fn quit_stops_audio_and_ignores_later_commands() {
    let mut game = game(1, 0);
    let _ = send(&mut game, Command::Boot);

    let events = send(&mut game, Command::Quit);
    assert_eq!(
        events,
        vec![
            Event::AudioStopped {
                cue: AudioCue::MenuTheme
            },
            Event::Terminated,
        ]
    );

    assert!(send(&mut game, Command::Confirm).is_empty());
    assert!(send(&mut game, Command::Quit).is_empty());
    assert_eq!(query::state(&game), GameStateKind::Menu);
}

#[test]
fn commands_outside_their_state_are_ignored() {
    let mut game = game(1, 0);

    assert!(send(&mut game, Command::Cancel).is_empty());
    let events = tick(&mut game, Some(Direction::East));
    assert_eq!(events, vec![Event::TimeAdvanced { dt: STEP }]);
    assert_eq!(query::state(&game), GameStateKind::Menu);
}

#[test]
fn malformed_level_keeps_menu_state() {
    let source = InMemoryLevels::new().with_level(1, &["#####", "#   #", "#####"]);
    let mut game = Game::new(config(1, Vec::new()), Box::new(source));
    let mut events = Vec::new();

    let error = apply(&mut game, Command::Confirm, &mut events).expect_err("no spawn");

    assert!(matches!(error, GameError::Level { level: 1, .. }));
    assert!(events.is_empty());
    assert_eq!(query::state(&game), GameStateKind::Menu);
}

#[test]
fn missing_next_level_returns_to_menu_once() {
    let source = InMemoryLevels::new().with_level(1, &LEVEL);
    let mut game = Game::new(config(2, Vec::new()), Box::new(source));
    let _ = send(&mut game, Command::Confirm);
    let _ = tick(&mut game, Some(Direction::East));
    let _ = tick(&mut game, Some(Direction::South));

    let mut events = Vec::new();
    let error = apply(
        &mut game,
        Command::Tick {
            dt: STEP,
            input: DirectionalInput::toward(Direction::South),
        },
        &mut events,
    )
    .expect_err("level 2 is missing");

    assert!(matches!(error, GameError::Load(_)));
    assert!(events.contains(&Event::StateChanged {
        from: GameStateKind::Play,
        to: GameStateKind::Menu
    }));
    assert!(!events.contains(&Event::LevelCompleted { level: 1 }));
    assert_eq!(query::state(&game), GameStateKind::Menu);

    let events = tick(&mut game, None);
    assert_eq!(events, vec![Event::TimeAdvanced { dt: STEP }]);

    let events = send(&mut game, Command::Confirm);
    assert!(events.contains(&Event::LevelStarted { level: 1 }));
}

#[test]
fn untraceable_level_never_completes() {
    let source = InMemoryLevels::new().with_level(1, &["#####", "#P  #", "#  F#", "#####"]);
    let mut game = Game::new(config(1, Vec::new()), Box::new(source));
    let _ = send(&mut game, Command::Confirm);

    for direction in [Direction::East, Direction::East, Direction::South] {
        let _ = tick(&mut game, Some(direction));
    }

    let player = query::player(&game).expect("player during play");
    assert_eq!(player.cell(), CellCoord::new(3, 2), "player is on the exit");
    assert_eq!(query::state(&game), GameStateKind::Play);
}

#[test]
fn quit_during_play_stops_gameplay_theme() {
    let mut game = game(1, 0);
    let _ = send(&mut game, Command::Boot);
    let _ = send(&mut game, Command::Confirm);

    let events = send(&mut game, Command::Quit);

    assert_eq!(
        events,
        vec![
            Event::AudioStopped {
                cue: AudioCue::GameTheme
            },
            Event::Terminated,
        ]
    );
    assert!(!query::is_running(&game));
    assert!(tick(&mut game, Some(Direction::East)).is_empty());
}

#[test]
fn cancel_during_slideshow_is_ignored() {
    let mut game = game(1, 2);
    let _ = send(&mut game, Command::Confirm);
    let _ = walk_to_exit(&mut game);

    assert!(send(&mut game, Command::Cancel).is_empty());
    assert_eq!(query::state(&game), GameStateKind::Slideshow);
    assert_eq!(query::slide_index(&game), Some(0));
    assert!(query::is_running(&game));
}
