use std::path::PathBuf;

use firefly_core::{Command, Event, GameStateKind};
use firefly_game::{apply, preflight, query, DirectoryLevels, Game, GameConfig, LevelSource};
use firefly_settings::Settings;

fn shipped_levels() -> DirectoryLevels {
    DirectoryLevels::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../levels"))
}

#[test]
fn shipped_campaign_passes_preflight() {
    let settings = Settings::default();
    preflight(
        &shipped_levels(),
        settings.game.initial_level,
        settings.game.total_levels,
    )
    .expect("every shipped level parses");
}

#[test]
fn every_shipped_level_has_a_traceable_guide_path() {
    for level in 1..=Settings::default().game.total_levels {
        let rows = shipped_levels().load(level).expect("level file exists");
        let grid = firefly_level::LevelGrid::parse(&rows).expect("level parses");
        let path = grid.guide_path();

        assert!(!path.is_empty(), "level {level} has no guide path");
        assert_eq!(path.last().copied(), grid.guide_end(), "level {level}");
        assert_eq!(
            path[0].manhattan_distance(grid.player_spawn()),
            1,
            "level {level} path must start next to the spawn"
        );
    }
}

#[test]
fn first_shipped_level_starts_from_menu() {
    let settings = Settings::default();
    let config = GameConfig::from_settings(&settings);
    let mut game = Game::new(config, Box::new(shipped_levels()));
    let mut events = Vec::new();

    apply(&mut game, Command::Confirm, &mut events).expect("level 1 loads");

    assert_eq!(query::state(&game), GameStateKind::Play);
    assert!(events.contains(&Event::LevelStarted { level: 1 }));
}
