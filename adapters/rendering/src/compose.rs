//! Translation of game state and events into scenes.

use firefly_core::{Event, GameStateKind, Speaker, GAME_TITLE};
use firefly_game::{query, Game};
use firefly_system_motion::{EntityPose, GridEntity};

use crate::{
    AudioRequest, BackdropKey, Color, EntityPresentation, LightMask, PlayfieldScene, Portrait,
    Scene, SceneView, SlideScene, TitleScreen, BASE_DARKNESS,
};

const MENU_PROMPT: &str = "Press ENTER to start";
const MENU_HINTS: [&str; 3] = [
    "W/S/A/D - move",
    "ESC - exit to menu",
    "Follow the firefly!",
];
const END_TITLE: &str = "The End";
const SLIDE_PROMPT: &str = "Press 'Enter' to continue";
const PLAYER_PORTRAIT_CELLS: f32 = 8.0;
const GUIDE_PORTRAIT_CELLS: f32 = 3.0;

/// Sizing used when composing scenes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneStyle {
    /// Side length of a single cell in pixels.
    pub cell_size: f32,
}

impl SceneStyle {
    /// Creates a style for the provided cell size.
    #[must_use]
    pub const fn new(cell_size: f32) -> Self {
        Self { cell_size }
    }
}

/// Describes the active game state as a scene without pending audio.
#[must_use]
pub fn compose_scene(game: &Game, style: &SceneStyle) -> Scene {
    let view = match query::state(game) {
        GameStateKind::Menu => Some(menu_view()),
        GameStateKind::Play => play_view(game, style),
        GameStateKind::Slideshow => slide_view(game, style),
        GameStateKind::End => None,
    };

    Scene::new(view.unwrap_or_else(end_view))
}

/// Converts game events into sound requests, preserving their order.
#[must_use]
pub fn audio_requests(events: &[Event]) -> Vec<AudioRequest> {
    events
        .iter()
        .filter_map(|event| match *event {
            Event::AudioStarted { cue, looped } => Some(AudioRequest::Play { cue, looped }),
            Event::AudioStopped { cue } => Some(AudioRequest::Stop { cue }),
            _ => None,
        })
        .collect()
}

fn menu_view() -> SceneView {
    SceneView::Menu(TitleScreen {
        title: GAME_TITLE.to_owned(),
        title_color: Color::from_rgb_u8(255, 255, 0),
        prompt: Some(MENU_PROMPT.to_owned()),
        hints: MENU_HINTS.iter().map(|hint| (*hint).to_owned()).collect(),
        backdrop: BackdropKey::Menu,
    })
}

fn end_view() -> SceneView {
    SceneView::End(TitleScreen {
        title: END_TITLE.to_owned(),
        title_color: Color::from_rgb_u8(255, 255, 255),
        prompt: None,
        hints: Vec::new(),
        backdrop: BackdropKey::End,
    })
}

fn play_view(game: &Game, style: &SceneStyle) -> Option<SceneView> {
    let grid = query::level_grid(game)?;
    let player = query::player(game)?;
    let guide = query::guide(game)?;

    let mut playfield = PlayfieldScene {
        cell_size: style.cell_size,
        walls: grid.walls().iter().copied().collect(),
        floors: grid.floors().iter().copied().collect(),
        player: presentation(player.pose()),
        guide: presentation(guide.pose()),
        darkness: BASE_DARKNESS,
        lights: Vec::new(),
    };
    let player_light = LightMask::player(playfield.cell_center(player.cell()), style.cell_size);
    let guide_light = LightMask::guide(playfield.cell_center(guide.cell()), style.cell_size);
    playfield.lights.extend([player_light, guide_light]);

    Some(SceneView::Play(playfield))
}

fn slide_view(game: &Game, style: &SceneStyle) -> Option<SceneView> {
    let slide = query::slide(game)?;
    let portrait = match slide.speaker {
        Speaker::Player => query::player(game).map(|player| {
            let pose = player.pose();
            Portrait {
                speaker: Speaker::Player,
                frame: pose.frame,
                mirrored: pose.facing.faces_left(),
                size: style.cell_size * PLAYER_PORTRAIT_CELLS,
            }
        }),
        Speaker::Firefly => query::guide(game).map(|guide| Portrait {
            speaker: Speaker::Firefly,
            frame: guide.pose().frame,
            mirrored: false,
            size: style.cell_size * GUIDE_PORTRAIT_CELLS,
        }),
    };

    Some(SceneView::Slideshow(SlideScene {
        speaker_label: format!("{}:", slide.speaker.display_name()),
        text: slide.text.clone(),
        text_color: Color::from(slide.color),
        prompt: SLIDE_PROMPT.to_owned(),
        portrait,
    }))
}

fn presentation(pose: EntityPose) -> EntityPresentation {
    EntityPresentation {
        cell: pose.cell,
        facing: pose.facing,
        frame: pose.frame,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use firefly_core::{AudioCue, CellCoord, Command, Direction, DirectionalInput, Rgb, Slide};
    use firefly_game::{apply, GameConfig, InMemoryLevels};
    use firefly_system_motion::{GuideConfig, PlayerConfig};
    use glam::Vec2;
    use std::time::Duration;

    const LEVEL: [&str; 5] = ["#####", "#Pd #", "# d #", "# F##", "#####"];

    fn game(slides: Vec<Slide>) -> Game {
        let cadence = Duration::from_millis(100);
        let config = GameConfig {
            initial_level: 1,
            total_levels: 1,
            player: PlayerConfig {
                move_cadence: cadence,
                animation_cadence: cadence,
            },
            guide: GuideConfig {
                move_cadence: cadence,
                animation_cadence: cadence,
            },
            slides,
        };
        let levels = InMemoryLevels::new().with_level(1, &LEVEL);
        Game::new(config, Box::new(levels))
    }

    fn send(game: &mut Game, command: Command) -> Vec<Event> {
        let mut events = Vec::new();
        apply(game, command, &mut events).expect("command applies");
        events
    }

    #[test]
    fn menu_scene_shows_title_and_hints() {
        let scene = compose_scene(&game(Vec::new()), &SceneStyle::new(32.0));

        let SceneView::Menu(title) = scene.view else {
            panic!("expected menu scene");
        };
        assert_eq!(title.title, "Firefly");
        assert_eq!(title.prompt.as_deref(), Some(MENU_PROMPT));
        assert_eq!(title.hints.len(), 3);
        assert!(scene.audio.is_empty());
    }

    #[test]
    fn play_scene_lights_player_and_guide() {
        let mut game = game(Vec::new());
        let _ = send(&mut game, Command::Confirm);

        let scene = compose_scene(&game, &SceneStyle::new(32.0));

        let SceneView::Play(playfield) = scene.view else {
            panic!("expected play scene");
        };
        assert_eq!(playfield.player.cell, CellCoord::new(1, 1));
        assert_eq!(playfield.guide.cell, CellCoord::new(2, 1));
        assert_eq!(playfield.lights.len(), 2);
        assert_eq!(playfield.lights[0].center, Vec2::new(48.0, 48.0));
        assert_eq!(playfield.lights[1].radius, 112.0);
        assert_eq!(playfield.walls.len() + playfield.floors.len(), 25);
    }

    #[test]
    fn slide_scene_shows_speaker_portrait() {
        let slides = vec![Slide::new(Speaker::Player, "Hello?", Rgb::new(200, 10, 10))];
        let mut game = game(slides);
        let _ = send(&mut game, Command::Confirm);
        for direction in [
            DirectionalInput::toward(Direction::East),
            DirectionalInput::toward(Direction::South),
            DirectionalInput::toward(Direction::South),
        ] {
            let _ = send(
                &mut game,
                Command::Tick {
                    dt: Duration::from_millis(100),
                    input: direction,
                },
            );
        }

        let scene = compose_scene(&game, &SceneStyle::new(32.0));

        let SceneView::Slideshow(slide) = scene.view else {
            panic!("expected slideshow scene");
        };
        assert_eq!(slide.speaker_label, "Player:");
        assert_eq!(slide.text_color, Color::from_rgb_u8(200, 10, 10));
        let portrait = slide.portrait.expect("player portrait");
        assert_eq!(portrait.size, 256.0);
        assert!(!portrait.mirrored);
    }

    #[test]
    fn audio_events_become_requests_in_order() {
        let mut game = game(Vec::new());
        let _ = send(&mut game, Command::Boot);
        let events = send(&mut game, Command::Confirm);

        assert_eq!(
            audio_requests(&events),
            vec![
                AudioRequest::Stop {
                    cue: AudioCue::MenuTheme
                },
                AudioRequest::Play {
                    cue: AudioCue::GameTheme,
                    looped: true
                },
            ]
        );
    }
}
