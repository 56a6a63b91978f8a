//! Theme playback driven by scene audio requests.
//!
//! Without the `audio` feature requests are only logged, so the backend builds
//! on machines lacking the native audio libraries.

use firefly_rendering::AudioRequest;

use crate::assets::AssetPaths;

#[cfg(feature = "audio")]
use {
    crate::assets::Asset,
    anyhow::{anyhow, Context},
    firefly_core::AudioCue,
    macroquad::audio::{load_sound_from_bytes, play_sound, stop_sound, PlaySoundParams, Sound},
    std::collections::HashMap,
    tracing::debug,
};

/// Plays and stops the looping themes.
pub(crate) struct AudioPlayer {
    #[cfg(feature = "audio")]
    sounds: HashMap<AudioCue, Asset<Sound>>,
}

#[cfg(feature = "audio")]
impl AudioPlayer {
    pub(crate) async fn load(paths: &AssetPaths) -> Self {
        let mut sounds = HashMap::with_capacity(AudioCue::ALL.len());
        for cue in AudioCue::ALL {
            let path = paths.sound(cue);
            let loaded = match std::fs::read(&path)
                .with_context(|| format!("failed to read sound at {}", path.display()))
            {
                Ok(bytes) => load_sound_from_bytes(&bytes)
                    .await
                    .map_err(|error| anyhow!("failed to decode sound: {error:?}")),
                Err(error) => Err(error),
            };
            let _ = sounds.insert(cue, Asset::from_result(loaded, "sound", &path));
        }

        Self { sounds }
    }

    pub(crate) fn apply(&mut self, request: AudioRequest) {
        let (cue, play) = match request {
            AudioRequest::Play { cue, looped } => (cue, Some(looped)),
            AudioRequest::Stop { cue } => (cue, None),
        };
        let Some(sound) = self.sounds.get(&cue).and_then(Asset::loaded).copied() else {
            debug!(?request, "audio_request_without_sound");
            return;
        };

        match play {
            Some(looped) => play_sound(
                sound,
                PlaySoundParams {
                    looped,
                    volume: 1.0,
                },
            ),
            None => stop_sound(sound),
        }
    }
}

#[cfg(not(feature = "audio"))]
impl AudioPlayer {
    pub(crate) async fn load(paths: &AssetPaths) -> Self {
        tracing::info!(sounds = %paths.sounds.display(), "audio_disabled");
        Self {}
    }

    pub(crate) fn apply(&mut self, request: AudioRequest) {
        tracing::debug!(?request, "audio_request_skipped");
    }
}
