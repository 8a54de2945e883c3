/// Player configuration
use crate::error::{PlayerError, Result};
use deck_core::AssetTemplate;
use deck_playback::PlayerOptions;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file read from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "deck.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlayerConfig {
    #[serde(default = "default_playback")]
    pub playback: PlaybackSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlaybackSettings {
    #[serde(default = "default_audio_template")]
    pub audio_template: String,

    #[serde(default)]
    pub autoplay: bool,

    /// 1-based slide to open on
    #[serde(default)]
    pub start_slide: Option<usize>,

    /// Host clock resolution
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,

    /// Used for slides whose manifest entry has no duration
    #[serde(default = "default_duration_secs")]
    pub default_duration_secs: f64,
}

impl PlayerConfig {
    /// Load configuration from file and environment
    ///
    /// `path` must exist when given; otherwise `deck.toml` is read if present.
    /// Environment variables prefixed with `DECK_` override both, using `__`
    /// between sections (`DECK_PLAYBACK__TICK_MS=100`).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()).required(true));
            }
            None => {
                let config_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if config_path.exists() {
                    settings = settings.add_source(config::File::from(config_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix("DECK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Parse configuration from TOML text, without environment overrides
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()?;
        Ok(settings.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let playback = &self.playback;

        AssetTemplate::new(playback.audio_template.clone())
            .map_err(|e| PlayerError::Config(e.to_string()))?;

        if playback.tick_ms == 0 {
            return Err(PlayerError::Config(
                "playback.tick_ms must be greater than zero".to_string(),
            ));
        }

        if !playback.default_duration_secs.is_finite() || playback.default_duration_secs < 0.0 {
            return Err(PlayerError::Config(format!(
                "playback.default_duration_secs must be a non-negative number, got {}",
                playback.default_duration_secs
            )));
        }

        if playback.start_slide == Some(0) {
            return Err(PlayerError::Config(
                "playback.start_slide is 1-based".to_string(),
            ));
        }

        Ok(())
    }

    /// Apply command-line overrides; validate afterwards
    pub fn apply_overrides(&mut self, start_slide: Option<usize>, autoplay: bool) {
        if start_slide.is_some() {
            self.playback.start_slide = start_slide;
        }
        if autoplay {
            self.playback.autoplay = true;
        }
    }

    /// Engine options derived from the playback section
    pub fn player_options(&self) -> Result<PlayerOptions> {
        let asset_template = AssetTemplate::new(self.playback.audio_template.clone())
            .map_err(|e| PlayerError::Config(e.to_string()))?;

        Ok(PlayerOptions {
            asset_template,
            autoplay: self.playback.autoplay,
            start_slide: self
                .playback
                .start_slide
                .and_then(|slide| slide.checked_sub(1)),
        })
    }

    pub fn tick(&self) -> Duration {
        Duration::from_millis(self.playback.tick_ms)
    }

    pub fn default_duration(&self) -> Duration {
        Duration::try_from_secs_f64(self.playback.default_duration_secs)
            .unwrap_or(Duration::ZERO)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            playback: default_playback(),
        }
    }
}

// Default values
fn default_playback() -> PlaybackSettings {
    PlaybackSettings {
        audio_template: default_audio_template(),
        autoplay: false,
        start_slide: None,
        tick_ms: default_tick_ms(),
        default_duration_secs: default_duration_secs(),
    }
}

fn default_audio_template() -> String {
    deck_core::asset::DEFAULT_TEMPLATE.to_string()
}

fn default_tick_ms() -> u64 {
    250
}

fn default_duration_secs() -> f64 {
    10.0
}
