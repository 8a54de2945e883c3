/// Player error types
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PlayerError>;

#[derive(Debug, Error)]
pub enum PlayerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Deck error: {0}")]
    Deck(#[from] deck_core::DeckError),

    #[error("Playback error: {0}")]
    Playback(#[from] deck_playback::PlaybackError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for PlayerError {
    fn from(err: config::ConfigError) -> Self {
        PlayerError::Config(err.to_string())
    }
}
