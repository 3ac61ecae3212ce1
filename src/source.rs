use async_trait::async_trait;
use thiserror::Error;
use tokio::task::JoinHandle;

use crate::types::{PlaybackState, PlayerName, TrackMetadata};

/// Errors that can occur inside a player source
#[derive(Error, Debug)]
pub enum SourceError {
    /// Failed to initialize the source or one of its subscriptions
    #[error("failed to initialize player source: {0}")]
    InitializationFailed(String),

    /// D-Bus communication error
    #[error("D-Bus operation failed: {0}")]
    Dbus(#[from] zbus::Error),
}

/// In-memory state of one tracked player.
///
/// Created by [`PlayerSource::attach`] and owned exclusively by the
/// lifecycle manager until the player vanishes. No two handles for the same
/// name exist at once.
#[derive(Debug)]
pub struct PlayerHandle {
    /// Short player name.
    pub name: PlayerName,

    /// Last observed playback state.
    pub playback: PlaybackState,

    /// Last observed track metadata.
    pub metadata: TrackMetadata,

    /// Handle to the property-monitoring task, aborted on removal.
    pub monitor_handle: Option<JoinHandle<()>>,
}

impl PlayerHandle {
    /// Create a handle from a player's initial state.
    pub fn new(name: PlayerName, playback: PlaybackState, metadata: TrackMetadata) -> Self {
        Self {
            name,
            playback,
            metadata,
            monitor_handle: None,
        }
    }
}

/// Capability that enumerates running media players and attaches to them.
///
/// Change notifications are not part of the trait surface: implementations
/// push [`crate::types::SourceEvent`]s onto the queue whose receiving end is
/// handed to the manager's run loop.
#[async_trait]
pub trait PlayerSource {
    /// Enumerate the players currently known to the source.
    ///
    /// # Errors
    /// Returns an error if the source cannot be queried.
    async fn player_names(&self) -> Result<Vec<PlayerName>, SourceError>;

    /// Attach to a player: read its current state and start monitoring it
    /// for playback and metadata changes.
    ///
    /// # Errors
    /// Returns an error if the player cannot be reached; callers treat this
    /// as the player being absent.
    async fn attach(&self, name: &PlayerName) -> Result<PlayerHandle, SourceError>;
}
