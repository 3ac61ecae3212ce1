use std::collections::HashMap;
use std::future::Future;
use std::io::Write;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::output::OutputSink;
use crate::source::{PlayerHandle, PlayerSource};
use crate::status::{self, StatusRecord};
use crate::types::{PlaybackState, PlayerName, SourceEvent, TrackMetadata};

/// Owns the set of tracked players and drives every emission.
///
/// The manager is the sole consumer of the source's event queue and the
/// only writer to the sink. Each event is processed to completion (state
/// update, format, write, flush) before the next one is examined, so
/// emissions never interleave.
pub struct PlayerLifecycleManager<S, W: Write> {
    source: S,
    sink: OutputSink<W>,
    filter: Option<PlayerName>,
    players: HashMap<PlayerName, PlayerHandle>,
}

impl<S: PlayerSource, W: Write> PlayerLifecycleManager<S, W> {
    /// Create a manager.
    ///
    /// When `filter` is set, every other player is ignored entirely: no
    /// handle is created and none of its change events are processed.
    pub fn new(source: S, sink: OutputSink<W>, filter: Option<PlayerName>) -> Self {
        Self {
            source,
            sink,
            filter,
            players: HashMap::new(),
        }
    }

    /// Names of the currently tracked players.
    pub fn tracked_players(&self) -> Vec<PlayerName> {
        self.players.keys().cloned().collect()
    }

    /// Attach every qualifying player that is already running.
    ///
    /// Players started before this process attaches would otherwise produce
    /// no status line until their next change.
    ///
    /// # Errors
    /// Returns an error if the source cannot enumerate players or the sink
    /// fails.
    pub async fn bootstrap(&mut self) -> Result<()> {
        for name in self.source.player_names().await? {
            self.on_player_appeared(name).await?;
        }
        Ok(())
    }

    /// Process events until `shutdown` resolves or the queue closes.
    ///
    /// A resolved shutdown wins over any queued event and produces the
    /// terminal reset line before returning; nothing is emitted after it.
    ///
    /// # Errors
    /// Returns an error only if the sink fails.
    pub async fn run(
        &mut self,
        mut events: mpsc::UnboundedReceiver<SourceEvent>,
        shutdown: impl Future<Output = ()>,
    ) -> Result<()> {
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;

                () = &mut shutdown => {
                    info!("termination signal received, emitting reset");
                    return self.sink.write_reset();
                }
                event = events.recv() => match event {
                    Some(event) => self.handle_event(event).await?,
                    None => {
                        debug!("event queue closed, stopping");
                        return Ok(());
                    }
                },
            }
        }
    }

    /// Dispatch one source event.
    ///
    /// # Errors
    /// Returns an error only if the sink fails.
    pub async fn handle_event(&mut self, event: SourceEvent) -> Result<()> {
        match event {
            SourceEvent::PlayerAppeared(name) => self.on_player_appeared(name).await,
            SourceEvent::PlayerVanished(name) => self.on_player_vanished(&name),
            SourceEvent::PlaybackChanged { player, state } => {
                self.on_playback_changed(&player, state)
            }
            SourceEvent::MetadataChanged { player, metadata } => {
                self.on_metadata_changed(&player, metadata)
            }
        }
    }

    async fn on_player_appeared(&mut self, name: PlayerName) -> Result<()> {
        if let Some(filter) = &self.filter {
            if *filter != name {
                debug!(player = %name, "player appeared, not the selected one, skipping");
                return Ok(());
            }
        }

        if self.players.contains_key(&name) {
            debug!(player = %name, "player already tracked");
            return Ok(());
        }

        let handle = match self.source.attach(&name).await {
            Ok(handle) => handle,
            Err(error) => {
                warn!(player = %name, %error, "failed to attach player, treating as absent");
                return Ok(());
            }
        };

        debug!(player = %name, "tracking player");
        let record = render(&handle);
        self.players.insert(name, handle);
        self.sink.write_record(&record)
    }

    fn on_player_vanished(&mut self, name: &PlayerName) -> Result<()> {
        if let Some(mut handle) = self.players.remove(name) {
            info!(player = %name, "player vanished");
            if let Some(task) = handle.monitor_handle.take() {
                task.abort();
            }
        }

        // The reset goes out even for names that were never tracked;
        // consumers rely on the blank line to clear their module.
        self.sink.write_reset()
    }

    fn on_playback_changed(&mut self, name: &PlayerName, state: PlaybackState) -> Result<()> {
        let Some(handle) = self.players.get_mut(name) else {
            debug!(player = %name, "playback change for untracked player, ignoring");
            return Ok(());
        };

        handle.playback = state;
        let record = render(handle);
        self.sink.write_record(&record)
    }

    fn on_metadata_changed(&mut self, name: &PlayerName, metadata: TrackMetadata) -> Result<()> {
        let Some(handle) = self.players.get_mut(name) else {
            debug!(player = %name, "metadata change for untracked player, ignoring");
            return Ok(());
        };

        handle.metadata = metadata;
        let record = render(handle);
        self.sink.write_record(&record)
    }
}

/// Render a handle's current state into its status record.
fn render(handle: &PlayerHandle) -> StatusRecord {
    let text = status::format_track(
        handle.metadata.artist.as_deref(),
        handle.metadata.title.as_deref(),
        handle.playback,
    );
    StatusRecord::new(text, &handle.name)
}
