use async_trait::async_trait;
use futures::StreamExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, instrument, warn};
use zbus::{Connection, fdo};

use super::proxy::MediaPlayer2PlayerProxy;
use crate::source::{PlayerHandle, PlayerSource, SourceError};
use crate::types::{MPRIS_BUS_PREFIX, PlaybackState, PlayerName, SourceEvent, TrackMetadata};

/// Player source backed by MPRIS on the D-Bus session bus.
///
/// Discovery and per-player monitoring run as background tasks that push
/// typed events onto a single queue; the lifecycle manager is the sole
/// reader, which preserves delivery order across all players.
pub struct MprisPlayerSource {
    connection: Connection,
    events_tx: mpsc::UnboundedSender<SourceEvent>,
    discovery_handle: Option<JoinHandle<()>>,
}

impl MprisPlayerSource {
    /// Connect to the session bus and start player discovery.
    ///
    /// Returns the source together with the receiving end of its event
    /// queue.
    ///
    /// # Errors
    /// Returns `SourceError::InitializationFailed` if the connection or the
    /// `NameOwnerChanged` subscription fails.
    pub async fn connect() -> Result<(Self, mpsc::UnboundedReceiver<SourceEvent>), SourceError> {
        let connection = Connection::session().await.map_err(|e| {
            SourceError::InitializationFailed(format!("D-Bus connection failed: {e}"))
        })?;

        let (events_tx, events_rx) = mpsc::unbounded_channel();
        let discovery_handle = start_discovery(&connection, events_tx.clone()).await?;

        Ok((
            Self {
                connection,
                events_tx,
                discovery_handle: Some(discovery_handle),
            },
            events_rx,
        ))
    }
}

#[async_trait]
impl PlayerSource for MprisPlayerSource {
    async fn player_names(&self) -> Result<Vec<PlayerName>, SourceError> {
        let dbus_proxy = fdo::DBusProxy::new(&self.connection)
            .await
            .map_err(|e| SourceError::InitializationFailed(format!("DBus proxy failed: {e}")))?;

        let names = dbus_proxy
            .list_names()
            .await
            .map_err(|e| SourceError::Dbus(e.into()))?;

        Ok(names
            .iter()
            .filter(|name| name.starts_with(MPRIS_BUS_PREFIX))
            .map(|name| PlayerName::from_bus_name(name))
            .collect())
    }

    async fn attach(&self, name: &PlayerName) -> Result<PlayerHandle, SourceError> {
        let player_proxy = MediaPlayer2PlayerProxy::builder(&self.connection)
            .destination(name.bus_name())
            .map_err(SourceError::Dbus)?
            .build()
            .await
            .map_err(SourceError::Dbus)?;

        let playback = player_proxy
            .playback_status()
            .await
            .map(|status| PlaybackState::from(status.as_str()))
            .unwrap_or(PlaybackState::Unknown);

        let metadata = player_proxy
            .metadata()
            .await
            .map(TrackMetadata::from)
            .unwrap_or_default();

        let mut handle = PlayerHandle::new(name.clone(), playback, metadata);
        handle.monitor_handle = Some(spawn_monitor(
            name.clone(),
            player_proxy,
            self.events_tx.clone(),
        ));

        debug!(player = %name, "attached MPRIS player");
        Ok(handle)
    }
}

impl Drop for MprisPlayerSource {
    fn drop(&mut self) {
        if let Some(handle) = self.discovery_handle.take() {
            handle.abort();
        }
    }
}

/// Watch `NameOwnerChanged` and translate owner changes in the MPRIS
/// namespace into lifecycle events.
#[instrument(skip_all)]
async fn start_discovery(
    connection: &Connection,
    events_tx: mpsc::UnboundedSender<SourceEvent>,
) -> Result<JoinHandle<()>, SourceError> {
    let dbus_proxy = fdo::DBusProxy::new(connection)
        .await
        .map_err(|e| SourceError::InitializationFailed(format!("DBus proxy failed: {e}")))?;

    let mut name_owner_changed = dbus_proxy.receive_name_owner_changed().await.map_err(|e| {
        SourceError::InitializationFailed(format!("signal subscription failed: {e}"))
    })?;

    info!("MPRIS player discovery started");
    Ok(tokio::spawn(async move {
        while let Some(signal) = name_owner_changed.next().await {
            let Ok(args) = signal.args() else {
                continue;
            };

            if !args.name().starts_with(MPRIS_BUS_PREFIX) {
                continue;
            }

            let player = PlayerName::from_bus_name(args.name());
            let event = match (args.old_owner().as_deref(), args.new_owner().as_deref()) {
                (None, Some(_)) => SourceEvent::PlayerAppeared(player),
                (Some(_), None) => SourceEvent::PlayerVanished(player),
                _ => continue,
            };

            if events_tx.send(event).is_err() {
                break;
            }
        }
    }))
}

/// Forward one player's property changes onto the event queue.
///
/// The task ends when either property stream does, which happens when the
/// player leaves the bus; the vanish itself is reported by discovery.
fn spawn_monitor(
    player: PlayerName,
    proxy: MediaPlayer2PlayerProxy<'static>,
    events_tx: mpsc::UnboundedSender<SourceEvent>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut status_changes = proxy.receive_playback_status_changed().await;
        let mut metadata_changes = proxy.receive_metadata_changed().await;

        loop {
            tokio::select! {
                signal = status_changes.next() => match signal {
                    Some(signal) => {
                        let Ok(status) = signal.get().await else {
                            warn!(player = %player, "failed to read playback status change");
                            continue;
                        };
                        let event = SourceEvent::PlaybackChanged {
                            player: player.clone(),
                            state: PlaybackState::from(status.as_str()),
                        };
                        if events_tx.send(event).is_err() {
                            return;
                        }
                    }
                    None => {
                        debug!(player = %player, "playback status updates stopped");
                        return;
                    }
                },
                signal = metadata_changes.next() => match signal {
                    Some(signal) => {
                        let Ok(map) = signal.get().await else {
                            warn!(player = %player, "failed to read metadata change");
                            continue;
                        };
                        let event = SourceEvent::MetadataChanged {
                            player: player.clone(),
                            metadata: TrackMetadata::from(map),
                        };
                        if events_tx.send(event).is_err() {
                            return;
                        }
                    }
                    None => {
                        debug!(player = %player, "metadata updates stopped");
                        return;
                    }
                },
            }
        }
    })
}
