use std::collections::HashMap;
use std::fmt;

use zbus::zvariant::OwnedValue;

/// Bus-name prefix shared by every MPRIS player on the session bus.
pub const MPRIS_BUS_PREFIX: &str = "org.mpris.MediaPlayer2.";

/// Short identifier of a media player (the bus-name suffix, e.g. `spotify`
/// or `firefox.instance_1_240`).
///
/// The short form is what consumers see in the `class`/`alt` record fields
/// and what the startup filter matches against, exactly.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlayerName(String);

impl PlayerName {
    /// Create a name from its short form.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Create a name from a full D-Bus bus name, stripping the MPRIS prefix.
    pub fn from_bus_name(bus_name: &str) -> Self {
        Self(
            bus_name
                .strip_prefix(MPRIS_BUS_PREFIX)
                .unwrap_or(bus_name)
                .to_string(),
        )
    }

    /// The short player name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The full D-Bus bus name for this player.
    pub fn bus_name(&self) -> String {
        format!("{MPRIS_BUS_PREFIX}{}", self.0)
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Current playback state of a media player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    /// Player is currently playing
    Playing,

    /// Player is paused
    Paused,

    /// Player is stopped
    Stopped,

    /// Player reported a status this crate does not recognize
    Unknown,
}

impl From<&str> for PlaybackState {
    fn from(status: &str) -> Self {
        match status {
            "Playing" => Self::Playing,
            "Paused" => Self::Paused,
            "Stopped" => Self::Stopped,
            _ => Self::Unknown,
        }
    }
}

/// Metadata of the track a player is currently on.
///
/// Only the fields the status line renders are kept. Absent or empty fields
/// stay `None`; the formatter's fallback chain handles them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    /// Track artist(s), multiple artists joined with `", "`.
    pub artist: Option<String>,

    /// Track title.
    pub title: Option<String>,
}

impl From<HashMap<String, OwnedValue>> for TrackMetadata {
    fn from(metadata: HashMap<String, OwnedValue>) -> Self {
        let mut track = Self::default();

        if let Some(title) = metadata.get("xesam:title") {
            if let Ok(title) = String::try_from(title.clone()) {
                if !title.is_empty() {
                    track.title = Some(title);
                }
            }
        }

        if let Some(artist) = metadata.get("xesam:artist") {
            if let Ok(array) = <&zbus::zvariant::Array>::try_from(artist) {
                let artists: Vec<String> = array
                    .iter()
                    .filter_map(|artist| {
                        if let Ok(s) = artist.downcast_ref::<String>() {
                            Some(s.clone())
                        } else if let Ok(s) = artist.downcast_ref::<&str>() {
                            Some(s.to_string())
                        } else {
                            None
                        }
                    })
                    .collect();
                if !artists.is_empty() {
                    track.artist = Some(artists.join(", "));
                }
            } else if let Ok(artist) = String::try_from(artist.clone()) {
                if !artist.is_empty() {
                    track.artist = Some(artist);
                }
            }
        }

        track
    }
}

/// Events a player source pushes onto the manager's queue.
///
/// The queue has exactly one consumer, so events are handled strictly in
/// delivery order.
#[derive(Debug, Clone)]
pub enum SourceEvent {
    /// A player appeared on the bus.
    PlayerAppeared(PlayerName),

    /// A player vanished from the bus.
    PlayerVanished(PlayerName),

    /// An attached player's playback status changed.
    PlaybackChanged {
        /// Player whose status changed.
        player: PlayerName,
        /// New playback state.
        state: PlaybackState,
    },

    /// An attached player's track metadata changed.
    MetadataChanged {
        /// Player whose metadata changed.
        player: PlayerName,
        /// New track metadata.
        metadata: TrackMetadata,
    },
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use zbus::zvariant::Value;

    use super::*;

    #[test]
    fn player_name_round_trips_through_bus_name() {
        let name = PlayerName::from_bus_name("org.mpris.MediaPlayer2.spotify");
        assert_eq!(name.as_str(), "spotify");
        assert_eq!(name.bus_name(), "org.mpris.MediaPlayer2.spotify");
    }

    #[test]
    fn player_name_keeps_instance_suffix() {
        let name = PlayerName::from_bus_name("org.mpris.MediaPlayer2.firefox.instance_1_240");
        assert_eq!(name.as_str(), "firefox.instance_1_240");
    }

    #[test]
    fn playback_state_parses_known_statuses() {
        assert_eq!(PlaybackState::from("Playing"), PlaybackState::Playing);
        assert_eq!(PlaybackState::from("Paused"), PlaybackState::Paused);
        assert_eq!(PlaybackState::from("Stopped"), PlaybackState::Stopped);
        assert_eq!(PlaybackState::from("Buffering"), PlaybackState::Unknown);
    }

    #[test]
    fn metadata_joins_artist_array_and_reads_title() {
        let mut map = HashMap::new();
        map.insert(
            "xesam:title".to_string(),
            OwnedValue::try_from(Value::from("Karma Police")).unwrap(),
        );
        map.insert(
            "xesam:artist".to_string(),
            OwnedValue::try_from(Value::from(vec!["Radiohead", "Thom Yorke"])).unwrap(),
        );

        let metadata = TrackMetadata::from(map);
        assert_eq!(metadata.title.as_deref(), Some("Karma Police"));
        assert_eq!(metadata.artist.as_deref(), Some("Radiohead, Thom Yorke"));
    }

    #[test]
    fn metadata_treats_empty_strings_as_absent() {
        let mut map = HashMap::new();
        map.insert(
            "xesam:title".to_string(),
            OwnedValue::try_from(Value::from("")).unwrap(),
        );

        let metadata = TrackMetadata::from(map);
        assert_eq!(metadata.title, None);
        assert_eq!(metadata.artist, None);
    }

    #[test]
    fn metadata_defaults_to_absent_fields() {
        let metadata = TrackMetadata::from(HashMap::new());
        assert_eq!(metadata.title, None);
        assert_eq!(metadata.artist, None);
    }
}
