use serde::Serialize;

use crate::types::{PlaybackState, PlayerName};

/// Fallback text when a player exposes neither artist nor title.
pub const NO_TRACK_INFO: &str = "No Track Info";

/// One status emission, serialized as a single JSON line.
///
/// Produced per emission and discarded immediately after writing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRecord {
    /// Display text for the bar module.
    pub text: String,

    /// CSS class derived from the emitting player (`custom-<name>`).
    pub class: String,

    /// Raw player name, unmodified.
    pub alt: String,
}

impl StatusRecord {
    /// Build a record for `player` around already-formatted display text.
    pub fn new(text: String, player: &PlayerName) -> Self {
        Self {
            text,
            class: format!("custom-{player}"),
            alt: player.to_string(),
        }
    }
}

/// Format a player's current track into its display text.
///
/// Empty strings count as absent. Any state but
/// [`PlaybackState::Playing`] prepends a single space, which consumers
/// match to render their paused glyph; the marker must stay exactly one
/// space for compatibility.
pub fn format_track(
    artist: Option<&str>,
    title: Option<&str>,
    playback: PlaybackState,
) -> String {
    let artist = artist.filter(|artist| !artist.is_empty());
    let title = title.filter(|title| !title.is_empty());

    let text = match (artist, title) {
        (Some(artist), Some(title)) => format!("{artist} - {title}"),
        (None, Some(title)) => title.to_string(),
        _ => NO_TRACK_INFO.to_string(),
    };

    if playback == PlaybackState::Playing {
        text
    } else {
        format!(" {text}")
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn artist_and_title_join_with_dash() {
        assert_eq!(
            format_track(Some("Alice"), Some("Song X"), PlaybackState::Playing),
            "Alice - Song X"
        );
    }

    #[test]
    fn empty_artist_falls_back_to_title() {
        assert_eq!(
            format_track(Some(""), Some("Song X"), PlaybackState::Paused),
            " Song X"
        );
    }

    #[test]
    fn missing_track_info_uses_fallback_text() {
        assert_eq!(
            format_track(None, None, PlaybackState::Stopped),
            " No Track Info"
        );
        assert_eq!(
            format_track(Some("Alice"), None, PlaybackState::Playing),
            "No Track Info"
        );
    }

    #[test]
    fn only_playing_state_skips_the_marker_space() {
        for state in [
            PlaybackState::Paused,
            PlaybackState::Stopped,
            PlaybackState::Unknown,
        ] {
            assert_eq!(format_track(Some("A"), Some("T"), state), " A - T");
        }
        assert_eq!(
            format_track(Some("A"), Some("T"), PlaybackState::Playing),
            "A - T"
        );
    }

    #[test]
    fn record_derives_class_and_alt_from_player() {
        let record = StatusRecord::new("x".to_string(), &PlayerName::new("mpv"));
        assert_eq!(record.class, "custom-mpv");
        assert_eq!(record.alt, "mpv");
    }

    #[test]
    fn record_serializes_fields_in_consumer_order() {
        let record = StatusRecord::new(
            "Radiohead - Karma Police".to_string(),
            &PlayerName::new("mpv"),
        );
        assert_eq!(
            serde_json::to_string(&record).unwrap(),
            r#"{"text":"Radiohead - Karma Police","class":"custom-mpv","alt":"mpv"}"#
        );
    }
}
