#![allow(missing_docs)]

use std::collections::HashMap;

use zbus::{Result, proxy};

/// MPRIS MediaPlayer2.Player interface proxy
///
/// Only the read-only surface the reporter observes is declared; the
/// reporter never controls players.
#[proxy(
    interface = "org.mpris.MediaPlayer2.Player",
    default_service = "org.mpris.MediaPlayer2",
    default_path = "/org/mpris/MediaPlayer2"
)]
pub trait MediaPlayer2Player {
    /// Current playback status (Playing, Paused, Stopped)
    #[zbus(property)]
    fn playback_status(&self) -> Result<String>;

    /// Current track metadata
    #[zbus(property)]
    fn metadata(&self) -> Result<HashMap<String, zbus::zvariant::OwnedValue>>;
}
