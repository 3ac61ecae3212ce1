use clap::Parser;

/// Command-line arguments, read once at startup and immutable thereafter.
#[derive(Debug, Parser)]
#[command(name = "trackline")]
#[command(about = "Stream media player status lines to stdout for status bars")]
pub struct Args {
    /// Increase diagnostic verbosity on stderr (repeat for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Track only the player with this name; all others are ignored
    #[arg(long)]
    pub player: Option<String>,
}
