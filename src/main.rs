//! Trackline daemon - watches MPRIS players and streams status lines.

use clap::Parser;
use tracing::debug;

use trackline::{
    cli::Args, manager::PlayerLifecycleManager, mpris::MprisPlayerSource, output::OutputSink,
    shutdown::ShutdownSignal, tracing_config, types::PlayerName,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    tracing_config::init(args.verbose)?;
    debug!(?args, "parsed command line arguments");

    let shutdown = ShutdownSignal::install()?;
    let (source, events) = MprisPlayerSource::connect().await?;

    let filter = args.player.map(PlayerName::new);
    let mut manager = PlayerLifecycleManager::new(source, OutputSink::stdout(), filter);

    manager.bootstrap().await?;
    manager.run(events, shutdown.wait()).await?;

    Ok(())
}
