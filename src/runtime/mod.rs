use std::sync::Arc;

use anyhow::Context;
use cadence::app::App;
use cadence::catalog::JamendoClient;
use cadence::player::PlaybackEngine;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use crate::Args;

mod command;
mod event_loop;
mod logging;
mod settings;

#[cfg(test)]
mod tests;

pub async fn run(args: Args) -> anyhow::Result<()> {
    let loaded = settings::load_settings(args.config.clone());
    let settings = loaded.settings;

    if args.print_config {
        print!("{}", settings.to_toml().context("rendering settings")?);
        return Ok(());
    }

    logging::init(args.log.as_deref(), &settings.log.filter);
    if let Some(problem) = loaded.problem {
        warn!("{problem}");
    }
    info!(catalog = %settings.catalog.base_url, "starting cadence");

    let catalog = JamendoClient::new(&settings.catalog).context("building catalog client")?;
    let app = App::new(&settings, catalog);

    let logger = spawn_snapshot_logger(app.engine());
    let result = event_loop::run(&app).await;
    logger.abort();

    info!("cadence stopped");
    result
}

/// Log every playback snapshot the engine publishes.
fn spawn_snapshot_logger(engine: &Arc<PlaybackEngine>) -> JoinHandle<()> {
    let mut rx = engine.subscribe();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let state = rx.borrow_and_update().clone();
            info!(
                status = ?state.status(),
                track = state.current_track.as_ref().map(|t| t.display()).unwrap_or_default(),
                position_ms = state.current_position_ms,
                queue_len = state.queue.len(),
                shuffle = state.is_shuffle_enabled,
                repeat = ?state.repeat_mode,
                quality = ?state.audio_quality,
                crossfade_s = state.crossfade_seconds,
                ai = state.is_ai_mode_enabled,
                "playback state"
            );
        }
    })
}
