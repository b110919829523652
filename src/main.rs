use std::{sync::Arc, time::Duration};

use riftwatch_bot::{DiscordBot, DiscordEventSink};
use riftwatch_poller::ResultPoller;
use riftwatch_riot_api::api::lol::{LolApiClient, LolApiFull};
use riftwatch_shared::traits::EventSink;
use riftwatch_store::{SharedPlayerStore, SnapshotFile};
use tracing::{error, info};

use config::Config;

mod config;
mod logging;

#[tokio::main]
async fn main() {
    logging::init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    info!("🗼 starting Riftwatch");

    let io = Arc::new(SnapshotFile::new(&config.snapshot_path));
    let store = match SharedPlayerStore::load(io).await {
        Ok(store) => store,
        Err(e) => {
            error!("loading the roster snapshot failed: {e}");
            std::process::exit(1);
        }
    };

    let api = Arc::new(LolApiClient::new(config.riot_api_key.clone()));
    api.start_metrics_logging();

    let api_full: Arc<dyn LolApiFull> = api.clone();
    let bot = DiscordBot::new(
        config.discord_token.clone(),
        store.clone(),
        api_full,
        config.required_role,
    )
    .await;

    let sink: Arc<dyn EventSink> =
        Arc::new(DiscordEventSink::new(bot.http(), config.alert_channel));

    ResultPoller::new(
        api,
        store,
        sink,
        Duration::from_secs(config.poll_interval_secs),
        config.loss_alert_user,
    )
    .start();

    if let Err(e) = bot.run().await {
        error!("❌ [DISCORD] client exited: {e}");
        std::process::exit(1);
    }
}
