use std::sync::Arc;

use poise::serenity_prelude as serenity;
use riftwatch_riot_api::api::lol::LolApiFull;
use riftwatch_store::SharedPlayerStore;
use serenity::{Client, ClientBuilder, GatewayIntents, Http, RoleId};
use tracing::{error, info};

use commands::{build, mastery, rank, register, unregister};
use handler::event_handler;

pub use alert_sink::{DiscordEventSink, MessageSender};

mod alert_sink;
mod commands;
mod handler;

// Types used by all command functions
type Error = Box<dyn std::error::Error + Send + Sync>;
type Context<'a> = poise::Context<'a, Data, Error>;

// Custom user data passed to all command functions
#[derive(Debug)]
pub struct Data {
    store: SharedPlayerStore,
    api: Arc<dyn LolApiFull>,
    /// Role a member must carry to be registered, if configured.
    required_role: Option<RoleId>,
}

pub struct DiscordBot {
    pub client: Client,
}

impl DiscordBot {
    pub async fn new(
        token: String,
        store: SharedPlayerStore,
        api: Arc<dyn LolApiFull>,
        required_role: Option<RoleId>,
    ) -> Self {
        let intents = GatewayIntents::non_privileged();
        let framework = poise::Framework::builder()
            .options(poise::FrameworkOptions {
                commands: vec![register(), unregister(), rank(), mastery(), build()],
                event_handler: |ctx, event, framework, _| {
                    Box::pin(event_handler(ctx, event, framework))
                },
                ..Default::default()
            })
            .setup(move |ctx, _ready, framework| {
                Box::pin(async move {
                    poise::builtins::register_globally(ctx, &framework.options().commands).await?;
                    Ok(Data {
                        store,
                        api,
                        required_role,
                    })
                })
            })
            .build();
        let client_builder = ClientBuilder::new(token, intents).framework(framework);

        info!("🤖 [DISCORD] initializing bot");
        let client = client_builder
            .await
            .expect("Discord client creation should success.");

        Self { client }
    }

    /// Http handle usable by senders constructed before the gateway connects.
    pub fn http(&self) -> Arc<Http> {
        self.client.http.clone()
    }

    pub fn start(self) -> tokio::task::JoinHandle<Result<(), serenity::Error>> {
        tokio::spawn(async move { self.run().await })
    }

    pub async fn run(mut self) -> Result<(), serenity::Error> {
        info!("🌐 [DISCORD] connecting to gateway");
        if let Err(why) = self.client.start().await {
            error!("❌ [DISCORD] connection failed: {why:?}");
            return Err(why);
        }

        Ok(())
    }
}
