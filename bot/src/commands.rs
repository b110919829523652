//! Slash command implementations used by the Discord bot.

use std::collections::BTreeMap;

use poise::serenity_prelude::Mention;
use riftwatch_riot_api::types::Fetched;
use riftwatch_shared::{Region, TrackedAccount};
use riftwatch_store::StoreError;
use tracing::{debug, error, info};

use super::{serenity, Context, Error};

/// Error message shown when a command is used outside of a guild context.
const GUILD_ONLY_ERR: &str = "❌ This command can only be used inside a guild.";

/// Return the [`serenity::GuildId`] of the context or notify the user if the
/// command was run outside a guild.
async fn require_guild(ctx: &Context<'_>) -> Option<serenity::GuildId> {
    match ctx.guild_id() {
        Some(id) => Some(id),
        None => {
            let _ = ctx.say(GUILD_ONLY_ERR).await;
            None
        }
    }
}

fn enter_command_log(command_name: &str) {
    info!("/{} invoked", command_name)
}

/// Registration gate: when a required role is configured, the target member
/// must carry it.
async fn authorize(
    ctx: &Context<'_>,
    guild_id: serenity::GuildId,
    target: &serenity::User,
) -> Result<bool, Error> {
    let Some(role_id) = ctx.data().required_role else {
        return Ok(true);
    };
    let member = guild_id.member(ctx, target.id).await?;
    Ok(member.roles.contains(&role_id))
}

/// Register a League of Legends account and start tracking its results.
#[poise::command(slash_command, category = "Tracking", ephemeral)]
pub async fn register(
    ctx: Context<'_>,
    #[description = "Riot ID, e.g. Name#TAG"] riot_id: String,
    region: Region,
    #[description = "Register on behalf of another user."] user: Option<serenity::User>,
) -> Result<(), Error> {
    enter_command_log("register");

    let Some(guild_id) = require_guild(&ctx).await else {
        return Ok(());
    };
    let target = user.unwrap_or_else(|| ctx.author().clone());

    if !authorize(&ctx, guild_id, &target).await? {
        ctx.say(format!(
            "❌ {} is missing the role required to register accounts.",
            Mention::User(target.id)
        ))
        .await?;
        return Ok(());
    }

    let Some((game_name, tag_line)) = riot_id.split_once('#') else {
        ctx.say("❌ Invalid Riot ID format, expected `Name#TAG`.").await?;
        return Ok(());
    };

    debug!("[CMD] resolving PUUID for {}#{}", game_name, tag_line);
    let account = match ctx
        .data()
        .api
        .get_account_by_riot_id(game_name, tag_line, region)
        .await
    {
        Ok(Fetched::Found(account)) => account,
        Ok(Fetched::NotFound) => {
            ctx.say(format!("❌ Account **{}** not found.", riot_id)).await?;
            return Ok(());
        }
        Err(e) => {
            error!("Riot API error while resolving account: {e}");
            ctx.say("❌ Internal Error: Couldn't reach the Riot API.").await?;
            return Ok(());
        }
    };

    debug!("[CMD] resolving summoner for {}", account.puuid);
    let summoner = match ctx
        .data()
        .api
        .get_summoner_by_puuid(&account.puuid, region)
        .await
    {
        Ok(Fetched::Found(summoner)) => summoner,
        Ok(Fetched::NotFound) => {
            ctx.say(format!("❌ No summoner found for **{}** in that region.", riot_id))
                .await?;
            return Ok(());
        }
        Err(e) => {
            error!("Riot API error while resolving summoner: {e}");
            ctx.say("❌ Internal Error: Couldn't reach the Riot API.").await?;
            return Ok(());
        }
    };

    // Baseline snapshot: current ranks and latest match id, so the first
    // poll tick only reacts to genuinely new results.
    let rank_entries = match ctx
        .data()
        .api
        .get_rank_entries(&summoner.id, region)
        .await
    {
        Ok(fetched) => fetched.found().unwrap_or_default(),
        Err(e) => {
            error!("Riot API error while fetching rank entries: {e}");
            BTreeMap::new()
        }
    };
    let last_match_id = match ctx
        .data()
        .api
        .get_latest_match_id(&account.puuid, region)
        .await
    {
        Ok(fetched) => fetched.found().flatten(),
        Err(e) => {
            error!("Riot API error while fetching the latest match id: {e}");
            None
        }
    };

    let tracked = TrackedAccount {
        game_name: game_name.to_string(),
        tag_line: tag_line.to_string(),
        region,
        puuid: account.puuid,
        summoner_id: summoner.id,
        last_match_id,
        rank_entries,
        streaks: BTreeMap::new(),
        last_queue: None,
    };

    match ctx.data().store.register(target.id, tracked).await {
        Ok(()) => {
            ctx.say(format!(
                "🎉 {} is now registered with Riot ID: **{}**",
                Mention::User(target.id),
                riot_id
            ))
            .await?;
        }
        Err(StoreError::AlreadyTracked { riot_id }) => {
            ctx.say(format!(
                "❌ {} is already registered with Riot ID: **{}**",
                Mention::User(target.id),
                riot_id
            ))
            .await?;
        }
        Err(e) => {
            error!("store error while registering: {e}");
            ctx.say("❌ Internal Error: Something went wrong while saving the roster.")
                .await?;
        }
    }
    Ok(())
}

/// Unregister a League of Legends account and stop tracking it.
#[poise::command(slash_command, category = "Tracking", ephemeral)]
pub async fn unregister(
    ctx: Context<'_>,
    #[description = "Riot ID, e.g. Name#TAG"] riot_id: String,
    #[description = "Unregister on behalf of another user."] user: Option<serenity::User>,
) -> Result<(), Error> {
    enter_command_log("unregister");

    if require_guild(&ctx).await.is_none() {
        return Ok(());
    }
    let target = user.unwrap_or_else(|| ctx.author().clone());

    match ctx.data().store.unregister(target.id, &riot_id).await {
        Ok(_) => {
            ctx.say(format!(
                "🗑️ {} has been unregistered from Riot ID: **{}**",
                Mention::User(target.id),
                riot_id
            ))
            .await?;
        }
        Err(StoreError::NotTracked { .. }) => {
            ctx.say(format!(
                "❌ {} is not registered with Riot ID: **{}**",
                Mention::User(target.id),
                riot_id
            ))
            .await?;
        }
        Err(e) => {
            error!("store error while unregistering: {e}");
            ctx.say("❌ Internal Error: Something went wrong while saving the roster.")
                .await?;
        }
    }
    Ok(())
}

/// Display rank information for a user.
#[poise::command(slash_command, category = "Tracking", ephemeral)]
pub async fn rank(ctx: Context<'_>, user: Option<serenity::User>) -> Result<(), Error> {
    enter_command_log("rank");

    let target = user.unwrap_or_else(|| ctx.author().clone());

    let Some(accounts) = ctx.data().store.accounts_of(target.id).await else {
        ctx.say(format!(
            "❌ User {} is not registered with the bot.",
            Mention::User(target.id)
        ))
        .await?;
        return Ok(());
    };

    let mut lines = Vec::new();
    for (riot_id, account) in &accounts {
        for (queue, entry) in &account.rank_entries {
            lines.push(format!("Riot ID: **{}** - {}: {}", riot_id, queue, entry));
        }
    }

    let response = if lines.is_empty() {
        format!(
            "No rank information found for {}.",
            Mention::User(target.id)
        )
    } else {
        format!(
            "Ranks for {}:\n{}",
            Mention::User(target.id),
            lines.join("\n")
        )
    };

    ctx.say(response).await?;
    Ok(())
}

/// Display champion mastery levels for a user.
#[poise::command(slash_command, category = "Tracking", ephemeral)]
pub async fn mastery(
    ctx: Context<'_>,
    user: serenity::User,
    #[description = "Champion display name, e.g. Aatrox"] champion_name: String,
) -> Result<(), Error> {
    enter_command_log("mastery");

    let Some(accounts) = ctx.data().store.accounts_of(user.id).await else {
        ctx.say(format!(
            "❌ User {} is not registered with the bot.",
            Mention::User(user.id)
        ))
        .await?;
        return Ok(());
    };

    let champion_id = match ctx.data().api.get_champion_id(&champion_name).await {
        Ok(Fetched::Found(Some(id))) => id,
        Ok(Fetched::Found(None)) | Ok(Fetched::NotFound) => {
            ctx.say(format!("❌ Invalid champion name: {}", champion_name))
                .await?;
            return Ok(());
        }
        Err(e) => {
            error!("ddragon error while resolving champion: {e}");
            ctx.say("❌ Internal Error: Couldn't fetch the champion catalog.")
                .await?;
            return Ok(());
        }
    };

    let mut lines = Vec::new();
    for (riot_id, account) in &accounts {
        match ctx
            .data()
            .api
            .get_mastery(&account.puuid, champion_id, account.region)
            .await
        {
            Ok(Fetched::Found(mastery)) => lines.push(format!(
                "**{}**: Level {}, {} points",
                riot_id, mastery.champion_level, mastery.champion_points
            )),
            Ok(Fetched::NotFound) => lines.push(format!("**{}**: Not found", riot_id)),
            Err(e) => {
                error!("Riot API error while fetching mastery for {riot_id}: {e}");
                lines.push(format!("**{}**: Couldn't fetch mastery", riot_id));
            }
        }
    }

    ctx.say(format!(
        "Mastery of **{}** for {}:\n{}",
        champion_name,
        Mention::User(user.id),
        lines.join("\n")
    ))
    .await?;
    Ok(())
}

/// Get a link to U.GG builds for a champion.
#[poise::command(slash_command, category = "Tracking", ephemeral)]
pub async fn build(
    ctx: Context<'_>,
    #[description = "Champion display name, e.g. Aatrox"] champion_name: String,
) -> Result<(), Error> {
    enter_command_log("build");

    let champion_name = champion_name.to_lowercase();
    let url = format!("https://u.gg/lol/champions/{}/build?rank=diamond_plus", champion_name);
    ctx.say(format!(
        "Here's the build for {} on U.GG: {}",
        capitalize(&champion_name),
        url
    ))
    .await?;
    Ok(())
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
