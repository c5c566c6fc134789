use poise::serenity_prelude as serenity;
use tracing::{debug, info, warn};

use crate::config::BotConfig;
use crate::data::stats::leaderboard::{split_report, RenderOptions, MESSAGE_LIMIT};
use crate::data::stats::player_stat::PlayerId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublishOutcome {
    Posted,
    GuildUnavailable,
    RoleNotFound,
    ChannelNotFound,
}

impl PublishOutcome {
    /// Text to show the user when nothing could be posted.
    pub fn user_message(&self) -> Option<&'static str> {
        match self {
            PublishOutcome::Posted => None,
            PublishOutcome::GuildUnavailable => Some("Server data isn't available yet, try again in a moment."),
            PublishOutcome::RoleNotFound => Some("Role not found!"),
            PublishOutcome::ChannelNotFound => Some("Stats channel not found!"),
        }
    }
}

/// Renders the leaderboard for the tracked role and posts it in the stats channel,
/// replacing this bot's previous reports there. Old reports are only removed once
/// the new one is fully posted.
pub async fn publish_tracker(
    ctx: &serenity::Context,
    data: &crate::Data,
    guild_id: serenity::GuildId,
    include_group_notification: bool,
) -> Result<PublishOutcome, crate::Error> {
    let config = &data.config;
    let scope = match tracked_scope(ctx, guild_id, config) {
        Ok(scope) => scope,
        Err(outcome) => {
            warn!(guild = %guild_id, ?outcome, "cannot publish stats tracker");
            return Ok(outcome);
        }
    };

    // One report at a time, so concurrent triggers can't delete each other's posts.
    let _publishing = data.publish_lock.lock().await;

    let stale = previous_reports(ctx, config.stats_channel, config.cleanup_window).await;

    let report = {
        let store = data.stats.read().await;
        store
            .build_leaderboard(&scope, config.leaderboard_style)
            .render(&RenderOptions {
                motm_icon: &config.motm_icon,
                dotm_icon: &config.dotm_icon,
                date: chrono::Local::now().date_naive(),
                group_mention: include_group_notification.then(|| config.tracked_role.get()),
            })
    };

    let chunks = split_report(&report, MESSAGE_LIMIT);
    for chunk in &chunks {
        config.stats_channel.say(&ctx.http, chunk).await?;
    }
    info!(
        guild = %guild_id,
        players = scope.len(),
        messages = chunks.len(),
        ping = include_group_notification,
        "stats tracker posted"
    );

    for msg in &stale {
        if let Err(e) = msg.delete(ctx).await {
            debug!(message = %msg.id, error = %e, "failed to delete previous stats report");
        }
    }
    Ok(PublishOutcome::Posted)
}

/// Members holding the tracked role, ordered by user id.
fn tracked_scope(
    ctx: &serenity::Context,
    guild_id: serenity::GuildId,
    config: &BotConfig,
) -> Result<Vec<PlayerId>, PublishOutcome> {
    let Some(guild) = ctx.cache.guild(guild_id) else {
        return Err(PublishOutcome::GuildUnavailable);
    };
    if !guild.roles.contains_key(&config.tracked_role) {
        return Err(PublishOutcome::RoleNotFound);
    }
    if !guild.channels.contains_key(&config.stats_channel) {
        return Err(PublishOutcome::ChannelNotFound);
    }
    let mut ids: Vec<PlayerId> = guild
        .members
        .values()
        .filter(|m| m.roles.contains(&config.tracked_role))
        .map(|m| m.user.id.get())
        .collect();
    ids.sort_unstable();
    Ok(ids)
}

/// This bot's messages among the last `window` in `channel`. Best-effort: a failed
/// fetch is logged and yields nothing.
async fn previous_reports(
    ctx: &serenity::Context,
    channel: serenity::ChannelId,
    window: u8,
) -> Vec<serenity::Message> {
    if window == 0 {
        return Vec::new();
    }
    let bot_id = ctx.cache.current_user().id;
    match channel
        .messages(ctx, serenity::GetMessages::new().limit(window))
        .await
    {
        Ok(messages) => messages.into_iter().filter(|m| m.author.id == bot_id).collect(),
        Err(e) => {
            warn!(channel = %channel, error = %e, "failed to fetch recent stats messages");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_failures_produce_user_messages() {
        assert_eq!(PublishOutcome::Posted.user_message(), None);
        assert_eq!(PublishOutcome::RoleNotFound.user_message(), Some("Role not found!"));
        assert_eq!(PublishOutcome::ChannelNotFound.user_message(), Some("Stats channel not found!"));
        assert!(PublishOutcome::GuildUnavailable.user_message().is_some());
    }
}
