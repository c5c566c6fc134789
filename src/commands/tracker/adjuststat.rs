use poise::serenity_prelude as serenity;
use tracing::info;

use super::admin::author_is_admin;
use crate::data::stats::leaderboard::render_player;

/// Nudge one of a player's stats up or down by one (administrators only).
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn adjuststat(
    ctx: poise::Context<'_, crate::Data, crate::Error>,
    #[description = "Player to adjust"] player: serenity::User,
    #[description = "goals, assists, motm or dotm"] stat: String,
    #[description = "increase or decrease"] action: String,
) -> Result<(), crate::Error> {
    if !author_is_admin(ctx).await {
        ctx.say("You do not have permission to adjust stats.").await?;
        return Ok(());
    }

    let result = {
        let mut store = ctx.data().stats.write().await;
        store.adjust_stat_named(player.id.get(), &stat, &action)
    };

    match result {
        Ok(updated) => {
            info!(player = %player.id, stat = %stat, action = %action, by = %ctx.author().id, "stat adjusted");
            let config = &ctx.data().config;
            ctx.say(format!(
                "Updated stats for <@{}>.\n{}",
                player.id,
                render_player(&updated, &config.motm_icon, &config.dotm_icon)
            ))
            .await?;
        }
        Err(e) => {
            ctx.say(e.to_string()).await?;
        }
    }
    Ok(())
}
