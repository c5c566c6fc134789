use tracing::info;

use super::admin::author_is_admin;
use crate::handlers::tracker::publish_tracker;

/// Reset every player's stats to zero (administrators only).
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn resetstats(
    ctx: poise::Context<'_, crate::Data, crate::Error>,
) -> Result<(), crate::Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say("This command can only be used in a server.").await?;
        return Ok(());
    };
    if !author_is_admin(ctx).await {
        ctx.say("You do not have permission to reset stats.").await?;
        return Ok(());
    }

    let players = {
        let mut store = ctx.data().stats.write().await;
        store.reset_all();
        store.len()
    };
    info!(players, by = %ctx.author().id, "stats reset");

    let outcome = publish_tracker(ctx.serenity_context(), ctx.data(), guild_id, true).await?;
    if let Some(msg) = outcome.user_message() {
        ctx.say(msg).await?;
    }
    ctx.say("✅ All stats have been reset to 0.").await?;
    Ok(())
}
