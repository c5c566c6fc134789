use poise::serenity_prelude as serenity;

use crate::data::stats::leaderboard::render_player;

/// Show one player's goals, assists and awards.
#[poise::command(slash_command, prefix_command)]
pub async fn playerstats(
    ctx: poise::Context<'_, crate::Data, crate::Error>,
    #[description = "Player to look up"] player: serenity::User,
) -> Result<(), crate::Error> {
    let stat = ctx.data().stats.read().await.get(player.id.get()).copied();
    let config = &ctx.data().config;
    match stat {
        Some(stat) => {
            ctx.say(render_player(&stat, &config.motm_icon, &config.dotm_icon)).await?;
        }
        None => {
            ctx.say(format!("No stats recorded for <@{}> yet.", player.id)).await?;
        }
    }
    Ok(())
}
