use crate::handlers::tracker::publish_tracker;

/// Post the current stats tracker without pinging the team.
#[poise::command(slash_command, prefix_command, guild_only)]
pub async fn statstracker(
    ctx: poise::Context<'_, crate::Data, crate::Error>,
) -> Result<(), crate::Error> {
    let Some(guild_id) = ctx.guild_id() else {
        ctx.say("This command can only be used in a server.").await?;
        return Ok(());
    };

    let outcome = publish_tracker(ctx.serenity_context(), ctx.data(), guild_id, false).await?;
    match outcome.user_message() {
        Some(msg) => {
            ctx.say(msg).await?;
        }
        None => {
            // Slash invocations need a response; prefix ones just see the new report.
            if let poise::Context::Application(_) = ctx {
                ctx.send(
                    poise::CreateReply::default()
                        .content(format!("Stats tracker posted in <#{}>.", ctx.data().config.stats_channel))
                        .ephemeral(true),
                )
                .await?;
            }
        }
    }
    Ok(())
}
