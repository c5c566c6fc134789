use poise::serenity_prelude as serenity;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::tracker::publish_tracker;
use crate::data::results::parser::parse_result_message;

pub async fn handle_event<'a>(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'a, crate::Data, crate::Error>,
    data: &crate::Data,
) -> Result<(), crate::Error> {
    match event {
        serenity::FullEvent::Ready { data_about_bot, .. } => {
            let banner = startup_banner(
                &data_about_bot.user.name,
                data.started_at.elapsed(),
                data.commands_check_duration,
                &data.command_statuses,
            );
            info!("\n{}", banner);
        }
        serenity::FullEvent::Message { new_message } => {
            handle_result_message(ctx, new_message, data).await?;
        }
        _ => {}
    }
    Ok(())
}

/// Human messages in the results channel are parsed, folded into the store,
/// and followed by a fresh tracker that pings the team.
async fn handle_result_message(
    ctx: &serenity::Context,
    message: &serenity::Message,
    data: &crate::Data,
) -> Result<(), crate::Error> {
    if message.author.bot || message.channel_id != data.config.results_channel {
        return Ok(());
    }
    let Some(guild_id) = message.guild_id else {
        return Ok(());
    };

    let events = parse_result_message(&message.content);
    if events.is_empty() {
        debug!(message = %message.id, "no result lines recognised");
    } else {
        data.stats.write().await.apply_events(&events);
        info!(message = %message.id, author = %message.author.id, events = events.len(), "result message applied");
    }

    let outcome = publish_tracker(ctx, data, guild_id, true).await?;
    if let Some(text) = outcome.user_message() {
        if let Err(e) = message.reply(ctx, text).await {
            warn!(error = %e, "failed to report tracker problem");
        }
    }
    Ok(())
}

fn fmt_dur(d: Duration) -> String {
    if d.as_secs() >= 1 {
        format!("{:.3}s", d.as_secs_f64())
    } else {
        format!("{:.3}ms", d.as_secs_f64() * 1000.0)
    }
}

/// Boxed summary of startup timings and command registration.
pub fn startup_banner(
    bot_name: &str,
    startup_duration: Duration,
    commands_check: Duration,
    statuses: &[crate::CommandStatus],
) -> String {
    let mut name_w = "Name".len();
    let mut status_w = "Status".len();
    for s in statuses {
        name_w = name_w.max(s.name.len());
        status_w = status_w.max(s.status.len());
    }

    let title = format!("Bot Ready: {}", bot_name);
    let meta_left = format!("Startup time: {}", fmt_dur(startup_duration));
    let meta_right = format!("Commands check: {}", fmt_dur(commands_check));
    let meta_w = meta_left.len().max(meta_right.len());

    let table_width = 2 + name_w + 3 + status_w + 2; // | name | status |
    let header_width = title.len().max(meta_w).max(table_width).max(30);
    let hline = format!("+{}+", "=".repeat(header_width));
    let sline = format!("+{}+", "-".repeat(header_width));
    let table_hline = format!("+-{}-+-{}-+", "-".repeat(name_w), "-".repeat(status_w));
    let row = |name: &str, status: &str| {
        format!("| {:<name_w$} | {:<status_w$} |", name, status, name_w = name_w, status_w = status_w)
    };

    let mut lines = vec![
        hline.clone(),
        format!("|{:<width$}|", title, width = header_width),
        sline.clone(),
        format!("|{:<width$}|", meta_left, width = header_width),
        format!("|{:<width$}|", meta_right, width = header_width),
        format!("|{:<width$}|", format!("Commands loaded: {}", statuses.len()), width = header_width),
        sline,
        table_hline.clone(),
        row("Name", "Status"),
        table_hline.clone(),
    ];
    if statuses.is_empty() {
        lines.push(row("(no commands)", "-"));
    } else {
        lines.extend(statuses.iter().map(|s| row(&s.name, &s.status)));
    }
    lines.push(table_hline);
    lines.push(hline);
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CommandStatus;

    #[test]
    fn banner_lists_every_command() {
        let statuses = vec![
            CommandStatus { name: "statstracker".to_string(), status: "Registered".to_string() },
            CommandStatus { name: "resetstats".to_string(), status: "Registered".to_string() },
        ];
        let banner = startup_banner("tracker", Duration::from_millis(1500), Duration::from_millis(20), &statuses);
        assert!(banner.contains("Bot Ready: tracker"));
        assert!(banner.contains("Startup time: 1.500s"));
        assert!(banner.contains("Commands check: 20.000ms"));
        assert!(banner.contains("Commands loaded: 2"));
        assert!(banner.contains("| statstracker | Registered |"));

        let widths: Vec<usize> = banner.lines().map(str::len).collect();
        assert_eq!(widths[0], widths[1]);
    }

    #[test]
    fn banner_without_commands() {
        let banner = startup_banner("tracker", Duration::ZERO, Duration::ZERO, &[]);
        assert!(banner.contains("(no commands)"));
    }
}
