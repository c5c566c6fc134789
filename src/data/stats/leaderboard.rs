use chrono::{Datelike, NaiveDate};
use std::fmt::Write as _;
use std::str::FromStr;

use super::player_stat::{PlayerId, PlayerStat};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LeaderboardStyle {
    /// Every in-scope player, in scope order.
    #[default]
    Roster,
    /// Sorted by goals then assists, players without any stat left out.
    Ranked,
}

impl FromStr for LeaderboardStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "roster" => Ok(LeaderboardStyle::Roster),
            "ranked" => Ok(LeaderboardStyle::Ranked),
            other => Err(other.to_string()),
        }
    }
}

pub struct RenderOptions<'a> {
    pub motm_icon: &'a str,
    pub dotm_icon: &'a str,
    pub date: NaiveDate,
    /// Role pinged at the bottom of the report.
    pub group_mention: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaderboard {
    pub style: LeaderboardStyle,
    pub rows: Vec<PlayerStat>,
    pub leader: Option<PlayerId>,
}

impl Leaderboard {
    /// `scope` must already be deduplicated and in scope order.
    pub fn from_scope(scope: Vec<PlayerStat>, style: LeaderboardStyle) -> Self {
        let leader = leading_player(&scope);
        let rows = match style {
            LeaderboardStyle::Roster => scope,
            LeaderboardStyle::Ranked => {
                let mut rows: Vec<PlayerStat> = scope.into_iter().filter(|s| !s.is_zero()).collect();
                // sort_by is stable, so full ties keep scope order
                rows.sort_by(|a, b| b.goals.cmp(&a.goals).then(b.assists.cmp(&a.assists)));
                rows
            }
        };
        Self { style, rows, leader }
    }

    pub fn render(&self, opts: &RenderOptions<'_>) -> String {
        let mut out = String::new();
        for (idx, stat) in self.rows.iter().enumerate() {
            let line = stat_line(stat, opts);
            let _ = match self.style {
                LeaderboardStyle::Roster => writeln!(out, "**{}**", line),
                LeaderboardStyle::Ranked => writeln!(out, "{}. {}", idx + 1, line),
            };
        }

        match self.leader {
            Some(id) => {
                let _ = writeln!(out, "\n*Leading: <@{}>*", id);
            }
            None => out.push_str("\n*Leading: nobody yet*\n"),
        }
        let _ = writeln!(out, "**{} / {}**", opts.date.day(), opts.date.month());

        if let Some(role_id) = opts.group_mention {
            let _ = write!(out, "<@&{}>", role_id);
        }
        out
    }
}

/// First player with the strictly highest goals + assists, scanning in scope order.
pub fn leading_player(scope: &[PlayerStat]) -> Option<PlayerId> {
    let mut leader: Option<&PlayerStat> = None;
    for stat in scope {
        match leader {
            Some(best) if stat.combined_score() <= best.combined_score() => {}
            _ => leader = Some(stat),
        }
    }
    leader.map(|s| s.player_id)
}

fn stat_line(stat: &PlayerStat, opts: &RenderOptions<'_>) -> String {
    format!(
        "<@{}> GOALS x{} | ASSISTS x{} | x{} {} | x{} {}",
        stat.player_id, stat.goals, stat.assists, stat.motm, opts.motm_icon, stat.dotm, opts.dotm_icon
    )
}

/// Discord's per-message character limit.
pub const MESSAGE_LIMIT: usize = 2000;

/// Splits a report into messages of at most `limit` characters, breaking between
/// lines. A single line longer than `limit` is cut. Chunks holding only blank lines
/// are dropped.
pub fn split_report(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;
    let mut started = false;

    for line in text.split('\n') {
        let chars: Vec<char> = line.chars().collect();
        let pieces: Vec<String> = if chars.is_empty() {
            vec![String::new()]
        } else {
            chars.chunks(limit.max(1)).map(|c| c.iter().collect()).collect()
        };

        for piece in pieces {
            let len = piece.chars().count();
            if started && current_len + 1 + len > limit {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
                started = false;
            }
            if started {
                current.push('\n');
                current_len += 1;
            }
            current.push_str(&piece);
            current_len += len;
            started = true;
        }
    }
    if started {
        chunks.push(current);
    }
    chunks.retain(|c| !c.trim().is_empty());
    chunks
}

/// Reply body for a single player's stats.
pub fn render_player(stat: &PlayerStat, motm_icon: &str, dotm_icon: &str) -> String {
    format!(
        "**<@{}>**\nGoals: {}\nAssists: {}\n{} MOTM: {}\n{} DOTM: {}",
        stat.player_id, stat.goals, stat.assists, motm_icon, stat.motm, dotm_icon, stat.dotm
    )
}
