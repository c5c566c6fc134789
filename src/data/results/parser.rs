use regex::{Captures, Regex};
use std::sync::OnceLock;

use super::event::ParsedEvent;
use crate::data::stats::player_stat::PlayerId;

// Mention markup is `<@ID>` or the nickname form `<@!ID>`; only the digits are kept.
const MENTION: &str = r"<@!?(\d+)>";

static GOAL_RE: OnceLock<Regex> = OnceLock::new();
static ASSIST_RE: OnceLock<Regex> = OnceLock::new();
static MOTM_RE: OnceLock<Regex> = OnceLock::new();
static DOTM_RE: OnceLock<Regex> = OnceLock::new();

fn compile(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| {
        let full = pattern.replace("{mention}", MENTION);
        Regex::new(&full).expect("result line patterns are valid regexes")
    })
}

fn goal_re() -> &'static Regex {
    compile(&GOAL_RE, r"^(\d+)x\s*{mention}")
}

fn assist_re() -> &'static Regex {
    compile(&ASSIST_RE, r"\b(\d+)x\s*assists?\s*{mention}")
}

fn motm_re() -> &'static Regex {
    compile(&MOTM_RE, r"^MOTM:\s*{mention}")
}

fn dotm_re() -> &'static Regex {
    compile(&DOTM_RE, r"^DOTM:\s*{mention}")
}

/// A classifier looks at one trimmed line in isolation.
type LineClassifier = fn(&str) -> Vec<ParsedEvent>;

const CLASSIFIERS: &[LineClassifier] = &[goal_line, assist_line, motm_line, dotm_line];

/// Extracts every recognised event from a result message, in line order.
///
/// Lines are independent of each other. Each line is offered to every classifier,
/// so a single line may yield several events. Lines no classifier recognises are
/// ignored.
pub fn parse_result_message(content: &str) -> Vec<ParsedEvent> {
    let mut events = Vec::new();
    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        for classify in CLASSIFIERS {
            events.extend(classify(line));
        }
    }
    events
}

fn count_and_player(caps: &Captures<'_>) -> Option<(u32, PlayerId)> {
    let count = caps.get(1)?.as_str().parse::<u32>().ok()?;
    let player_id = caps.get(2)?.as_str().parse::<PlayerId>().ok()?;
    Some((count, player_id))
}

fn award_player(re: &Regex, line: &str) -> Option<PlayerId> {
    re.captures(line)?.get(1)?.as_str().parse::<PlayerId>().ok()
}

/// `3x <@111>` at the start of a line.
fn goal_line(line: &str) -> Vec<ParsedEvent> {
    goal_re()
        .captures(line)
        .and_then(|caps| count_and_player(&caps))
        .map(|(count, player_id)| ParsedEvent::Goal { player_id, count })
        .into_iter()
        .collect()
}

/// `-# 1x assist <@222>`; every assist on the line counts, with or without the
/// `-#` subtext marker.
fn assist_line(line: &str) -> Vec<ParsedEvent> {
    assist_re()
        .captures_iter(line)
        .filter_map(|caps| count_and_player(&caps))
        .map(|(count, player_id)| ParsedEvent::Assist { player_id, count })
        .collect()
}

fn motm_line(line: &str) -> Vec<ParsedEvent> {
    award_player(motm_re(), line)
        .map(|player_id| ParsedEvent::Motm { player_id })
        .into_iter()
        .collect()
}

fn dotm_line(line: &str) -> Vec<ParsedEvent> {
    award_player(dotm_re(), line)
        .map(|player_id| ParsedEvent::Dotm { player_id })
        .into_iter()
        .collect()
}
