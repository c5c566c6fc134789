use std::collections::HashMap;
use tracing::{debug, warn};

use super::backend::StatBackend;
use super::leaderboard::{Leaderboard, LeaderboardStyle};
use super::player_stat::{Direction, PlayerId, PlayerStat, StatKind};
use crate::data::error::StatError;
use crate::data::results::event::ParsedEvent;

/// Running totals for every player ever referenced.
///
/// Entries are created lazily and never removed; [`StatStore::reset_all`] only
/// zeroes them. When a backend is attached, every touched record is written
/// back after the in-memory update. Write failures are logged and do not undo
/// the update.
pub struct StatStore {
    stats: HashMap<PlayerId, PlayerStat>,
    backend: Option<Box<dyn StatBackend>>,
}

impl Default for StatStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StatStore {
    /// Memory-only store.
    pub fn new() -> Self {
        Self { stats: HashMap::new(), backend: None }
    }

    /// Store seeded from, and writing through to, `backend`.
    pub fn with_backend(backend: Box<dyn StatBackend>) -> Result<Self, StatError> {
        let stats = backend
            .load_all()?
            .into_iter()
            .map(|s| (s.player_id, s))
            .collect();
        Ok(Self { stats, backend: Some(backend) })
    }

    pub fn len(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn get(&self, player_id: PlayerId) -> Option<&PlayerStat> {
        self.stats.get(&player_id)
    }

    fn entry(&mut self, player_id: PlayerId) -> &mut PlayerStat {
        self.stats
            .entry(player_id)
            .or_insert_with(|| PlayerStat::new(player_id))
    }

    pub fn apply_events(&mut self, events: &[ParsedEvent]) {
        let mut touched = Vec::with_capacity(events.len());
        for event in events {
            let stat = self.entry(event.player_id());
            match *event {
                ParsedEvent::Goal { count, .. } => stat.goals = stat.goals.saturating_add(count),
                ParsedEvent::Assist { count, .. } => stat.assists = stat.assists.saturating_add(count),
                ParsedEvent::Motm { .. } => stat.motm = stat.motm.saturating_add(1),
                ParsedEvent::Dotm { .. } => stat.dotm = stat.dotm.saturating_add(1),
            }
            if !touched.contains(&event.player_id()) {
                touched.push(event.player_id());
            }
        }
        debug!(events = events.len(), players = touched.len(), "applied result events");
        self.persist(&touched);
    }

    /// Moves one counter of `player_id` by one, creating the player if needed.
    pub fn adjust_stat(&mut self, player_id: PlayerId, kind: StatKind, direction: Direction) -> PlayerStat {
        let stat = self.entry(player_id);
        stat.adjust(kind, direction);
        let updated = *stat;
        self.persist(&[player_id]);
        updated
    }

    /// Same as [`StatStore::adjust_stat`] but with user-supplied names.
    /// Nothing changes when either name is unknown.
    pub fn adjust_stat_named(&mut self, player_id: PlayerId, stat: &str, action: &str) -> Result<PlayerStat, StatError> {
        let kind: StatKind = stat.parse()?;
        let direction: Direction = action.parse()?;
        Ok(self.adjust_stat(player_id, kind, direction))
    }

    pub fn reset_all(&mut self) {
        self.stats.values_mut().for_each(PlayerStat::reset);
        let ids: Vec<PlayerId> = self.stats.keys().copied().collect();
        self.persist(&ids);
    }

    pub fn build_leaderboard(&self, scope: &[PlayerId], style: LeaderboardStyle) -> Leaderboard {
        let mut seen = Vec::with_capacity(scope.len());
        for id in scope {
            if !seen.contains(id) {
                seen.push(*id);
            }
        }
        let in_scope: Vec<PlayerStat> = seen
            .into_iter()
            .map(|id| self.get(id).copied().unwrap_or_else(|| PlayerStat::new(id)))
            .collect();
        Leaderboard::from_scope(in_scope, style)
    }

    fn persist(&self, ids: &[PlayerId]) {
        let Some(backend) = &self.backend else { return };
        let snapshot: Vec<PlayerStat> = ids.iter().filter_map(|id| self.stats.get(id).copied()).collect();
        if snapshot.is_empty() {
            return;
        }
        if let Err(e) = backend.save(&snapshot) {
            warn!(error = %e, players = snapshot.len(), "failed to persist player stats");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::results::parser::parse_result_message;
    use crate::data::stats::backend::temporary_sled;

    fn goal(player_id: PlayerId, count: u32) -> ParsedEvent {
        ParsedEvent::Goal { player_id, count }
    }

    #[test]
    fn applies_parsed_message() {
        let mut store = StatStore::new();
        store.apply_events(&parse_result_message("3x <@111>\n-# 1x assist <@222>\nMOTM: <@111>"));

        let p111 = store.get(111).unwrap();
        assert_eq!((p111.goals, p111.assists, p111.motm, p111.dotm), (3, 0, 1, 0));
        let p222 = store.get(222).unwrap();
        assert_eq!((p222.goals, p222.assists, p222.motm, p222.dotm), (0, 1, 0, 0));

        let board = store.build_leaderboard(&[111, 222], LeaderboardStyle::Roster);
        assert_eq!(board.leader, Some(111));
    }

    #[test]
    fn sequential_messages_accumulate() {
        let mut store = StatStore::new();
        store.apply_events(&parse_result_message("2x <@111>"));
        store.apply_events(&parse_result_message("1x <@111>"));
        assert_eq!(store.get(111).unwrap().goals, 3);
    }

    #[test]
    fn event_order_does_not_change_totals() {
        let events = vec![
            goal(1, 2),
            ParsedEvent::Assist { player_id: 2, count: 1 },
            ParsedEvent::Dotm { player_id: 1 },
            goal(2, 4),
            goal(1, 1),
        ];
        let mut forward = StatStore::new();
        forward.apply_events(&events);
        let mut reversed = StatStore::new();
        let mut rev = events.clone();
        rev.reverse();
        reversed.apply_events(&rev);

        for id in [1, 2] {
            assert_eq!(forward.get(id), reversed.get(id));
        }
        assert_eq!(forward.get(1).unwrap().goals, 3);
        assert_eq!(forward.get(2).unwrap().goals, 4);
    }

    #[test]
    fn adjust_creates_player_and_clamps() {
        let mut store = StatStore::new();
        assert!(store.get(333).is_none());

        let stat = store.adjust_stat_named(333, "dotm", "increase").unwrap();
        assert_eq!(stat.dotm, 1);
        store.adjust_stat_named(333, "dotm", "decrease").unwrap();
        let stat = store.adjust_stat_named(333, "dotm", "decrease").unwrap();
        assert_eq!(stat.dotm, 0);
        assert_eq!(store.get(333).unwrap().dotm, 0);
    }

    #[test]
    fn decreasing_zero_goals_stays_zero() {
        let mut store = StatStore::new();
        let stat = store.adjust_stat(5, StatKind::Goals, Direction::Decrease);
        assert_eq!(stat.goals, 0);
    }

    #[test]
    fn invalid_stat_name_leaves_store_untouched() {
        let mut store = StatStore::new();
        let err = store.adjust_stat_named(9, "saves", "increase").unwrap_err();
        assert!(matches!(err, StatError::InvalidStatName(_)));
        assert!(store.get(9).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn invalid_action_leaves_store_untouched() {
        let mut store = StatStore::new();
        let err = store.adjust_stat_named(9, "goals", "sideways").unwrap_err();
        assert!(matches!(err, StatError::InvalidDirection(action) if action == "sideways"));
        assert!(store.is_empty());
    }

    #[test]
    fn reset_zeroes_but_keeps_players() {
        let mut store = StatStore::new();
        store.apply_events(&[goal(1, 5), goal(2, 1), ParsedEvent::Motm { player_id: 2 }]);
        store.reset_all();

        assert_eq!(store.len(), 2);
        assert!(store.get(1).unwrap().is_zero());
        assert!(store.get(2).unwrap().is_zero());

        let board = store.build_leaderboard(&[2, 1, 3], LeaderboardStyle::Roster);
        assert!(board.rows.iter().all(PlayerStat::is_zero));
        assert_eq!(board.leader, Some(2));
    }

    #[test]
    fn leaderboard_scope_ignores_duplicates() {
        let mut store = StatStore::new();
        store.apply_events(&[goal(1, 1)]);
        let board = store.build_leaderboard(&[1, 1, 2], LeaderboardStyle::Roster);
        let ids: Vec<PlayerId> = board.rows.iter().map(|s| s.player_id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn backend_round_trips_through_a_new_store() {
        let backend = temporary_sled();
        let first = backend.load_all().unwrap();
        assert!(first.is_empty());

        let mut store = StatStore::with_backend(Box::new(backend)).unwrap();
        store.apply_events(&[goal(10, 2), ParsedEvent::Motm { player_id: 11 }]);
        store.adjust_stat(10, StatKind::Assists, Direction::Increase);

        let backend = store.backend.take().unwrap();
        let reloaded = StatStore::with_backend(backend).unwrap();
        assert_eq!(
            reloaded.get(10).copied(),
            Some(PlayerStat { player_id: 10, goals: 2, assists: 1, motm: 0, dotm: 0 })
        );
        assert_eq!(reloaded.get(11).unwrap().motm, 1);
    }
}
