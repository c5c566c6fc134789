use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::data::error::StatError;

/// Discord user id of a tracked player.
pub type PlayerId = u64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerStat {
    pub player_id: PlayerId,
    pub goals: u32,
    pub assists: u32,
    pub motm: u32,
    pub dotm: u32,
}

impl PlayerStat {
    pub fn new(player_id: PlayerId) -> Self {
        Self { player_id, ..Default::default() }
    }

    /// Goals plus assists; only used to pick the leading player.
    pub fn combined_score(&self) -> u64 {
        u64::from(self.goals) + u64::from(self.assists)
    }

    pub fn is_zero(&self) -> bool {
        self.goals == 0 && self.assists == 0 && self.motm == 0 && self.dotm == 0
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.player_id);
    }

    pub fn counter_mut(&mut self, kind: StatKind) -> &mut u32 {
        match kind {
            StatKind::Goals => &mut self.goals,
            StatKind::Assists => &mut self.assists,
            StatKind::Motm => &mut self.motm,
            StatKind::Dotm => &mut self.dotm,
        }
    }

    /// Moves a counter by one, never below zero.
    pub fn adjust(&mut self, kind: StatKind, direction: Direction) {
        let counter = self.counter_mut(kind);
        *counter = match direction {
            Direction::Increase => counter.saturating_add(1),
            Direction::Decrease => counter.saturating_sub(1),
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Goals,
    Assists,
    Motm,
    Dotm,
}

impl FromStr for StatKind {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "goals" | "goal" => Ok(StatKind::Goals),
            "assists" | "assist" => Ok(StatKind::Assists),
            "motm" => Ok(StatKind::Motm),
            "dotm" => Ok(StatKind::Dotm),
            _ => Err(StatError::InvalidStatName(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Increase,
    Decrease,
}

impl FromStr for Direction {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "increase" | "inc" | "+" => Ok(Direction::Increase),
            "decrease" | "dec" | "-" => Ok(Direction::Decrease),
            _ => Err(StatError::InvalidDirection(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decrease_clamps_at_zero() {
        let mut stat = PlayerStat::new(1);
        stat.adjust(StatKind::Goals, Direction::Decrease);
        assert_eq!(stat.goals, 0);
        stat.adjust(StatKind::Dotm, Direction::Increase);
        stat.adjust(StatKind::Dotm, Direction::Decrease);
        stat.adjust(StatKind::Dotm, Direction::Decrease);
        assert_eq!(stat.dotm, 0);
    }

    #[test]
    fn stat_names_parse_case_insensitively() {
        assert_eq!("Goals".parse::<StatKind>().unwrap(), StatKind::Goals);
        assert_eq!(" MOTM ".parse::<StatKind>().unwrap(), StatKind::Motm);
        assert!(matches!(
            "saves".parse::<StatKind>(),
            Err(StatError::InvalidStatName(name)) if name == "saves"
        ));
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn reset_keeps_identity() {
        let mut stat = PlayerStat { player_id: 7, goals: 3, assists: 1, motm: 2, dotm: 1 };
        stat.reset();
        assert_eq!(stat, PlayerStat::new(7));
        assert!(stat.is_zero());
    }
}
