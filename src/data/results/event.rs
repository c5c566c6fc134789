use crate::data::stats::player_stat::PlayerId;

/// One fact recognised in a result message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedEvent {
    Goal { player_id: PlayerId, count: u32 },
    Assist { player_id: PlayerId, count: u32 },
    Motm { player_id: PlayerId },
    Dotm { player_id: PlayerId },
}

impl ParsedEvent {
    pub fn player_id(&self) -> PlayerId {
        match *self {
            ParsedEvent::Goal { player_id, .. }
            | ParsedEvent::Assist { player_id, .. }
            | ParsedEvent::Motm { player_id }
            | ParsedEvent::Dotm { player_id } => player_id,
        }
    }
}
