use std::path::Path;

use super::player_stat::{PlayerId, PlayerStat};
use crate::data::error::StatError;

/// Durable storage behind a [`StatStore`](super::store::StatStore).
pub trait StatBackend: Send + Sync {
    fn load_all(&self) -> Result<Vec<PlayerStat>, StatError>;
    fn save(&self, stats: &[PlayerStat]) -> Result<(), StatError>;
}

// sled's background flusher persists writes; `save` never blocks on a flush.
const FLUSH_EVERY_MS: u64 = 500;

pub struct SledBackend {
    // Kept so the database, and its flusher, live as long as the backend.
    _db: sled::Db,
    player_stats: sled::Tree,
}

impl SledBackend {
    pub fn open(path: &Path) -> Result<Self, StatError> {
        let db = sled::Config::new()
            .path(path)
            .flush_every_ms(Some(FLUSH_EVERY_MS))
            .open()?;
        Self::from_db(db)
    }

    fn from_db(db: sled::Db) -> Result<Self, StatError> {
        Ok(Self {
            player_stats: db.open_tree("player_stats")?,
            _db: db,
        })
    }
}

fn player_key(player_id: PlayerId) -> [u8; 8] {
    player_id.to_be_bytes()
}

impl StatBackend for SledBackend {
    fn load_all(&self) -> Result<Vec<PlayerStat>, StatError> {
        let mut out = Vec::new();
        for entry in self.player_stats.iter() {
            let (_, v) = entry?;
            let (stat, _) = bincode::serde::decode_from_slice::<PlayerStat, _>(&v, bincode::config::standard())?;
            out.push(stat);
        }
        Ok(out)
    }

    fn save(&self, stats: &[PlayerStat]) -> Result<(), StatError> {
        for stat in stats {
            let bytes = bincode::serde::encode_to_vec(stat, bincode::config::standard())?;
            self.player_stats.insert(player_key(stat.player_id), bytes)?;
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn temporary_sled() -> SledBackend {
    let db = sled::Config::new().temporary(true).open().expect("temporary sled db");
    SledBackend::from_db(db).expect("player_stats tree")
}
