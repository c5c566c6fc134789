pub mod backend;
pub mod leaderboard;
pub mod player_stat;
pub mod store;
