pub mod admin;
pub mod adjuststat;
pub mod playerstats;
pub mod resetstats;
pub mod statstracker;
