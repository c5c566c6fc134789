pub mod tracker;

pub fn commands() -> Vec<poise::Command<crate::Data, crate::Error>> {
    vec![
        tracker::statstracker::statstracker(),
        tracker::resetstats::resetstats(),
        tracker::adjuststat::adjuststat(),
        tracker::playerstats::playerstats(),
    ]
}
