// Widget modules for each screen zone.

pub mod header;
pub mod leaderboard;
pub mod loading;
pub mod search;
pub mod status_bar;
