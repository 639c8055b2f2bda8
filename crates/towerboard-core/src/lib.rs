// Library root for the leaderboard domain: score records, row parsing, the
// ranking engine, the load lifecycle, and configuration.

pub mod config;
pub mod ranking;
pub mod record;
pub mod state;
