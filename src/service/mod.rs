pub mod entry_sync_service;
pub mod leaderboard_service;
pub mod tally_service;
