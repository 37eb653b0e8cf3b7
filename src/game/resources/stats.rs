//! Cross-session game statistics
//!
//! Counters are loaded once when the controller is built and rewritten
//! after every terminal status. A load failure starts from zero, a save
//! failure is logged and play continues.
//!
//! # Update rule
//!
//! | Terminal status            | played | wins | draws |
//! |----------------------------|--------|------|-------|
//! | checkmate, winner White    | +1     | +1   |       |
//! | stalemate                  | +1     |      | +1    |
//! | anything else              | +1     |      |       |

use crate::core::storage::KeyValueStore;
use crate::game::resources::game_over::{GameStatus, StatusReport};
use crate::game::types::Color;
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

/// Storage key the counters live under
pub const STATS_KEY: &str = "chessGameStats";

/// Persisted counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    #[serde(default)]
    pub played: u32,
    #[serde(default)]
    pub wins: u32,
    #[serde(default)]
    pub draws: u32,
}

impl Stats {
    /// Apply one finished game to the counters
    pub fn record(&mut self, report: &StatusReport) {
        self.played += 1;
        match (report.status, report.winner) {
            (GameStatus::Checkmate, Some(Color::White)) => self.wins += 1,
            (GameStatus::Stalemate, _) => self.draws += 1,
            _ => {}
        }
    }
}

/// Counters bound to a key in a [`KeyValueStore`]
pub struct StatsStore {
    store: Box<dyn KeyValueStore>,
    key: String,
    stats: Stats,
}

impl std::fmt::Debug for StatsStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatsStore")
            .field("key", &self.key)
            .field("stats", &self.stats)
            .finish()
    }
}

impl StatsStore {
    /// Load counters from `store` under `key`
    pub fn load(store: Box<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        let key = key.into();
        let stats = match store.read(&key) {
            Ok(Some(contents)) => match serde_json::from_str::<Stats>(&contents) {
                Ok(stats) => {
                    info!("[STATS] Loaded stats under {:?}: {:?}", key, stats);
                    stats
                }
                Err(e) => {
                    warn!("[STATS] Failed to parse stats under {:?}: {}. Using zeros.", key, e);
                    Stats::default()
                }
            },
            Ok(None) => {
                info!("[STATS] No stats stored under {:?}. Starting from zero.", key);
                Stats::default()
            }
            Err(e) => {
                warn!("[STATS] Failed to read stats under {:?}: {}. Using zeros.", key, e);
                Stats::default()
            }
        };
        Self { store, key, stats }
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Count a finished game and persist the counters
    pub fn record(&mut self, report: &StatusReport) {
        self.stats.record(report);
        info!("[STATS] Recorded {:?}: {:?}", report.status, self.stats);
        self.save();
    }

    fn save(&self) {
        match serde_json::to_string(&self.stats) {
            Ok(json) => {
                if let Err(e) = self.store.write(&self.key, &json) {
                    error!("[STATS] Failed to write stats under {:?}: {}", self.key, e);
                }
            }
            Err(e) => error!("[STATS] Failed to serialize stats: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;

    #[test]
    fn test_checkmate_by_white_counts_a_win() {
        let mut stats = Stats::default();
        stats.record(&StatusReport::new(GameStatus::Checkmate, Some(Color::White)));
        assert_eq!(stats, Stats { played: 1, wins: 1, draws: 0 });
    }

    #[test]
    fn test_stalemate_counts_a_draw() {
        let mut stats = Stats::default();
        stats.record(&StatusReport::new(GameStatus::Stalemate, None));
        assert_eq!(stats, Stats { played: 1, wins: 0, draws: 1 });
    }

    #[test]
    fn test_other_endings_only_count_played() {
        let mut stats = Stats::default();
        stats.record(&StatusReport::new(GameStatus::Resigned, Some(Color::Black)));
        stats.record(&StatusReport::new(GameStatus::Checkmate, Some(Color::Black)));
        assert_eq!(stats, Stats { played: 2, wins: 0, draws: 0 });
    }

    #[test]
    fn test_store_loads_and_persists() {
        let backing = MemoryStore::with_value(STATS_KEY, r#"{"played":4,"wins":2,"draws":1}"#);
        let mut store = StatsStore::load(Box::new(backing.clone()), STATS_KEY);
        assert_eq!(store.stats(), Stats { played: 4, wins: 2, draws: 1 });

        store.record(&StatusReport::new(GameStatus::Stalemate, None));
        let saved: Stats =
            serde_json::from_str(&backing.read(STATS_KEY).unwrap().unwrap()).unwrap();
        assert_eq!(saved, Stats { played: 5, wins: 2, draws: 2 });
    }

    #[test]
    fn test_corrupt_stats_fall_back_to_zero() {
        let backing = MemoryStore::with_value(STATS_KEY, "not json");
        let store = StatsStore::load(Box::new(backing), STATS_KEY);
        assert_eq!(store.stats(), Stats::default());
    }
}
