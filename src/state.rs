use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;

use crate::engine::feed::SignalFeed;
use crate::engine::history;
use crate::models::config::DeskConfig;
use crate::models::signal::Signal;

/// Mutable desk data. Only reachable through the mutex in `DeskState`.
pub struct Desk {
    pub feed: SignalFeed,
    pub rng: StdRng,
    history: Option<Vec<Signal>>,
}

impl Desk {
    /// Synthetic past trades, generated on first use and kept for the process lifetime.
    pub fn history(&mut self, count: usize, now: DateTime<Utc>) -> &[Signal] {
        let rng = &mut self.rng;
        self.history
            .get_or_insert_with(|| history::generate_historical_trades(count, rng, now))
    }
}

/// Shared application state, handed to every desk command.
pub struct DeskState {
    pub config: DeskConfig,
    pub desk: Mutex<Desk>,
}

impl DeskState {
    pub fn new(config: DeskConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic state for tests and reproducible demos.
    pub fn with_seed(config: DeskConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: DeskConfig, rng: StdRng) -> Self {
        let desk = Desk {
            feed: SignalFeed::new(&config),
            rng,
            history: None,
        };
        DeskState {
            config,
            desk: Mutex::new(desk),
        }
    }
}
