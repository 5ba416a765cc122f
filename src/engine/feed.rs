use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use tracing::{debug, info};

use crate::engine::pnl;
use crate::engine::synth;
use crate::errors::AppError;
use crate::models::config::DeskConfig;
use crate::models::signal::Signal;
use crate::utils::format::round_dp;

// Simulated outcome when a user closes a signal from the desk
const WIN_PROBABILITY: f64 = 0.7;
const WIN_PNL: (f64, f64) = (50.0, 250.0);
const LOSS_PNL: (f64, f64) = (20.0, 100.0);

/// Rolling, newest-first list of live signals.
///
/// Holds no lock of its own; `DeskState` keeps it behind a mutex so each
/// command sees a consistent list.
#[derive(Debug, Clone)]
pub struct SignalFeed {
    signals: Vec<Signal>,
    last_signal_at: Option<DateTime<Utc>>,
    max_signals: usize,
    seed_signals: usize,
    interval: Duration,
    jitter: Duration,
}

impl SignalFeed {
    pub fn new(config: &DeskConfig) -> Self {
        SignalFeed {
            signals: Vec::with_capacity(config.max_signals + 1),
            last_signal_at: None,
            max_signals: config.max_signals,
            seed_signals: config.seed_signals,
            interval: Duration::seconds(config.signal_interval_secs as i64),
            jitter: Duration::seconds(config.signal_jitter_secs as i64),
        }
    }

    pub fn signals(&self) -> &[Signal] {
        &self.signals
    }

    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }

    pub fn last_signal_at(&self) -> Option<DateTime<Utc>> {
        self.last_signal_at
    }

    pub fn find(&self, id: &str) -> Option<&Signal> {
        self.signals.iter().find(|s| s.id == id)
    }

    /// Signals that are no longer active.
    pub fn closed_signals(&self) -> impl Iterator<Item = &Signal> {
        self.signals.iter().filter(|s| !s.is_active())
    }

    /// Advance the feed to `now`.
    ///
    /// An empty feed is seeded with staggered signals one minute apart. Otherwise
    /// (or when seeding is disabled) a new signal is prepended once the interval
    /// plus a random jitter has elapsed, and the list is trimmed to `max_signals`.
    pub fn poll(&mut self, rng: &mut impl Rng, now: DateTime<Utc>) -> &[Signal] {
        if self.signals.is_empty() && self.seed_signals > 0 {
            for i in 0..self.seed_signals {
                let stamp = now - Duration::minutes(i as i64);
                self.signals.push(synth::generate_trading_signal_with(rng, stamp));
            }
            self.last_signal_at = Some(now);
            info!("Seeded signal feed with {} signals", self.signals.len());
        } else if self.is_due(rng, now) {
            let signal = synth::generate_trading_signal_with(rng, now);
            debug!(
                "New signal {} {} {} entry={}",
                signal.id, signal.pair, signal.signal_type, signal.entry_price
            );
            self.signals.insert(0, signal);
            self.signals.truncate(self.max_signals);
            self.last_signal_at = Some(now);
        }
        &self.signals
    }

    fn is_due(&self, rng: &mut impl Rng, now: DateTime<Utc>) -> bool {
        let Some(last) = self.last_signal_at else {
            return true;
        };
        let jitter_ms = rng.gen::<f64>() * self.jitter.num_milliseconds() as f64;
        let threshold_ms = self.interval.num_milliseconds() as f64 + jitter_ms;
        (now - last).num_milliseconds() as f64 > threshold_ms
    }

    /// Close a signal with a simulated outcome: 70% a win of $50-$250, else a
    /// loss of $20-$100. Closing an already closed signal leaves it unchanged.
    pub fn close(&mut self, id: &str, rng: &mut impl Rng) -> Result<&Signal, AppError> {
        let signal = self.find_mut(id)?;
        if signal.is_active() {
            let pnl = if rng.gen::<f64>() < WIN_PROBABILITY {
                WIN_PNL.0 + rng.gen::<f64>() * (WIN_PNL.1 - WIN_PNL.0)
            } else {
                -(LOSS_PNL.0 + rng.gen::<f64>() * (LOSS_PNL.1 - LOSS_PNL.0))
            };
            signal.close(round_dp(pnl, 2));
            info!("Closed {} as {:?} with pnl {:.2}", signal.id, signal.status, pnl);
        } else {
            debug!("Signal {} already closed", signal.id);
        }
        Ok(signal)
    }

    /// Close a signal at an observed market price.
    pub fn close_at(&mut self, id: &str, current_price: f64) -> Result<&Signal, AppError> {
        let signal = self.find_mut(id)?;
        let pnl = pnl::close_at_price(signal, current_price);
        info!("Closed {} at {} as {:?} with pnl {:.2}", signal.id, current_price, signal.status, pnl);
        Ok(signal)
    }

    fn find_mut(&mut self, id: &str) -> Result<&mut Signal, AppError> {
        self.signals
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| AppError::SignalNotFound(id.to_string()))
    }
}
