use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::models::result::HistoryStats;
use crate::models::signal::{Signal, SignalStatus, SignalType};
use crate::utils::format::round_dp;

const HISTORY_PAIRS: [&str; 5] = ["EUR/USD", "GBP/USD", "USD/JPY", "AUD/USD", "USD/CHF"];
/// History entries sit around one of two reference prices, not the per-pair table.
const JPY_HISTORY_BASE: f64 = 149.50;
const HISTORY_BASE: f64 = 1.0850;
const WIN_PROBABILITY: f64 = 0.75;
const WIN_PNL: (f64, f64) = (50.0, 350.0);
const LOSS_PNL: (f64, f64) = (20.0, 120.0);
/// Entries scatter ± half of this around the base price.
const ENTRY_SPREAD: f64 = 0.01;

/// Which closed trades to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryFilter {
    #[default]
    All,
    Wins,
    Losses,
    Today,
}

/// Ordering of the history table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistorySort {
    /// Newest first
    #[default]
    Date,
    /// Largest P&L first
    Pnl,
    /// Alphabetical by pair
    Pair,
}

impl FromStr for HistoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(HistoryFilter::All),
            "wins" => Ok(HistoryFilter::Wins),
            "losses" => Ok(HistoryFilter::Losses),
            "today" => Ok(HistoryFilter::Today),
            _ => Err(format!("Unknown history filter: {}", s)),
        }
    }
}

impl FromStr for HistorySort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "date" => Ok(HistorySort::Date),
            "pnl" => Ok(HistorySort::Pnl),
            "pair" => Ok(HistorySort::Pair),
            _ => Err(format!("Unknown history sort: {}", s)),
        }
    }
}

/// Synthetic closed trades for the history table, newest first.
///
/// Trade `i` is stamped `i` hours plus up to a day before `now`. About three in
/// four are wins.
pub fn generate_historical_trades(count: usize, rng: &mut impl Rng, now: DateTime<Utc>) -> Vec<Signal> {
    let mut trades: Vec<Signal> = (0..count)
        .map(|i| {
            let pair = HISTORY_PAIRS[rng.gen_range(0..HISTORY_PAIRS.len())];
            let signal_type = SignalType::ALL[rng.gen_range(0..SignalType::ALL.len())];
            let is_win = rng.gen::<f64>() < WIN_PROBABILITY;

            let base = if pair == "USD/JPY" {
                JPY_HISTORY_BASE
            } else {
                HISTORY_BASE
            };
            let entry_price = base + (rng.gen::<f64>() - 0.5) * ENTRY_SPREAD;
            let stop_distance = entry_price * (0.0008 + rng.gen::<f64>() * 0.0012);
            let profit_distance = entry_price * (0.003 + rng.gen::<f64>() * 0.008);

            let pnl = if is_win {
                WIN_PNL.0 + rng.gen::<f64>() * (WIN_PNL.1 - WIN_PNL.0)
            } else {
                -(LOSS_PNL.0 + rng.gen::<f64>() * (LOSS_PNL.1 - LOSS_PNL.0))
            };

            let age_ms = i as f64 * 3_600_000.0 + rng.gen::<f64>() * 86_400_000.0;

            Signal {
                id: format!("HIST_{}", i),
                timestamp: now - Duration::milliseconds(age_ms as i64),
                signal_type,
                pair: pair.to_string(),
                entry_price,
                stop_loss: entry_price - stop_distance,
                take_profit: entry_price + profit_distance,
                risk_reward_ratio: round_dp(profit_distance / stop_distance, 2),
                confidence: rng.gen_range(85.0..100.0),
                status: if is_win {
                    SignalStatus::Completed
                } else {
                    SignalStatus::Stopped
                },
                pnl: Some(pnl),
            }
        })
        .collect();

    trades.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
    trades
}

/// Apply a filter and ordering. `Today` means since midnight UTC of `now`.
pub fn filter_and_sort(
    trades: &[Signal],
    filter: HistoryFilter,
    sort: HistorySort,
    now: DateTime<Utc>,
) -> Vec<Signal> {
    let midnight = now
        .date_naive()
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .unwrap_or(now);

    let mut out: Vec<Signal> = trades
        .iter()
        .filter(|t| match filter {
            HistoryFilter::All => true,
            HistoryFilter::Wins => t.realized_pnl() > 0.0,
            HistoryFilter::Losses => t.realized_pnl() < 0.0,
            HistoryFilter::Today => t.timestamp >= midnight,
        })
        .cloned()
        .collect();

    match sort {
        HistorySort::Date => out.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        HistorySort::Pnl => out.sort_by(|a, b| {
            b.realized_pnl()
                .partial_cmp(&a.realized_pnl())
                .unwrap_or(std::cmp::Ordering::Equal)
        }),
        HistorySort::Pair => out.sort_by(|a, b| a.pair.cmp(&b.pair)),
    }
    out
}

/// Win/loss statistics over trades that carry a P&L.
pub fn calculate_history_stats(trades: &[Signal]) -> HistoryStats {
    let pnls: Vec<f64> = trades.iter().filter_map(|t| t.pnl).collect();
    let total_trades = pnls.len();
    if total_trades == 0 {
        return HistoryStats::default();
    }

    let wins: Vec<f64> = pnls.iter().copied().filter(|p| *p > 0.0).collect();
    let losses: Vec<f64> = pnls.iter().copied().filter(|p| *p < 0.0).collect();

    let total_pnl: f64 = pnls.iter().sum();
    let win_rate = wins.len() as f64 / total_trades as f64 * 100.0;
    let avg_win = if wins.is_empty() {
        0.0
    } else {
        wins.iter().sum::<f64>() / wins.len() as f64
    };
    let avg_loss = if losses.is_empty() {
        0.0
    } else {
        (losses.iter().sum::<f64>() / losses.len() as f64).abs()
    };
    let profit_factor = if avg_loss > 0.0 { avg_win / avg_loss } else { 0.0 };

    HistoryStats {
        total_trades,
        winning_trades: wins.len(),
        losing_trades: losses.len(),
        total_pnl,
        win_rate,
        avg_win,
        avg_loss,
        profit_factor,
    }
}
