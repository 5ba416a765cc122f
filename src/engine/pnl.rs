use std::collections::HashMap;

use crate::models::pair::{PIPS_PER_UNIT, PIP_VALUE_USD};
use crate::models::signal::{Signal, SignalStatus};
use crate::utils::format::round_dp;

/// Dollar P&L of a signal at `current_price`, at $10 per pip.
///
/// Closed signals return their frozen P&L (zero if none was recorded), so the
/// result never changes once a signal leaves `Active`. Direction is not
/// modelled: every signal is read as a long from `entry_price`.
pub fn calculate_pnl(signal: &Signal, current_price: f64) -> f64 {
    if !signal.is_active() {
        return signal.pnl.unwrap_or(0.0);
    }

    let price_diff = current_price - signal.entry_price;
    let pips = price_diff.abs() * PIPS_PER_UNIT;

    let pnl = if current_price >= signal.take_profit {
        pips * PIP_VALUE_USD
    } else if current_price <= signal.stop_loss {
        -pips * PIP_VALUE_USD
    } else if price_diff > 0.0 {
        pips * PIP_VALUE_USD
    } else {
        -pips * PIP_VALUE_USD
    };

    round_dp(pnl, 2)
}

/// P&L in pips at `current_price`, signed like `calculate_pnl`.
pub fn calculate_pnl_pips(signal: &Signal, current_price: f64) -> f64 {
    round_dp(calculate_pnl(signal, current_price) / PIP_VALUE_USD, 1)
}

/// Unrealized P&L summed over active signals.
///
/// Each signal is marked at its pair's quote; a pair without a quote is marked
/// at its own entry price and so contributes nothing.
pub fn portfolio_pnl(signals: &[Signal], current_prices: &HashMap<String, f64>) -> f64 {
    signals
        .iter()
        .filter(|s| s.is_active())
        .map(|s| {
            let price = current_prices.get(&s.pair).copied().unwrap_or(s.entry_price);
            calculate_pnl(s, price)
        })
        .sum()
}

/// Close an active signal at an observed price and freeze its P&L.
///
/// A price at or below the stop ends the signal as `Stopped`, anything else as
/// `Completed`. Returns the frozen P&L; closing twice keeps the first result.
pub fn close_at_price(signal: &mut Signal, current_price: f64) -> f64 {
    if signal.is_active() {
        let pnl = calculate_pnl(signal, current_price);
        signal.status = if current_price <= signal.stop_loss {
            SignalStatus::Stopped
        } else {
            SignalStatus::Completed
        };
        signal.pnl = Some(pnl);
    }
    signal.realized_pnl()
}
