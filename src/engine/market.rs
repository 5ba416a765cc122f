use std::collections::HashMap;

use rand::Rng;

use crate::engine::synth::{self, DEFAULT_VOLATILITY};
use crate::models::candle::Candle;
use crate::models::pair;
use crate::models::result::MarketStatistics;
use crate::utils::format::round_dp;

/// Header statistics over a candle batch. An empty batch yields all zeros.
pub fn market_statistics(candles: &[Candle]) -> MarketStatistics {
    let (Some(first), Some(last)) = (candles.first(), candles.last()) else {
        return MarketStatistics::default();
    };

    let high = candles.iter().map(|c| c.high).fold(f64::NEG_INFINITY, f64::max);
    let low = candles.iter().map(|c| c.low).fold(f64::INFINITY, f64::min);
    let change_pct = if first.open != 0.0 {
        (last.close - first.open) / first.open * 100.0
    } else {
        0.0
    };

    MarketStatistics {
        current: round_dp(last.close, 5),
        high: round_dp(high, 5),
        low: round_dp(low, 5),
        open: round_dp(first.open, 5),
        change_pct: round_dp(change_pct, 2),
        volume: candles.iter().map(|c| c.volume).sum(),
    }
}

/// One fresh quote per pair around its base price.
pub fn current_prices<S: AsRef<str>>(pairs: &[S], rng: &mut impl Rng) -> HashMap<String, f64> {
    pairs
        .iter()
        .map(|p| {
            let p = p.as_ref();
            let quote = synth::random_price_with(rng, pair::base_price(p), DEFAULT_VOLATILITY);
            (p.to_string(), quote)
        })
        .collect()
}
