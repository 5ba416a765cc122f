use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::models::candle::Candle;
use crate::models::pair::{self, CURRENCY_PAIRS};
use crate::models::signal::{Signal, SignalStatus, SignalType};
use crate::utils::format::round_dp;

/// Default relative volatility for `generate_random_price`.
pub const DEFAULT_VOLATILITY: f64 = 0.001;
/// Default length of a market-data request, in hours.
pub const DEFAULT_HOURS: u32 = 24;
/// Largest history a caller should request (one week).
pub const MAX_MARKET_HOURS: u32 = 168;

/// Prices are quoted to 5 decimals.
const PRICE_DECIMALS: u32 = 5;

// Signal shape, as fractions of the entry price
const ENTRY_VOLATILITY: f64 = 0.002;
const STOP_DISTANCE: (f64, f64) = (0.0008, 0.0020);
const PROFIT_DISTANCE: (f64, f64) = (0.003, 0.011);
const CONFIDENCE: (f64, f64) = (85.0, 100.0);

// Candle walk
const CANDLE_MINUTES: i64 = 5;
const CANDLES_PER_HOUR: u32 = 12;
const CANDLE_VOLATILITY: (f64, f64) = (0.0005, 0.0015);
const MAX_WICK: f64 = 0.0005;
const VOLUME: (f64, f64) = (1000.0, 6000.0);

const ID_SUFFIX_LEN: usize = 9;

/// Uniform draw in `[low, high)`.
fn uniform(rng: &mut impl Rng, low: f64, high: f64) -> f64 {
    low + rng.gen::<f64>() * (high - low)
}

/// Price within `base * (1 ± volatility)`, rounded to 5 decimals.
pub fn random_price_with(rng: &mut impl Rng, base_price: f64, volatility: f64) -> f64 {
    let change = (rng.gen::<f64>() - 0.5) * 2.0 * volatility;
    round_dp(base_price * (1.0 + change), PRICE_DECIMALS)
}

/// `random_price_with` on the thread-local generator.
pub fn generate_random_price(base_price: f64, volatility: f64) -> f64 {
    random_price_with(&mut rand::thread_rng(), base_price, volatility)
}

/// Build an active signal for a given pair and type.
pub fn synthesize_signal(
    rng: &mut impl Rng,
    now: DateTime<Utc>,
    pair: &str,
    signal_type: SignalType,
) -> Signal {
    let base = pair::base_price(pair);
    let entry_price = random_price_with(rng, base, ENTRY_VOLATILITY);

    let stop_distance = entry_price * uniform(rng, STOP_DISTANCE.0, STOP_DISTANCE.1);
    let stop_loss = round_dp(entry_price - stop_distance, PRICE_DECIMALS);

    let profit_distance = entry_price * uniform(rng, PROFIT_DISTANCE.0, PROFIT_DISTANCE.1);
    let take_profit = round_dp(entry_price + profit_distance, PRICE_DECIMALS);

    let risk_reward_ratio = round_dp(profit_distance / stop_distance, 2);
    // gen_range stays strictly below the upper bound even at the largest draw
    let confidence = rng.gen_range(CONFIDENCE.0..CONFIDENCE.1);

    Signal {
        id: signal_id(rng, now),
        timestamp: now,
        signal_type,
        pair: pair.to_string(),
        entry_price,
        stop_loss,
        take_profit,
        risk_reward_ratio,
        confidence,
        status: SignalStatus::Active,
        pnl: None,
    }
}

/// Random pair and type, otherwise as `synthesize_signal`.
pub fn generate_trading_signal_with(rng: &mut impl Rng, now: DateTime<Utc>) -> Signal {
    let pair = CURRENCY_PAIRS[rng.gen_range(0..CURRENCY_PAIRS.len())];
    let signal_type = SignalType::ALL[rng.gen_range(0..SignalType::ALL.len())];
    synthesize_signal(rng, now, pair, signal_type)
}

pub fn generate_trading_signal() -> Signal {
    generate_trading_signal_with(&mut rand::thread_rng(), Utc::now())
}

/// Walk `hours * 12 + 1` five-minute candles forward from the pair's base
/// price, the last one stamped `now`.
pub fn generate_market_data_with(
    rng: &mut impl Rng,
    now: DateTime<Utc>,
    pair: &str,
    hours: u32,
) -> Vec<Candle> {
    let total_points = hours as i64 * CANDLES_PER_HOUR as i64;
    let mut candles = Vec::with_capacity(total_points as usize + 1);
    let mut price = pair::base_price(pair);

    for i in (0..=total_points).rev() {
        let timestamp = now - Duration::minutes(i * CANDLE_MINUTES);
        let volatility = uniform(rng, CANDLE_VOLATILITY.0, CANDLE_VOLATILITY.1);
        let open = price;
        let close = random_price_with(rng, open, volatility);
        let high = open.max(close) + uniform(rng, 0.0, MAX_WICK);
        let low = open.min(close) - uniform(rng, 0.0, MAX_WICK);
        let volume = uniform(rng, VOLUME.0, VOLUME.1).floor() as u64;

        candles.push(Candle {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        });
        price = close;
    }

    candles
}

pub fn generate_market_data(pair: &str, hours: u32) -> Vec<Candle> {
    generate_market_data_with(&mut rand::thread_rng(), Utc::now(), pair, hours)
}

/// `SIG_<unix millis>_<random suffix>`. Unique enough for in-memory de-duplication.
fn signal_id(rng: &mut impl Rng, now: DateTime<Utc>) -> String {
    let uuid = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
    let simple = uuid.simple().to_string();
    format!("SIG_{}_{}", now.timestamp_millis(), &simple[..ID_SUFFIX_LEN])
}
