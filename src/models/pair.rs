/// The ten pairs the synthesizer quotes.
pub const CURRENCY_PAIRS: [&str; 10] = [
    "EUR/USD", "GBP/USD", "USD/JPY", "USD/CHF", "AUD/USD", "USD/CAD", "NZD/USD", "EUR/GBP",
    "EUR/JPY", "GBP/JPY",
];

/// Pairs shown in the market overview ticker.
pub const MAJOR_PAIRS: [&str; 5] = ["EUR/USD", "GBP/USD", "USD/JPY", "USD/CHF", "AUD/USD"];

/// Fallback base price for pairs missing from the table.
pub const DEFAULT_BASE_PRICE: f64 = 1.0;

/// Price units per pip (non-JPY quoting).
pub const PIPS_PER_UNIT: f64 = 10_000.0;

/// Account value of one pip.
pub const PIP_VALUE_USD: f64 = 10.0;

const BASE_PRICES: [(&str, f64); 10] = [
    ("EUR/USD", 1.0850),
    ("GBP/USD", 1.2650),
    ("USD/JPY", 149.50),
    ("USD/CHF", 0.8750),
    ("AUD/USD", 0.6550),
    ("USD/CAD", 1.3650),
    ("NZD/USD", 0.6050),
    ("EUR/GBP", 0.8580),
    ("EUR/JPY", 162.30),
    ("GBP/JPY", 189.20),
];

/// Fixed reference price for a pair, or `DEFAULT_BASE_PRICE` if unknown.
pub fn base_price(pair: &str) -> f64 {
    BASE_PRICES
        .iter()
        .find(|(name, _)| *name == pair)
        .map(|(_, price)| *price)
        .unwrap_or(DEFAULT_BASE_PRICE)
}

pub fn is_known_pair(pair: &str) -> bool {
    CURRENCY_PAIRS.contains(&pair)
}

/// JPY crosses quote with fewer decimals.
pub fn is_jpy(pair: &str) -> bool {
    pair.contains("JPY")
}

/// Number of decimals used when displaying a price for this pair.
pub fn price_digits(pair: &str) -> usize {
    if is_jpy(pair) {
        3
    } else {
        5
    }
}
