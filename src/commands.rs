use chrono::Utc;
use tracing::{info, warn};

use crate::engine::history::{self, HistoryFilter, HistorySort};
use crate::engine::{market, pnl, synth};
use crate::errors::AppError;
use crate::models::pair;
use crate::models::result::{
    CloseResponse, HistoryResponse, MarketResponse, MarketStatus, SignalsResponse,
};
use crate::models::signal::Signal;
use crate::state::DeskState;

/// Rows returned by the history command.
const HISTORY_PAGE: usize = 20;

// ── Signal Commands ──

/// Current signal list, seeding or extending the feed as time passes, with
/// the unrealized P&L of the active signals at fresh major-pair quotes.
pub async fn get_signals(state: &DeskState) -> Result<SignalsResponse, AppError> {
    let now = Utc::now();
    let mut guard = state.desk.lock().await;
    let desk = &mut *guard;
    let signals = desk.feed.poll(&mut desk.rng, now).to_vec();
    let current_prices = market::current_prices(&state.config.major_pairs, &mut desk.rng);
    drop(guard);

    let total_pnl = pnl::portfolio_pnl(&signals, &current_prices);

    Ok(SignalsResponse {
        success: true,
        signals,
        current_prices,
        total_pnl,
        timestamp: now,
        market_status: MarketStatus::Open,
    })
}

/// Close a signal with a simulated outcome.
pub async fn close_signal(state: &DeskState, signal_id: &str) -> Result<CloseResponse, AppError> {
    let mut guard = state.desk.lock().await;
    let desk = &mut *guard;
    desk.feed.close(signal_id, &mut desk.rng)?;

    Ok(CloseResponse {
        success: true,
        message: "Signal updated successfully".to_string(),
    })
}

// ── Market Commands ──

/// Candle history for a pair plus quotes for the major pairs.
///
/// `pair` defaults to the configured pair; `hours` defaults to the configured
/// window and is clamped to `[0, max_market_hours]`.
pub async fn get_market_data(
    state: &DeskState,
    pair: Option<&str>,
    hours: Option<i64>,
) -> Result<MarketResponse, AppError> {
    let config = &state.config;
    let pair = pair
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .unwrap_or(&config.default_pair)
        .to_string();
    let hours = hours
        .unwrap_or(config.default_hours as i64)
        .clamp(0, config.max_market_hours as i64) as u32;

    if !pair::is_known_pair(&pair) {
        warn!("Unknown pair {}, using default base price", pair);
    }

    let now = Utc::now();
    let mut desk = state.desk.lock().await;
    let data = synth::generate_market_data_with(&mut desk.rng, now, &pair, hours);
    let current_prices = market::current_prices(&config.major_pairs, &mut desk.rng);
    drop(desk);

    let statistics = market::market_statistics(&data);
    info!("Market data: {} candles for {} ({}h)", data.len(), pair, hours);

    Ok(MarketResponse {
        success: true,
        pair,
        data,
        current_prices,
        statistics,
        timestamp: now,
    })
}

// ── History Commands ──

/// Closed feed signals merged with synthetic past trades, filtered and sorted.
pub async fn get_trade_history(
    state: &DeskState,
    filter: HistoryFilter,
    sort: HistorySort,
) -> Result<HistoryResponse, AppError> {
    let now = Utc::now();
    let mut desk = state.desk.lock().await;
    let mut all: Vec<Signal> = desk.feed.closed_signals().cloned().collect();
    all.extend_from_slice(desk.history(state.config.history_trades, now));
    drop(desk);

    let filtered = history::filter_and_sort(&all, filter, sort, now);
    let stats = history::calculate_history_stats(&filtered);

    Ok(HistoryResponse {
        success: true,
        trades: filtered.into_iter().take(HISTORY_PAGE).collect(),
        stats,
        timestamp: now,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::config::DeskConfig;
    use crate::models::signal::SignalStatus;

    fn state() -> DeskState {
        DeskState::with_seed(DeskConfig::default(), 99)
    }

    #[tokio::test]
    async fn test_get_signals_seeds_feed() {
        let state = state();
        let response = get_signals(&state).await.unwrap();
        assert!(response.success);
        assert_eq!(response.signals.len(), 3);
        assert_eq!(response.market_status, MarketStatus::Open);

        // Immediate second poll is inside the interval
        let again = get_signals(&state).await.unwrap();
        assert_eq!(again.signals, response.signals);
    }

    #[tokio::test]
    async fn test_get_signals_reports_portfolio_pnl() {
        let state = state();
        let response = get_signals(&state).await.unwrap();
        assert_eq!(response.current_prices.len(), 5);
        let expected = pnl::portfolio_pnl(&response.signals, &response.current_prices);
        assert_eq!(response.total_pnl, expected);

        let value = serde_json::to_value(&response).unwrap();
        assert!(value.get("totalPnL").is_some());
        assert!(value["currentPrices"].get("EUR/USD").is_some());
    }

    #[tokio::test]
    async fn test_close_signal_round_trip() {
        let state = state();
        let signals = get_signals(&state).await.unwrap().signals;
        let response = close_signal(&state, &signals[0].id).await.unwrap();
        assert!(response.success);

        let after = get_signals(&state).await.unwrap().signals;
        let closed = after.iter().find(|s| s.id == signals[0].id).unwrap();
        assert_ne!(closed.status, SignalStatus::Active);
        assert!(closed.pnl.is_some());
    }

    #[tokio::test]
    async fn test_close_unknown_signal() {
        let state = state();
        let err = close_signal(&state, "nope").await.unwrap_err();
        assert!(matches!(err, AppError::SignalNotFound(_)));
    }

    #[tokio::test]
    async fn test_market_data_defaults() {
        let state = state();
        let response = get_market_data(&state, None, None).await.unwrap();
        assert_eq!(response.pair, "EUR/USD");
        assert_eq!(response.data.len(), 24 * 12 + 1);
        assert_eq!(response.current_prices.len(), 5);
        assert_eq!(response.statistics.open, 1.085);
    }

    #[tokio::test]
    async fn test_market_hours_clamped() {
        let state = state();
        let week = get_market_data(&state, Some("USD/JPY"), Some(10_000)).await.unwrap();
        assert_eq!(week.data.len(), 168 * 12 + 1);
        let none = get_market_data(&state, Some("USD/JPY"), Some(-5)).await.unwrap();
        assert_eq!(none.data.len(), 1);
    }

    #[tokio::test]
    async fn test_market_data_serializes_wire_names() {
        let state = state();
        let response = get_market_data(&state, Some(" GBP/USD "), Some(1)).await.unwrap();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["pair"], "GBP/USD");
        assert!(value["statistics"].get("high24h").is_some());
        assert!(value["currentPrices"].get("USD/JPY").is_some());
    }

    #[tokio::test]
    async fn test_trade_history_includes_closed_signals() {
        let state = state();
        let signals = get_signals(&state).await.unwrap().signals;
        close_signal(&state, &signals[0].id).await.unwrap();

        let response = get_trade_history(&state, HistoryFilter::All, HistorySort::Date)
            .await
            .unwrap();
        assert_eq!(response.stats.total_trades, 26);
        assert_eq!(response.trades.len(), HISTORY_PAGE);
        // Just closed, so it is the newest entry
        assert_eq!(response.trades[0].id, signals[0].id);
    }

    #[tokio::test]
    async fn test_trade_history_is_stable() {
        let state = state();
        let first = get_trade_history(&state, HistoryFilter::Wins, HistorySort::Pnl)
            .await
            .unwrap();
        let second = get_trade_history(&state, HistoryFilter::Wins, HistorySort::Pnl)
            .await
            .unwrap();
        assert_eq!(first.stats, second.stats);
        assert!(first.trades.iter().all(|t| t.pnl.unwrap() > 0.0));
    }
}
