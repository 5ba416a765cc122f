pub mod commands;
pub mod engine;
pub mod errors;
pub mod models;
pub mod state;
pub mod utils;

use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::engine::history::{HistoryFilter, HistorySort};
use crate::models::config::DeskConfig;
use crate::state::DeskState;

pub use crate::engine::pnl::calculate_pnl;
pub use crate::engine::synth::{generate_market_data, generate_random_price, generate_trading_signal};
pub use crate::utils::format::{format_currency, format_price};

/// Environment variable naming a directory for CSV exports.
pub const EXPORT_DIR_ENV_VAR: &str = "SIGNAL_DESK_EXPORT_DIR";

/// Print one round of desk responses as JSON.
///
/// Usage: `signal-desk [PAIR] [HOURS]`. Logs go to stderr, filtered by `RUST_LOG`.
/// When `SIGNAL_DESK_EXPORT_DIR` is set, the same data is also written as CSV.
pub async fn run() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting signal desk");

    let config = DeskConfig::from_env().context("Failed to load desk configuration")?;
    let state = DeskState::new(config);

    let mut args = std::env::args().skip(1);
    let pair = args.next();
    let hours = match args.next() {
        Some(raw) => Some(
            raw.parse::<i64>()
                .with_context(|| format!("HOURS must be an integer, got {:?}", raw))?,
        ),
        None => None,
    };

    let signals = commands::get_signals(&state).await?;
    let market = commands::get_market_data(&state, pair.as_deref(), hours).await?;
    let history = commands::get_trade_history(&state, HistoryFilter::All, HistorySort::Date).await?;

    for signal in signals.signals.iter().filter(|s| s.is_active()) {
        let price = signals
            .current_prices
            .get(&signal.pair)
            .copied()
            .unwrap_or(signal.entry_price);
        info!(
            "{} {} entry {} now {} -> {}",
            signal.pair,
            signal.signal_type,
            format_price(signal.entry_price, &signal.pair),
            format_price(price, &signal.pair),
            format_currency(calculate_pnl(signal, price))
        );
    }
    info!("Open P&L {}", format_currency(signals.total_pnl));

    let output = serde_json::json!({
        "signals": signals,
        "market": market,
        "history": history,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);

    if let Some(dir) = std::env::var_os(EXPORT_DIR_ENV_VAR) {
        let dir = std::path::PathBuf::from(dir);
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create export directory {}", dir.display()))?;
        utils::export::write_signals_csv(&signals.signals, &dir.join("signals.csv"))?;
        utils::export::write_candles_csv(&market.data, &market.pair, &dir.join("candles.csv"))?;
        utils::export::write_signals_csv(&history.trades, &dir.join("history.csv"))?;
        utils::export::write_history_stats_csv(&history.stats, &dir.join("history_stats.csv"))?;
        info!("Exported CSV files to {}", dir.display());
    }

    info!(
        "Done: {} signals, {} candles, history P&L {}",
        signals.signals.len(),
        market.data.len(),
        format_currency(history.stats.total_pnl)
    );
    Ok(())
}
