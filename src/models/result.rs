use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::candle::Candle;
use super::signal::Signal;

/// Summary of a candle batch for the market header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStatistics {
    pub current: f64,
    #[serde(rename = "high24h")]
    pub high: f64,
    #[serde(rename = "low24h")]
    pub low: f64,
    #[serde(rename = "open24h")]
    pub open: f64,
    /// Percent change from first open to last close
    #[serde(rename = "change24h")]
    pub change_pct: f64,
    #[serde(rename = "volume24h")]
    pub volume: u64,
}

/// Aggregate figures over closed trades.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryStats {
    pub total_trades: usize,
    pub winning_trades: usize,
    pub losing_trades: usize,
    #[serde(rename = "totalPnL")]
    pub total_pnl: f64,
    pub win_rate: f64,
    pub avg_win: f64,
    /// Absolute value of the mean losing trade
    pub avg_loss: f64,
    pub profit_factor: f64,
}

/// Market session label reported with the signal list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MarketStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalsResponse {
    pub success: bool,
    pub signals: Vec<Signal>,
    /// Quotes the active signals were marked at
    pub current_prices: HashMap<String, f64>,
    /// Unrealized P&L over active signals
    #[serde(rename = "totalPnL")]
    pub total_pnl: f64,
    pub timestamp: DateTime<Utc>,
    pub market_status: MarketStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct CloseResponse {
    pub success: bool,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketResponse {
    pub success: bool,
    pub pair: String,
    pub data: Vec<Candle>,
    pub current_prices: HashMap<String, f64>,
    pub statistics: MarketStatistics,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryResponse {
    pub success: bool,
    pub trades: Vec<Signal>,
    pub stats: HistoryStats,
    pub timestamp: DateTime<Utc>,
}
