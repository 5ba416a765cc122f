use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Category label attached to a synthesized signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalType {
    #[serde(rename = "Liquidity Sweep")]
    LiquiditySweep,
    #[serde(rename = "Bank Entry")]
    BankEntry,
    #[serde(rename = "Institutional Flow")]
    InstitutionalFlow,
    #[serde(rename = "Smart Money")]
    SmartMoney,
}

impl SignalType {
    pub const ALL: [SignalType; 4] = [
        SignalType::LiquiditySweep,
        SignalType::BankEntry,
        SignalType::InstitutionalFlow,
        SignalType::SmartMoney,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SignalType::LiquiditySweep => "Liquidity Sweep",
            SignalType::BankEntry => "Bank Entry",
            SignalType::InstitutionalFlow => "Institutional Flow",
            SignalType::SmartMoney => "Smart Money",
        }
    }
}

impl std::fmt::Display for SignalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle of a signal. Only `Active` signals have a moving P&L.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalStatus {
    Active,
    Completed,
    Stopped,
}

/// One synthesized trade idea.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Signal {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    pub signal_type: SignalType,
    pub pair: String,
    pub entry_price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    /// Profit distance over stop distance, fixed at creation.
    pub risk_reward_ratio: f64,
    /// Percentage in [85, 100).
    pub confidence: f64,
    pub status: SignalStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pnl: Option<f64>,
}

impl Signal {
    pub fn is_active(&self) -> bool {
        self.status == SignalStatus::Active
    }

    /// Freeze an externally decided P&L. Losses end as `Stopped`.
    ///
    /// Returns false when the signal was already closed; its P&L is left untouched.
    pub fn close(&mut self, pnl: f64) -> bool {
        if !self.is_active() {
            return false;
        }
        self.status = if pnl >= 0.0 {
            SignalStatus::Completed
        } else {
            SignalStatus::Stopped
        };
        self.pnl = Some(pnl);
        true
    }

    /// P&L of a closed signal, zero while still active or when never recorded.
    pub fn realized_pnl(&self) -> f64 {
        if self.is_active() {
            0.0
        } else {
            self.pnl.unwrap_or(0.0)
        }
    }
}
