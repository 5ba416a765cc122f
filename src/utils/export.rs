use std::path::Path;

use crate::errors::AppError;
use crate::models::candle::Candle;
use crate::models::result::HistoryStats;
use crate::models::signal::Signal;
use crate::utils::format::{format_currency, format_price};

/// Write signals to a CSV file, prices quoted at their pair's precision.
pub fn write_signals_csv(signals: &[Signal], path: &Path) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::FileWrite(format!("Cannot create CSV: {}", e)))?;

    wtr.write_record([
        "ID",
        "Time",
        "Type",
        "Pair",
        "Entry",
        "Stop Loss",
        "Take Profit",
        "R:R",
        "Confidence %",
        "Status",
        "P&L",
    ])?;

    for s in signals {
        wtr.write_record([
            s.id.clone(),
            s.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            s.signal_type.to_string(),
            s.pair.clone(),
            format_price(s.entry_price, &s.pair),
            format_price(s.stop_loss, &s.pair),
            format_price(s.take_profit, &s.pair),
            format!("{:.2}", s.risk_reward_ratio),
            format!("{:.1}", s.confidence),
            format!("{:?}", s.status),
            s.pnl.map(|p| format!("{:.2}", p)).unwrap_or_default(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write a candle batch for one pair.
pub fn write_candles_csv(candles: &[Candle], pair: &str, path: &Path) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::FileWrite(format!("Cannot create CSV: {}", e)))?;

    wtr.write_record(["Time", "Open", "High", "Low", "Close", "Volume"])?;

    for c in candles {
        wtr.write_record([
            c.timestamp.format("%Y-%m-%d %H:%M").to_string(),
            format_price(c.open, pair),
            format_price(c.high, pair),
            format_price(c.low, pair),
            format_price(c.close, pair),
            c.volume.to_string(),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write history statistics as a key-value report.
pub fn write_history_stats_csv(stats: &HistoryStats, path: &Path) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::FileWrite(format!("Cannot create CSV: {}", e)))?;

    wtr.write_record(["Metric", "Value"])?;

    let rows: Vec<(&str, String)> = vec![
        ("Total Trades", stats.total_trades.to_string()),
        ("Winning Trades", stats.winning_trades.to_string()),
        ("Losing Trades", stats.losing_trades.to_string()),
        ("Total P&L", format_currency(stats.total_pnl)),
        ("Win Rate %", format!("{:.1}", stats.win_rate)),
        ("Avg Win", format_currency(stats.avg_win)),
        ("Avg Loss", format_currency(stats.avg_loss)),
        ("Profit Factor", format!("{:.2}", stats.profit_factor)),
    ];

    for (name, value) in &rows {
        wtr.write_record([*name, value.as_str()])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::signal::{SignalStatus, SignalType};
    use chrono::{TimeZone, Utc};

    fn signal(pair: &str, entry: f64, pnl: Option<f64>) -> Signal {
        Signal {
            id: "SIG_1".into(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap(),
            signal_type: SignalType::InstitutionalFlow,
            pair: pair.into(),
            entry_price: entry,
            stop_loss: entry * 0.999,
            take_profit: entry * 1.005,
            risk_reward_ratio: 5.0,
            confidence: 93.25,
            status: if pnl.is_some() {
                SignalStatus::Completed
            } else {
                SignalStatus::Active
            },
            pnl,
        }
    }

    #[test]
    fn test_write_signals_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signals.csv");
        let signals = vec![signal("USD/JPY", 149.5, Some(120.5)), signal("EUR/USD", 1.085, None)];
        write_signals_csv(&signals, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("ID,Time,Type,Pair"));
        assert!(lines[1].contains("149.500"));
        assert!(lines[1].contains("Institutional Flow"));
        assert!(lines[1].ends_with("Completed,120.50"));
        assert!(lines[2].contains("1.08500"));
        assert!(lines[2].ends_with("Active,"));
    }

    #[test]
    fn test_write_candles_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("candles.csv");
        let candles = vec![Candle {
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap(),
            open: 1.085,
            high: 1.0855,
            low: 1.0849,
            close: 1.0852,
            volume: 4200,
        }];
        write_candles_csv(&candles, "EUR/USD", &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Time,Open,High,Low,Close,Volume");
        assert_eq!(lines[1], "2024-03-01 12:00,1.08500,1.08550,1.08490,1.08520,4200");
    }

    #[test]
    fn test_write_history_stats_csv() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.csv");
        let stats = HistoryStats {
            total_trades: 4,
            winning_trades: 3,
            losing_trades: 1,
            total_pnl: 1250.0,
            win_rate: 75.0,
            avg_win: 450.0,
            avg_loss: 100.0,
            profit_factor: 4.5,
        };
        write_history_stats_csv(&stats, &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("Total P&L,\"$1,250.00\""));
        assert!(content.contains("Profit Factor,4.50"));
    }

    #[test]
    fn test_write_to_missing_directory_fails() {
        let path = Path::new("/nonexistent/dir/signals.csv");
        let err = write_signals_csv(&[], path).unwrap_err();
        assert!(matches!(err, AppError::FileWrite(_)));
    }
}
