use chrono::Utc;
use signal_desk_lib::models::signal::{Signal, SignalStatus, SignalType};
use signal_desk_lib::{
    calculate_pnl, format_currency, format_price, generate_market_data, generate_random_price,
    generate_trading_signal,
};

fn worked_example() -> Signal {
    Signal {
        id: "SIG_EXAMPLE".into(),
        timestamp: Utc::now(),
        signal_type: SignalType::SmartMoney,
        pair: "EUR/USD".into(),
        entry_price: 1.1000,
        stop_loss: 1.0990,
        take_profit: 1.1050,
        risk_reward_ratio: 5.0,
        confidence: 95.0,
        status: SignalStatus::Active,
        pnl: None,
    }
}

#[test]
fn pnl_at_target_is_fifty_pips() {
    assert_eq!(calculate_pnl(&worked_example(), 1.1050), 500.0);
}

#[test]
fn pnl_is_frozen_once_closed() {
    let mut signal = worked_example();
    signal.close(-73.2);
    let first = calculate_pnl(&signal, 1.2);
    let second = calculate_pnl(&signal, 0.9);
    assert_eq!(first, -73.2);
    assert_eq!(first, second);
}

#[test]
fn formatting_examples() {
    assert_eq!(format_price(149.5, "USD/JPY"), "149.500");
    assert_eq!(format_price(1.085, "EUR/USD"), "1.08500");
    assert_eq!(format_currency(-42.5), "-$42.50");
}

#[test]
fn random_signals_and_candles_hold_shape() {
    for _ in 0..200 {
        let s = generate_trading_signal();
        assert!(s.stop_loss < s.entry_price && s.entry_price < s.take_profit);
        assert!((85.0..100.0).contains(&s.confidence));
        assert_eq!(s.status, SignalStatus::Active);
    }

    let candles = generate_market_data("NZD/USD", 6);
    assert_eq!(candles.len(), 6 * 12 + 1);
    assert!(candles.iter().all(|c| c.is_consistent()));

    let p = generate_random_price(0.8750, 0.001);
    assert!(p >= 0.8750 * 0.999 - 1e-5 && p <= 0.8750 * 1.001 + 1e-5);
}
