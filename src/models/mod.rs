pub mod candle;
pub mod config;
pub mod pair;
pub mod result;
pub mod signal;
