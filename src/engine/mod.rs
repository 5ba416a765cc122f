pub mod feed;
pub mod history;
pub mod market;
pub mod pnl;
pub mod synth;

#[cfg(test)]
pub(crate) mod testing;
