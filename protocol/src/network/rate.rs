//! The fee-rate collaborator.
//!
//! The Factoid-per-Entry-Credit exchange rate changes over time and is
//! owned by the ledger. Signing asks a [`RateSource`] for the current rate;
//! callers decide where that comes from (a node query, a cached value, a
//! fixed number in tests).

use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RateError {
    #[error("exchange rate unavailable: {0}")]
    Unavailable(String),
}

/// Supplies the current Factoid-per-EC exchange rate.
pub trait RateSource: Send + Sync {
    fn rate(&self) -> Result<u64, RateError>;
}

/// A rate held in memory. Adjustable at runtime.
#[derive(Debug, Default)]
pub struct FixedRate {
    rate: AtomicU64,
}

impl FixedRate {
    pub fn new(rate: u64) -> Self {
        Self {
            rate: AtomicU64::new(rate),
        }
    }

    pub fn set(&self, rate: u64) {
        self.rate.store(rate, Ordering::Relaxed);
    }
}

impl RateSource for FixedRate {
    fn rate(&self) -> Result<u64, RateError> {
        Ok(self.rate.load(Ordering::Relaxed))
    }
}

impl<F> RateSource for F
where
    F: Fn() -> Result<u64, RateError> + Send + Sync,
{
    fn rate(&self) -> Result<u64, RateError> {
        self()
    }
}
