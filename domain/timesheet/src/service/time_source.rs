use chrono::{DateTime, Utc};

/// Server side clock, every ledger timestamp comes from here.
pub trait TimeSource: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
