use chrono::{DateTime, Utc};

/// Source of wall-clock time for response payloads.
pub trait Clock: Send + Sync {
    fn now(&self) -> anyhow::Result<DateTime<Utc>>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> anyhow::Result<DateTime<Utc>> {
        Ok(Utc::now())
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> anyhow::Result<DateTime<Utc>> {
        Ok(self.0)
    }
}
