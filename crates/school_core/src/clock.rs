//! Time source and id allocation.

use chrono::{DateTime, SecondsFormat, Utc};

/// Wall-clock source used for ids, timestamps and default dates.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;

    fn now_millis(&self) -> i64 {
        self.now().timestamp_millis()
    }

    /// RFC 3339 UTC instant with millisecond precision.
    fn timestamp(&self) -> String {
        self.now().to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// Current UTC calendar day, `YYYY-MM-DD`.
    fn today(&self) -> String {
        self.now().format("%Y-%m-%d").to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock frozen at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    pub fn from_millis(epoch_ms: i64) -> Self {
        Self(DateTime::<Utc>::from_timestamp_millis(epoch_ms).unwrap_or_default())
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Hands out creation-time ids that strictly increase within a session.
///
/// Ids are the current epoch milliseconds, bumped past the last id handed
/// out and past `floor` (the largest id already in the target collection).
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn next(&mut self, now_ms: i64, floor: Option<i64>) -> i64 {
        let minimum = self.last.max(floor.unwrap_or(i64::MIN)).saturating_add(1);
        let id = now_ms.max(minimum);
        self.last = id;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, FixedClock, IdGenerator};

    #[test]
    fn fixed_clock_formats_day_and_timestamp() {
        let clock = FixedClock::from_millis(1_792_281_600_123);
        assert_eq!(clock.today(), "2026-10-18");
        assert_eq!(clock.timestamp(), "2026-10-18T00:00:00.123Z");
    }

    #[test]
    fn ids_stay_unique_within_one_instant() {
        let mut ids = IdGenerator::default();
        let first = ids.next(1_000, None);
        let second = ids.next(1_000, None);
        assert_eq!(first, 1_000);
        assert_eq!(second, 1_001);
    }

    #[test]
    fn ids_skip_past_existing_floor() {
        let mut ids = IdGenerator::default();
        assert_eq!(ids.next(1_000, Some(5_000)), 5_001);
    }
}
