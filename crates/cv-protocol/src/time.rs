//! Concrete time windows for event queries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An absolute time window passed to the event stream query.
///
/// `start <= end` is deliberately not enforced; the backend treats an
/// inverted window as an empty result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.start <= instant && instant <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn contains_is_inclusive() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let w = TimeWindow::new(start, end);
        assert!(w.contains(start));
        assert!(w.contains(end));
        assert!(!w.contains(end + chrono::Duration::seconds(1)));
    }

    #[test]
    fn inverted_window_contains_nothing() {
        let start = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let w = TimeWindow::new(start, end);
        assert!(!w.contains(start));
        assert!(!w.contains(end));
    }
}
