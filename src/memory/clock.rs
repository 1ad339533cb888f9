//! Relevance Clock Module
//!
//! Pure time-window comparison for relevance checks.

use chrono::Utc;

use crate::memory::Millis;

// == Now ==
/// Returns current Unix timestamp in milliseconds.
pub fn now_ms() -> Millis {
    Utc::now().timestamp_millis()
}

// == Is Relevant ==
/// Decides whether a recorded timestamp is still within the relevance window.
///
/// Boundary condition: elapsed time equal to the window counts as relevant
/// (inclusive comparison). A key that never had a timestamp recorded is
/// relevant by default.
///
/// # Arguments
/// * `recorded` - Timestamp recorded at save time, if any (milliseconds)
/// * `now` - Current time in milliseconds
/// * `window_secs` - Relevance window in seconds
pub fn is_relevant(recorded: Option<Millis>, now: Millis, window_secs: u64) -> bool {
    match recorded {
        Some(stamp) => now - stamp <= window_secs as Millis * 1000,
        None => true,
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unrecorded_is_relevant() {
        assert!(is_relevant(None, 0, 0));
        assert!(is_relevant(None, i64::MAX, 0));
    }

    #[test]
    fn test_within_window() {
        let now = 1_700_000_000_000;
        assert!(is_relevant(Some(now - 59_999), now, 60));
    }

    #[test]
    fn test_outside_window() {
        let now = 1_700_000_000_000;
        assert!(!is_relevant(Some(now - 60_001), now, 60));
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let now = 1_700_000_000_000;
        assert!(is_relevant(Some(now - 60_000), now, 60));
    }

    #[test]
    fn test_zeroed_stamp_is_stale() {
        // A timestamp zeroed by irrelevance marking lies a full epoch behind
        // any realistic clock, so no realistic window covers it.
        let now = 1_700_000_000_000;
        assert!(!is_relevant(Some(0), now, 3600));
    }

    #[test]
    fn test_now_ms_is_monotonic_enough() {
        let first = now_ms();
        let second = now_ms();
        assert!(second >= first);
    }
}
