//! Millisecond clock behind window ids and export file names.

use std::cell::Cell;

/// Last stamp handed out, so ids stay unique when the clock stalls or steps back.
#[derive(Debug, Default)]
struct StampLedger {
    last: Cell<Option<u64>>,
}

impl StampLedger {
    /// Issues `now`, or one past the previous stamp when `now` would not move forward.
    fn issue(&self, now: u64) -> u64 {
        let stamp = match self.last.get() {
            Some(previous) if now <= previous => previous.saturating_add(1),
            _ => now,
        };
        self.last.set(Some(stamp));
        stamp
    }
}

thread_local! {
    static WINDOW_STAMPS: StampLedger = StampLedger::default();
}

/// Wall clock in unix milliseconds. Clock errors read as `0`.
pub fn unix_time_ms_now() -> u64 {
    host_clock_ms()
}

#[cfg(target_arch = "wasm32")]
fn host_clock_ms() -> u64 {
    let ms = js_sys::Date::now();
    if ms.is_finite() && ms > 0.0 {
        ms as u64
    } else {
        0
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn host_clock_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or(0)
}

/// Unix-millisecond stamp that is strictly increasing on the calling thread.
///
/// Seeds `win_<n>` window ids, so two windows opened in the same millisecond still differ.
pub fn next_monotonic_timestamp_ms() -> u64 {
    WINDOW_STAMPS.with(|stamps| stamps.issue(unix_time_ms_now()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn stalled_or_rewound_clock_still_advances() {
        let ledger = StampLedger::default();
        assert_eq!(ledger.issue(0), 0);
        assert_eq!(ledger.issue(0), 1);
        assert_eq!(ledger.issue(500), 500);
        assert_eq!(ledger.issue(500), 501);
        assert_eq!(ledger.issue(120), 502);
        assert_eq!(ledger.issue(9_000), 9_000);
    }

    #[test]
    fn thread_stamps_never_repeat() {
        let first = next_monotonic_timestamp_ms();
        let second = next_monotonic_timestamp_ms();
        assert!(first < second);
    }
}
