// LogTally - util/timing.rs
//
// Wall-clock timing for operations that may re-enter themselves.
// Only the outermost call is measured; nested calls run untimed.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Measures the outermost invocation of a possibly recursive operation.
///
/// Wrap each call site with [`OutermostTimer::run`]. Re-entrant calls made
/// from inside the closure share the same timer, so only the top-level call
/// records and logs a duration.
#[derive(Debug)]
pub struct OutermostTimer {
    label: &'static str,
    depth: Cell<u32>,
    last_elapsed: Cell<Option<Duration>>,
}

impl OutermostTimer {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            depth: Cell::new(0),
            last_elapsed: Cell::new(None),
        }
    }

    /// Run `op`, timing it if no other `run` on this timer is in progress.
    pub fn run<T>(&self, op: impl FnOnce() -> T) -> T {
        let outermost = self.depth.get() == 0;
        self.depth.set(self.depth.get() + 1);

        let start = outermost.then(Instant::now);
        let result = op();

        self.depth.set(self.depth.get() - 1);

        if let Some(start) = start {
            let elapsed = start.elapsed();
            self.last_elapsed.set(Some(elapsed));
            tracing::debug!(
                operation = self.label,
                elapsed_us = elapsed.as_micros() as u64,
                "Operation completed"
            );
        }

        result
    }

    /// Duration of the most recent outermost call, if any finished.
    pub fn last_elapsed(&self) -> Option<Duration> {
        self.last_elapsed.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn countdown(timer: &OutermostTimer, n: u32, calls: &Cell<u32>) -> u32 {
        timer.run(|| {
            calls.set(calls.get() + 1);
            if n == 0 {
                0
            } else {
                1 + countdown(timer, n - 1, calls)
            }
        })
    }

    #[test]
    fn test_no_measurement_before_first_call() {
        let timer = OutermostTimer::new("noop");
        assert!(timer.last_elapsed().is_none());
    }

    #[test]
    fn test_recursive_calls_measured_once_and_depth_restored() {
        let timer = OutermostTimer::new("countdown");
        let calls = Cell::new(0);
        assert_eq!(countdown(&timer, 5, &calls), 5);
        assert_eq!(calls.get(), 6);
        assert!(timer.last_elapsed().is_some());
        assert_eq!(timer.depth.get(), 0);
    }

    #[test]
    fn test_result_passes_through() {
        let timer = OutermostTimer::new("value");
        let value: Result<u8, &str> = timer.run(|| Err("nope"));
        assert_eq!(value, Err("nope"));
    }
}
