//! Optional timing metrics, enabled via DIFF_EXPLORE_METRICS=1.
//!
//! Measurements are reported through `log::debug!`, so they only show up
//! when logging is enabled as well.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

static METRICS_ENABLED: AtomicBool = AtomicBool::new(false);

/// Initialize metrics from environment. Call once at startup.
pub fn init() {
    let enabled = std::env::var("DIFF_EXPLORE_METRICS")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);
    set_enabled(enabled);
}

/// Turn metrics on or off.
pub fn set_enabled(enabled: bool) {
    METRICS_ENABLED.store(enabled, Ordering::Relaxed);
}

/// Check if metrics collection is enabled.
#[inline]
pub fn enabled() -> bool {
    METRICS_ENABLED.load(Ordering::Relaxed)
}

/// RAII timer that logs duration on drop.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Start a timer if metrics are enabled.
    #[inline]
    pub fn start(label: &'static str) -> Option<Self> {
        if enabled() {
            Some(Self {
                label,
                start: Instant::now(),
            })
        } else {
            None
        }
    }

    /// Time since the timer started.
    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        log_metric(self.label, self.start.elapsed());
    }
}

fn log_metric(label: &str, duration: Duration) {
    log::debug!(target: "metrics", "{}: {:?}", label, duration);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_follows_enabled_flag() {
        set_enabled(false);
        assert!(Timer::start("off").is_none());
        set_enabled(true);
        let timer = Timer::start("on");
        assert!(timer.is_some());
        assert!(timer.map(|t| t.elapsed()).unwrap_or_default() < Duration::from_secs(5));
        set_enabled(false);
    }
}
