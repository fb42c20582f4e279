//! Process uptime tracking.

use std::time::Instant;

use once_cell::sync::Lazy;

static STARTED_AT: Lazy<Instant> = Lazy::new(Instant::now);

/// Pin the start instant. Call early in `main` so uptime covers startup.
pub fn mark_started() {
    Lazy::force(&STARTED_AT);
}

/// Seconds elapsed since `mark_started` (or the first uptime query).
pub fn uptime_secs() -> f64 {
    STARTED_AT.elapsed().as_secs_f64()
}
