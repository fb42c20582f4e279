use once_cell::sync::Lazy;
use prometheus::{register_int_counter, register_int_counter_vec, IntCounter, IntCounterVec};

// Prometheus metrics (default registry)
pub static STORE_LOADS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "user_store_loads_total",
        "Total loads of the users source"
    )
    .expect("register user_store_loads_total")
});

pub static STORE_FALLBACKS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    register_int_counter_vec!(
        "user_store_fallbacks_total",
        "Loads that fell back to the seed or an empty list, by reason",
        &["reason"]
    )
    .expect("register user_store_fallbacks_total")
});

pub static USERS_CREATED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "users_created_total",
        "Total users appended to the collection"
    )
    .expect("register users_created_total")
});

pub static PERSIST_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "user_store_persist_failures_total",
        "Writes of the users document that failed"
    )
    .expect("register user_store_persist_failures_total")
});

/// Force registration so every series shows up on the first scrape.
pub fn init() {
    Lazy::force(&STORE_LOADS_TOTAL);
    Lazy::force(&STORE_FALLBACKS_TOTAL);
    Lazy::force(&USERS_CREATED_TOTAL);
    Lazy::force(&PERSIST_FAILURES_TOTAL);
}
