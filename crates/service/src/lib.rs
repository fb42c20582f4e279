//! Service layer for the user registry.
//! - `loader` turns the raw users document into a collection, with fallbacks.
//! - `writer` derives ids and defaults for new records.
//! - `store` holds the collection behind the `UserStore` trait (memory or file).

pub mod errors;
pub mod loader;
pub mod writer;
pub mod store;
pub mod storage;
pub mod metrics;
pub mod runtime;
