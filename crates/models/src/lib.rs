//! Data model for the user registry: records, the persisted envelope and the
//! default seed.

pub mod user;
