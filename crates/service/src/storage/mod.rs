//! Storage abstractions for service layer
//!
//! Contains the file-backed document holder used by the file user store.

pub mod json_doc_store;
