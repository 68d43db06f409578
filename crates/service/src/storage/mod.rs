//! Storage abstractions for service layer
//!
//! Contains reusable file-backed stores used by the persistent backends.

pub mod json_map_store;
