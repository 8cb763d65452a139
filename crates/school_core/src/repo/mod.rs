//! Collection-level persistence over a key-value store.
//!
//! # Responsibility
//! - Map each record collection to its persisted key.
//! - Keep JSON encoding details out of the session layer.
//!
//! # Invariants
//! - Loads never fail; they fall back to empty collections, `0` and `false`.
//! - Saves overwrite the whole collection.

pub mod school_repo;
