//! Shared helpers.

pub mod token_hash;
