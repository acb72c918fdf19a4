//! Driven adapters: PostgreSQL persistence and the in-process store.

pub mod memory;
pub mod persistence;
