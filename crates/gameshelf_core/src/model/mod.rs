//! Domain model for the game catalog.
//!
//! # Responsibility
//! - Define the canonical `Game` record used by all persistence layers.
//! - Own title validation rules shared by write and read paths.
//!
//! # Invariants
//! - Identity is the database-assigned integer id; `None` means unpersisted.
//! - Deletion is a hard delete; there are no tombstone rows.

pub mod game;
