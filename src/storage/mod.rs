//! Storage layer for mindwell.
//!
//! This module provides SQLite-based persistence for:
//! - Aggregate practice progress
//! - Completed practice session history
//! - Mood journal entries

mod database;
mod migrations;

pub use database::Database;
