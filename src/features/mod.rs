//! Feature implementations for mindwell.
//!
//! - Timer engine for guided exercises and breathing patterns
//! - Exercise and pattern catalog
//! - Practice progress and history
//! - Mood journal
//! - Appointment slots

pub mod appointments;
pub mod catalog;
pub mod mood;
pub mod progress;
pub mod timer;
