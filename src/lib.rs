//! mindwell - guided breathing and meditation in the terminal
//!
//! This crate provides a timer engine for guided exercises and cyclical
//! breathing patterns, plus progress tracking, a mood journal and a
//! terminal player.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod features;
pub mod logging;
pub mod output;
pub mod storage;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::MindwellError;
pub use features::timer::{TimerEngine, TimerSnapshot};
