//! studybreak - a study/break timer for the terminal
//!
//! This crate provides a session controller that alternates study and break
//! countdowns, plays study music and a break playlist, and interrupts now and
//! then with an appreciation card. A ratatui front end and a headless
//! simulator drive the same controller.

#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod session;
pub mod tui;

pub use cli::args::{Cli, Commands, OutputFormat};
pub use error::StudyError;
pub use session::SessionController;
