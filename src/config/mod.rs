//! Configuration management for studybreak.
//!
//! This module handles loading and saving configuration from `~/.studybreak/`.

mod paths;
mod settings;

pub use paths::Paths;
pub use settings::{AudioConfig, Config, MessagesConfig, TimerConfig};
