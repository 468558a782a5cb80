//! Grid Snake - a single-player Snake game for the terminal
//!
//! This library provides:
//! - Core game logic and the session state machine (game module)
//! - TUI rendering (render module)
//! - Keyboard mapping (input module)
//! - The interactive terminal mode (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
