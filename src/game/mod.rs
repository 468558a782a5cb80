//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Front ends drive it through [`GameSession`] and receive [`GameView`] snapshots back.

pub mod config;
pub mod direction;
pub mod engine;
pub mod food;
pub mod grid;
pub mod session;
pub mod state;
pub mod view;

// Re-export commonly used types
pub use config::GameConfig;
pub use direction::{Command, Direction, ReversalPolicy};
pub use engine::{GameEngine, StepOutcome};
pub use food::FoodSpawner;
pub use grid::{Cell, Grid};
pub use session::{EndReason, GameSession, SessionState, TimerHandle};
pub use state::{CollisionType, GameState, Position, Snake};
pub use view::{GameView, LatestView, RenderSink};
