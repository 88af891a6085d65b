/// State management module
///
/// This module handles all game state, including:
/// - Shared data structures (data.rs)
/// - The pair catalog and shuffling (catalog.rs)
/// - Per-round side assignment (round.rs)
/// - The game state machine (game.rs)
/// - End-of-game scoring (summary.rs)

pub mod catalog;
pub mod data;
pub mod game;
pub mod round;
pub mod summary;
