/// Shared data structures for the game state
///
/// These structs represent the data model that flows between
/// the catalog, the game state machine and the UI layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One labeled comparison unit: the same subject shot on both devices
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhotoPair {
    /// Unique catalog ID
    pub id: u32,
    /// Filename of the phone shot (e.g., "vase iphone.jpg")
    #[serde(rename = "deviceA_file", alias = "iphone")]
    pub phone_file: String,
    /// Filename of the full-frame shot (e.g., "vase sony.jpg")
    #[serde(rename = "deviceB_file", alias = "sony")]
    pub full_frame_file: String,
    /// Subject label shown during the round
    pub category: String,
}

/// A screen side. A is the left photo, B the right one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => write!(f, "A"),
            Side::B => write!(f, "B"),
        }
    }
}

/// Which file is shown on which side for one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundPresentation {
    pub left_file: String,
    pub right_file: String,
    /// The side holding the phone shot (the correct answer)
    pub phone_side: Side,
}

impl RoundPresentation {
    /// File shown on the given side
    pub fn file_on(&self, side: Side) -> &str {
        match side {
            Side::A => &self.left_file,
            Side::B => &self.right_file,
        }
    }
}

/// Outcome of one answered round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundResult {
    pub pair_id: u32,
    pub was_correct: bool,
    pub user_choice: Side,
    pub correct_choice: Side,
}

/// Progress of the current session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    /// Position in the active pair set
    pub current_index: usize,
    /// Number of correct answers so far
    pub score: u32,
    pub is_game_over: bool,
    /// One entry per answered round, in play order
    pub history: Vec<RoundResult>,
}
