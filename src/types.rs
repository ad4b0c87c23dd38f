use serde::{Deserialize, Serialize};
use std::fmt;

/// The four jump directions a player can wager on.
///
/// This is both the player's selection space and the resolver's draw space;
/// presentation and resolution must share this set so labels and draws never
/// diverge. Ordering carries no meaning beyond display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Forward,
    Backward,
    Left,
    Right,
}

impl Category {
    /// Fixed ordered list of all categories.
    pub const ALL: [Category; 4] = [
        Category::Forward,
        Category::Backward,
        Category::Left,
        Category::Right,
    ];

    /// Parse a display label back into a category (case-insensitive).
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "forward" => Some(Category::Forward),
            "backward" => Some(Category::Backward),
            "left" => Some(Category::Left),
            "right" => Some(Category::Right),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Forward => write!(f, "forward"),
            Category::Backward => write!(f, "backward"),
            Category::Left => write!(f, "left"),
            Category::Right => write!(f, "right"),
        }
    }
}

/// A validated wager: category pick plus a stake already checked against the
/// balance. Created per round and consumed immediately by resolution; never
/// persisted standalone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Wager {
    pub category: Category,
    pub stake: u64,
}

/// Outcome of one resolved round, as persisted in the history log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundResult {
    /// Category the player picked.
    pub chosen: Category,
    /// Points staked on the round.
    pub stake: u64,
    /// Category the resolver drew.
    pub resolved: Category,
    /// Signed balance change: `stake * 2` on a match, `-stake` otherwise.
    pub points_delta: i64,
    /// Resolution time, epoch milliseconds.
    pub timestamp_ms: i64,
}

impl RoundResult {
    /// Whether the round was a win (draw matched the pick).
    pub fn is_win(&self) -> bool {
        self.chosen == self.resolved
    }
}
