//! Transition-related event payload types

use serde::{Deserialize, Serialize};

/// Direction of a slide transition
///
/// Forward: the incoming slide enters from the "next" side.
/// Backward: the incoming slide enters from the "previous" side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Forward,
    Backward,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Forward => write!(f, "forward"),
            Direction::Backward => write!(f, "backward"),
        }
    }
}
