//! Migration definition and run direction.

use std::fmt;

use crate::checksum::script_checksum;

/// A named pair of forward ("up") and backward ("down") schema-change
/// scripts.
///
/// The name doubles as sort key and identity, so the recommended format is
/// a zero-padded sequence prefix such as `001_create_table_user`. Scripts
/// are opaque text; they are handed to the store unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Migration {
    pub name: String,
    pub up: String,
    pub down: String,
}

impl Migration {
    pub fn new(
        name: impl Into<String>,
        up: impl Into<String>,
        down: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            up: up.into(),
            down: down.into(),
        }
    }

    /// Content digest stored in the ledger when this migration is applied.
    ///
    /// A later edit to either script changes the digest, which is how
    /// drift is detected.
    pub fn checksum(&self) -> String {
        script_checksum(&self.up, &self.down)
    }

    /// The script for one run direction.
    pub fn script(&self, direction: Direction) -> &str {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
        }
    }
}

/// Run direction: `Up` applies forward scripts in ascending name order,
/// `Down` reverses them in descending name order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn is_up(self) -> bool {
        matches!(self, Direction::Up)
    }

    /// Uppercase tag for per-migration log lines.
    pub fn tag(self) -> &'static str {
        match self {
            Direction::Up => "UP",
            Direction::Down => "DOWN",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
        }
    }
}
