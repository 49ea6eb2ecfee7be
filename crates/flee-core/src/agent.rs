use crate::Vec2;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The controlling agent as seen by decision tasks.
///
/// Tasks only need a stable identifier (for logs and traces) and the agent's current
/// world-space cursor position.
pub trait Agent {
    fn stable_id(&self) -> u64;
    fn cursor_position(&self) -> Vec2;
}

/// World-space cursor driven by an input device.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Cursor {
    position: Vec2,
}

impl Cursor {
    pub fn new(position: Vec2) -> Self {
        Self { position }
    }

    pub fn position(&self) -> Vec2 {
        self.position
    }

    pub fn move_to(&mut self, position: Vec2) {
        self.position = position;
    }
}

/// Minimal agent: an id plus the cursor it steers with.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Player {
    pub id: u64,
    pub cursor: Cursor,
}

impl Player {
    pub fn new(id: u64, position: Vec2) -> Self {
        Self {
            id,
            cursor: Cursor::new(position),
        }
    }
}

impl Agent for Player {
    fn stable_id(&self) -> u64 {
        self.id
    }

    fn cursor_position(&self) -> Vec2 {
        self.cursor.position()
    }
}
