//! Identifier types shared by the IR and the emitter

use serde::{Deserialize, Serialize};

/// Temporary (register) identifier, unique within one IR function
pub type TempId = u32;

/// Basic block identifier, unique within one IR function
pub type LabelId = u32;

/// Generator for per-function identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    pub fn next_id(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Number of identifiers handed out so far
    pub fn issued(&self) -> u32 {
        self.next
    }
}
