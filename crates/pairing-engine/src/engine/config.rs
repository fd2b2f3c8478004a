use serde::{Deserialize, Serialize};

use crate::core::DEFAULT_SECTION_SIZE;

/// Exercise configuration supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameConfig {
    section_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            section_size: DEFAULT_SECTION_SIZE,
        }
    }
}

impl GameConfig {
    #[must_use]
    pub const fn new(section_size: usize) -> Self {
        Self { section_size }
    }

    /// Words per section, never less than 1.
    #[must_use]
    pub const fn section_size(&self) -> usize {
        if self.section_size == 0 {
            1
        } else {
            self.section_size
        }
    }
}
