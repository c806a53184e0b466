// Definitions that are used throughout all modules

use serde::{Deserialize, Serialize};

// Enumeration to track the space type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Space {
    Real,
    Reciprocal,
}

impl Space {
    /// The space whose basis is dual to this one.
    pub fn dual(self) -> Space {
        match self {
            Space::Real => Space::Reciprocal,
            Space::Reciprocal => Space::Real,
        }
    }
}
