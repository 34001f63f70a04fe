//! The three ideological axes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three worldview categories.
///
/// Declaration order is significant: it is the fixed PreModern, Modern,
/// PostModern order used for tie-breaks and for the remainder adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axis {
    PreModern,
    Modern,
    PostModern,
}

impl Axis {
    /// All axes in canonical order.
    pub const ALL: [Axis; 3] = [Axis::PreModern, Axis::Modern, Axis::PostModern];

    /// Position of this axis in canonical order.
    pub fn index(&self) -> usize {
        match self {
            Axis::PreModern => 0,
            Axis::Modern => 1,
            Axis::PostModern => 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Axis::PreModern => "PreModern",
            Axis::Modern => "Modern",
            Axis::PostModern => "PostModern",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_follow_canonical_order() {
        for (i, axis) in Axis::ALL.iter().enumerate() {
            assert_eq!(axis.index(), i);
        }
    }

    #[test]
    fn serializes_as_category_name() {
        assert_eq!(serde_json::to_string(&Axis::PostModern).unwrap(), "\"PostModern\"");
        assert_eq!(Axis::Modern.to_string(), "Modern");
    }
}
