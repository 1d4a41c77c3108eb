//! Caret positions in linear offset space
//!
//! A caret saved before a rebuild is just a pair of offsets into the
//! flattened content text. It carries no node identity, so it survives the
//! old tree being thrown away.

use serde::{Deserialize, Serialize};

/// Index into the flattened content text of a rendered tree
pub type LinearOffset = usize;

/// A caret or selection as a (start, end) pair of linear offsets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SavedSelection {
    pub start: LinearOffset,
    pub end: LinearOffset,
}

impl SavedSelection {
    /// Create a selection, ordering the two ends
    pub fn new(a: LinearOffset, b: LinearOffset) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    /// A caret with no extent
    pub fn collapsed(at: LinearOffset) -> Self {
        Self { start: at, end: at }
    }

    /// Check if this is a bare caret (start == end)
    pub fn is_collapsed(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_orders_ends() {
        let sel = SavedSelection::new(9, 3);
        assert_eq!(sel.start, 3);
        assert_eq!(sel.end, 9);
    }

    #[test]
    fn test_collapsed() {
        let sel = SavedSelection::collapsed(4);
        assert!(sel.is_collapsed());
        assert!(!SavedSelection::new(1, 2).is_collapsed());
    }
}
