//! Expand/collapse state of FAQ entries.
//!
//! State is keyed by the entry's position in the content store, so it stays
//! attached to the right question while the search filter hides and shows
//! entries. Entries toggle independently of each other.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FaqToggles {
    expanded: Vec<bool>,
}

impl FaqToggles {
    /// All `count` entries start collapsed.
    pub fn new(count: usize) -> Self {
        Self {
            expanded: vec![false; count],
        }
    }

    pub fn len(&self) -> usize {
        self.expanded.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expanded.is_empty()
    }

    /// Flip one entry. Returns the new state, or `None` for an unknown index.
    pub fn toggle(&mut self, index: usize) -> Option<bool> {
        let slot = self.expanded.get_mut(index)?;
        *slot = !*slot;
        Some(*slot)
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.get(index).copied().unwrap_or(false)
    }

    pub fn expand_all(&mut self) {
        self.expanded.iter_mut().for_each(|e| *e = true);
    }
}
