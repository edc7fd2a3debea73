// ---------------------------------------------------------------------------
// Selected tweets
// ---------------------------------------------------------------------------

/// Ordered set of selected tweet indices, most recently selected first.
///
/// Indices are stable record identities into the current dataset, so a
/// selection survives re-layouts and metric changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionSet {
    order: Vec<usize>,
}

impl SelectionSet {
    /// Flip membership of `index`. Returns `true` if it is now selected.
    pub fn toggle(&mut self, index: usize) -> bool {
        if let Some(pos) = self.order.iter().position(|&i| i == index) {
            self.order.remove(pos);
            false
        } else {
            self.order.insert(0, index);
            true
        }
    }

    pub fn contains(&self, index: usize) -> bool {
        self.order.contains(&index)
    }

    /// Indices, newest first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.order.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Drop everything; used when the underlying dataset is replaced.
    pub fn clear(&mut self) {
        self.order.clear();
    }
}
