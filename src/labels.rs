//! Sorted label sets and their dense index maps.
//!
//! Hidden states and observation symbols are arbitrary integers. Matrices are
//! indexed densely, so each label set is materialised once as a sorted,
//! deduplicated list and the position in that list *is* the index. Sorting
//! keeps row/column order reproducible across runs on identical input.

/// A hidden-state or observation label as it appears in the input files.
pub type Label = i64;

/// Sorted bijection `Label <-> [0, len)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelIndex {
    labels: Vec<Label>,
}

impl LabelIndex {
    /// Build an index from any collection of labels (duplicates allowed).
    pub fn from_labels<I>(labels: I) -> Self
    where
        I: IntoIterator<Item = Label>,
    {
        let mut labels: Vec<Label> = labels.into_iter().collect();
        labels.sort_unstable();
        labels.dedup();
        Self { labels }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Dense index of `label`, or `None` if the label was never seen.
    #[inline]
    pub fn index_of(&self, label: Label) -> Option<usize> {
        self.labels.binary_search(&label).ok()
    }

    /// Label stored at dense index `index`.
    ///
    /// # Panics
    /// Panics if `index >= self.len()`.
    #[inline]
    pub fn label_at(&self, index: usize) -> Label {
        self.labels[index]
    }

    #[inline]
    pub fn contains(&self, label: Label) -> bool {
        self.index_of(label).is_some()
    }

    /// All labels in ascending order.
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    pub fn iter(&self) -> impl Iterator<Item = Label> + '_ {
        self.labels.iter().copied()
    }
}

impl FromIterator<Label> for LabelIndex {
    fn from_iter<I: IntoIterator<Item = Label>>(iter: I) -> Self {
        Self::from_labels(iter)
    }
}
