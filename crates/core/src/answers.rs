/// Sparse record of the option chosen for each question of a session.
///
/// `None` means unanswered, which keeps "unanswered" distinct from
/// "answered with option 0".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AnswerSheet {
    selected: Vec<Option<usize>>,
}

impl AnswerSheet {
    /// An empty sheet sized for `len` questions.
    #[must_use]
    pub fn with_len(len: usize) -> Self {
        Self {
            selected: vec![None; len],
        }
    }

    /// Build a sheet from explicit entries.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = Option<usize>>) -> Self {
        Self {
            selected: entries.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<usize> {
        self.selected.get(index).copied().flatten()
    }

    #[must_use]
    pub fn is_answered(&self, index: usize) -> bool {
        self.get(index).is_some()
    }

    /// Record `option` for `index` unless already answered.
    ///
    /// Returns `true` when the answer was stored. Indexes beyond the sheet grow it.
    pub fn record(&mut self, index: usize, option: usize) -> bool {
        if index >= self.selected.len() {
            self.selected.resize(index + 1, None);
        }
        let slot = &mut self.selected[index];
        if slot.is_some() {
            return false;
        }
        *slot = Some(option);
        true
    }

    /// Number of questions with an answer recorded.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.selected.iter().filter(|entry| entry.is_some()).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.answered_count() == 0
    }

    pub fn clear(&mut self) {
        self.selected.iter_mut().for_each(|entry| *entry = None);
    }

    pub fn iter(&self) -> impl Iterator<Item = Option<usize>> + '_ {
        self.selected.iter().copied()
    }
}
