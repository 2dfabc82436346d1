/// Flashcard position over a non-empty notebook.
///
/// Navigation saturates at both ends and never wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudyNavigator {
    index: usize,
    flipped: bool,
    len: usize,
}

impl StudyNavigator {
    /// `None` when there is nothing to study
    pub fn new(len: usize) -> Option<Self> {
        (len > 0).then_some(Self {
            index: 0,
            flipped: false,
            len,
        })
    }

    pub fn next(&mut self) {
        self.index = (self.index + 1).min(self.len - 1);
        self.flipped = false;
    }

    pub fn previous(&mut self) {
        self.index = self.index.saturating_sub(1);
        self.flipped = false;
    }

    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn len(&self) -> usize {
        self.len
    }

    /// Session for a notebook whose size changed. Restarts from the first card.
    pub fn resized(self, len: usize) -> Option<Self> {
        if len == self.len {
            return Some(self);
        }
        Self::new(len)
    }
}
