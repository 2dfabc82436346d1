use wordbook_core::{LanguagePair, Notebook, StudyNavigator};
use wordbook_types::{ChatMessage, Seq, WordEntry};

/// Kinds of request whose completions may arrive out of order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Lookup,
    Tutor,
    Story,
}

/// Latest sequence number issued per operation kind.
///
/// A completion is applied only if it carries the latest number for its kind.
#[derive(Debug, Default)]
pub struct Sequencer {
    lookup: Seq,
    tutor: Seq,
    story: Seq,
}

impl Sequencer {
    pub fn issue(&mut self, kind: OpKind) -> Seq {
        let slot = self.slot(kind);
        *slot += 1;
        *slot
    }

    /// Makes every in-flight request of `kind` stale
    pub fn invalidate(&mut self, kind: OpKind) {
        self.issue(kind);
    }

    pub fn is_current(&self, kind: OpKind, seq: Seq) -> bool {
        let latest = match kind {
            OpKind::Lookup => self.lookup,
            OpKind::Tutor => self.tutor,
            OpKind::Story => self.story,
        };
        seq == latest
    }

    fn slot(&mut self, kind: OpKind) -> &mut Seq {
        match kind {
            OpKind::Lookup => &mut self.lookup,
            OpKind::Tutor => &mut self.tutor,
            OpKind::Story => &mut self.story,
        }
    }
}

/// Everything the controller knows. Owned by the event loop alone.
pub struct AppState {
    pub pair: Option<LanguagePair>,
    pub notebook: Notebook,
    /// Entry on screen outside of study mode
    pub current: Option<WordEntry>,
    /// Tutor conversation about the focused entry
    pub transcript: Vec<ChatMessage>,
    pub study: Option<StudyNavigator>,
    /// Last composed story, shown again when a new one cannot be written
    pub story: Option<String>,
    pub sequences: Sequencer,
}

impl AppState {
    pub fn new(pair: Option<LanguagePair>, notebook: Notebook) -> Self {
        Self {
            pair,
            notebook,
            current: None,
            transcript: Vec::new(),
            study: None,
            story: None,
            sequences: Sequencer::default(),
        }
    }

    /// Replace the displayed entry. Leaves study mode and drops the old conversation.
    pub fn show_entry(&mut self, entry: WordEntry) {
        self.current = Some(entry);
        self.study = None;
        self.reset_conversation();
    }

    /// Forget the previous result and its conversation
    pub fn begin_lookup(&mut self) {
        self.current = None;
        self.reset_conversation();
    }

    /// Drop the transcript and any reply still in flight
    pub fn reset_conversation(&mut self) {
        self.transcript.clear();
        self.sequences.invalidate(OpKind::Tutor);
    }

    /// Card under the study cursor, if studying
    pub fn card(&self) -> Option<&WordEntry> {
        self.study.and_then(|nav| self.notebook.get(nav.index()))
    }

    /// What `speak`, `save` and `ask` refer to
    pub fn focused_entry(&self) -> Option<&WordEntry> {
        self.card().or(self.current.as_ref())
    }

    /// Keep the study session consistent with the notebook size
    pub fn sync_study(&mut self) {
        let before = self.card().map(|entry| entry.id.clone());
        let len = self.notebook.len();
        self.study = self.study.and_then(|nav| nav.resized(len));
        if before.is_some() && before != self.card().map(|entry| entry.id.clone()) {
            self.reset_conversation();
        }
    }

    pub fn is_saved(&self, entry: &WordEntry) -> bool {
        self.notebook.contains(&entry.word)
    }
}
