use std::{
    collections::HashSet,
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    Deserialize,
    Serialize,
};

use super::WordhuntError;

/// The schema every session targets once it has been built or upgraded.
pub const LATEST_FORMAT_VERSION: u32 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WordState {
    #[default]
    Unmarked,
    Known,
    Unknown,
}

impl WordState {
    pub fn is_marked(self) -> bool {
        !matches!(self, WordState::Unmarked)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordEntry {
    identifier: String,
    use_count: u32,
    uses: Vec<String>,
    state: WordState,
}

impl WordEntry {
    pub fn new(identifier: String, use_count: u32, uses: Vec<String>, state: WordState) -> Self {
        WordEntry { identifier, use_count, uses, state }
    }

    pub(crate) fn first_use(identifier: &str, context: Option<&str>) -> Self {
        WordEntry {
            identifier: identifier.to_string(),
            use_count: 1,
            uses: context.map(|c| vec![c.to_string()]).unwrap_or_default(),
            state: WordState::Unmarked,
        }
    }

    pub(crate) fn record_use(&mut self, context: Option<&str>) {
        self.use_count += 1;
        if let Some(context) = context {
            self.uses.push(context.to_string());
        }
    }

    pub(crate) fn replace_identifier(&mut self, identifier: &str) {
        self.identifier = identifier.to_string();
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    pub fn use_count(&self) -> u32 {
        self.use_count
    }

    pub fn uses(&self) -> &[String] {
        &self.uses
    }

    pub fn state(&self) -> WordState {
        self.state
    }

    fn same_structure(&self, other: &WordEntry) -> bool {
        self.identifier == other.identifier && self.use_count == other.use_count
    }
}

/// Result of marking a word: callers use it to update progress displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub index: usize,
    pub previous: WordState,
    pub current: WordState,
}

impl StateTransition {
    pub fn is_change(&self) -> bool {
        self.previous != self.current
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    name: String,
    format_version: u32,
    words: Vec<WordEntry>,
}

impl Session {
    /// Builds a session from already ordered words, rejecting any that break the model invariants.
    pub fn try_new(name: impl Into<String>, words: Vec<WordEntry>) -> Result<Self, WordhuntError> {
        validate_words(&words)?;

        Ok(Self::from_valid_words(name.into(), words))
    }

    pub(crate) fn from_valid_words(name: String, words: Vec<WordEntry>) -> Self {
        Session { name, format_version: LATEST_FORMAT_VERSION, words }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn format_version(&self) -> u32 {
        self.format_version
    }

    pub fn words(&self) -> &[WordEntry] {
        &self.words
    }

    pub fn into_words(self) -> Vec<WordEntry> {
        self.words
    }

    pub fn word(&self, index: usize) -> Option<&WordEntry> {
        self.words.get(index)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn position(&self, identifier: &str) -> Option<usize> {
        let folded = identifier.to_lowercase();
        self.words.iter().position(|w| w.identifier.to_lowercase() == folded)
    }

    pub fn mark(&mut self, index: usize, state: WordState) -> Option<StateTransition> {
        let word = self.words.get_mut(index)?;
        let previous = word.state;
        word.state = state;

        Some(StateTransition { index, previous, current: state })
    }

    /// Same words, counts and order; marks, names and contexts are not compared.
    pub fn is_equivalent(&self, other: &Session) -> bool {
        self.words.len() == other.words.len()
            && self.words.iter().zip(&other.words).all(|(a, b)| a.same_structure(b))
    }
}

pub fn are_equivalent(first: &Session, second: &Session) -> bool {
    first.is_equivalent(second)
}

fn validate_words(words: &[WordEntry]) -> Result<(), WordhuntError> {
    let mut seen = HashSet::with_capacity(words.len());

    for (index, word) in words.iter().enumerate() {
        if word.identifier.trim().is_empty() {
            return Err(WordhuntError::corrupt(format!("word {} has an empty identifier", index)));
        }
        if word.use_count == 0 {
            return Err(WordhuntError::corrupt(format!(
                "word '{}' has a use count of zero",
                word.identifier
            )));
        }
        if !word.uses.is_empty() && word.uses.len() != word.use_count as usize {
            return Err(WordhuntError::corrupt(format!(
                "word '{}' has {} uses recorded but a use count of {}",
                word.identifier,
                word.uses.len(),
                word.use_count
            )));
        }
        if !seen.insert(word.identifier.to_lowercase()) {
            return Err(WordhuntError::corrupt(format!(
                "word '{}' appears more than once",
                word.identifier
            )));
        }
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnrichedSession {
    pub session: Session,
    pub file: Option<PathBuf>,
}

impl EnrichedSession {
    pub fn unsaved(session: Session) -> Self {
        EnrichedSession { session, file: None }
    }

    pub fn with_file(session: Session, file: &Path) -> Self {
        EnrichedSession { session, file: Some(file.to_path_buf()) }
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SessionProgress {
    pub unmarked: usize,
    pub known: usize,
    pub unknown: usize,
}

impl SessionProgress {
    pub fn of(session: &Session) -> Self {
        let mut progress = SessionProgress::default();
        for word in session.words() {
            *progress.slot(word.state()) += 1;
        }
        progress
    }

    pub fn apply(&mut self, transition: &StateTransition) {
        if !transition.is_change() {
            return;
        }
        let previous = self.slot(transition.previous);
        *previous = previous.saturating_sub(1);
        *self.slot(transition.current) += 1;
    }

    fn slot(&mut self, state: WordState) -> &mut usize {
        match state {
            WordState::Unmarked => &mut self.unmarked,
            WordState::Known => &mut self.known,
            WordState::Unknown => &mut self.unknown,
        }
    }

    pub fn total(&self) -> usize {
        self.unmarked + self.known + self.unknown
    }

    pub fn marked(&self) -> usize {
        self.known + self.unknown
    }

    pub fn marked_percentage(&self) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        self.marked() as f64 * 100.0 / total as f64
    }
}
