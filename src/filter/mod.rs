pub mod export;

use std::{
    collections::HashSet,
    path::PathBuf,
};

use serde::{
    Deserialize,
    Serialize,
};
use tracing::debug;

use crate::{
    core::{
        Session,
        WordEntry,
        WordhuntError,
    },
    session::words_tool::{
        extract,
        MarkedKind,
    },
};

pub const DEFAULT_MINIMUM_LETTERS: usize = 2;
pub const DEFAULT_MINIMUM_OCCURRENCES: u32 = 2;
pub const DEFAULT_ALLOW_INITIAL_CAPITALS: bool = true;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterFileKind {
    /// Known words of a saved session.
    SessionKnown,
    /// Known and unknown words of a saved session.
    SessionSeen,
    /// Plain text, one word per line.
    List,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterFile {
    pub path: PathBuf,
    pub kind: FilterFileKind,
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
}

fn enabled_by_default() -> bool {
    true
}

impl FilterFile {
    pub fn new(path: impl Into<PathBuf>, kind: FilterFileKind) -> Self {
        Self { path: path.into(), kind, enabled: true }
    }

    pub fn load_words(&self) -> Result<Vec<String>, WordhuntError> {
        match self.kind {
            FilterFileKind::SessionKnown => Ok(extract(&self.path, MarkedKind::Known)?.words),
            FilterFileKind::SessionSeen => Ok(extract(&self.path, MarkedKind::Seen)?.words),
            FilterFileKind::List => export::read_word_list(&self.path)
                .map_err(|e| WordhuntError::filter_read(&self.path, e)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSettings {
    /// When false every word is shown and no filter file is loaded.
    pub enabled: bool,
    pub minimum_letters: usize,
    pub minimum_occurrences: u32,
    /// When false, words only ever seen with a leading capital (usually names) are hidden.
    pub allow_initial_capitals: bool,
    pub filter_files: Vec<FilterFile>,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            minimum_letters: DEFAULT_MINIMUM_LETTERS,
            minimum_occurrences: DEFAULT_MINIMUM_OCCURRENCES,
            allow_initial_capitals: DEFAULT_ALLOW_INITIAL_CAPITALS,
            filter_files: Vec::new(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct WordFilter {
    enabled: bool,
    minimum_letters: usize,
    minimum_occurrences: u32,
    allow_initial_capitals: bool,
    excluded: HashSet<String>,
}

impl WordFilter {
    pub fn build(settings: &FilterSettings) -> Result<Self, WordhuntError> {
        if !settings.enabled {
            debug!("Word filter disabled");
            return Ok(Self::pass_through(settings));
        }

        let mut excluded = HashSet::new();

        for file in settings.filter_files.iter().filter(|f| f.enabled) {
            for word in file.load_words()? {
                excluded.insert(word.to_lowercase());
            }
        }

        debug!(
            "Built word filter: {} excluded words from {} files",
            excluded.len(),
            settings.filter_files.iter().filter(|f| f.enabled).count()
        );
        Ok(Self {
            enabled: true,
            minimum_letters: settings.minimum_letters,
            minimum_occurrences: settings.minimum_occurrences,
            allow_initial_capitals: settings.allow_initial_capitals,
            excluded,
        })
    }

    fn pass_through(settings: &FilterSettings) -> Self {
        Self {
            enabled: false,
            minimum_letters: settings.minimum_letters,
            minimum_occurrences: settings.minimum_occurrences,
            allow_initial_capitals: settings.allow_initial_capitals,
            excluded: HashSet::new(),
        }
    }

    pub fn is_shown(&self, word: &WordEntry) -> bool {
        if !self.enabled {
            return true;
        }
        let identifier = word.identifier();

        identifier.chars().filter(|c| c.is_alphabetic()).count() >= self.minimum_letters
            && word.use_count() >= self.minimum_occurrences
            && (self.allow_initial_capitals || !starts_with_capital(identifier))
            && !self.excluded.contains(&identifier.to_lowercase())
    }

    /// Positions of the shown words, in session order.
    pub fn visible_indices(&self, session: &Session) -> Vec<usize> {
        session
            .words()
            .iter()
            .enumerate()
            .filter(|(_, word)| self.is_shown(word))
            .map(|(index, _)| index)
            .collect()
    }
}

fn starts_with_capital(identifier: &str) -> bool {
    identifier.chars().next().is_some_and(char::is_uppercase)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::{
        core::WordState,
        session::serialiser::write,
    };

    fn word(identifier: &str, use_count: u32, state: WordState) -> WordEntry {
        WordEntry::new(identifier.to_string(), use_count, Vec::new(), state)
    }

    fn session() -> Session {
        Session::try_new(
            "book.txt",
            vec![
                word("the", 40, WordState::Unmarked),
                word("a", 30, WordState::Unmarked),
                word("London", 5, WordState::Unmarked),
                word("fog", 3, WordState::Unmarked),
                word("chancery", 1, WordState::Unmarked),
                word("mud", 2, WordState::Unmarked),
            ],
        )
        .unwrap()
    }

    fn identifiers(filter: &WordFilter, session: &Session) -> Vec<String> {
        filter
            .visible_indices(session)
            .into_iter()
            .map(|i| session.word(i).unwrap().identifier().to_string())
            .collect()
    }

    #[test]
    fn test_default_thresholds() {
        let filter = WordFilter::build(&FilterSettings::default()).unwrap();

        assert_eq!(identifiers(&filter, &session()), vec!["the", "London", "fog", "mud"]);
    }

    #[test]
    fn test_initial_capitals_can_be_hidden() {
        let settings = FilterSettings {
            allow_initial_capitals: false,
            minimum_letters: 1,
            minimum_occurrences: 1,
            ..FilterSettings::default()
        };
        let filter = WordFilter::build(&settings).unwrap();

        assert_eq!(
            identifiers(&filter, &session()),
            vec!["the", "a", "fog", "chancery", "mud"]
        );
    }

    #[test]
    fn test_filter_files_exclude_words() {
        let dir = TempDir::new().unwrap();
        let known_session = dir.path().join("known.wordy");
        let marked = Session::try_new(
            "earlier.txt",
            vec![word("Fog", 1, WordState::Known), word("mud", 1, WordState::Unknown)],
        )
        .unwrap();
        write(&known_session, &marked).unwrap();
        let list = dir.path().join("names.txt");
        fs::write(&list, "london\n\n  the  \n").unwrap();

        let settings = FilterSettings {
            filter_files: vec![
                FilterFile::new(&known_session, FilterFileKind::SessionKnown),
                FilterFile::new(&list, FilterFileKind::List),
            ],
            ..FilterSettings::default()
        };
        let filter = WordFilter::build(&settings).unwrap();

        assert_eq!(identifiers(&filter, &session()), vec!["mud"]);
    }

    #[test]
    fn test_seen_filter_files_include_unknown_words() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seen.wordy");
        let marked = Session::try_new(
            "earlier.txt",
            vec![word("fog", 1, WordState::Known), word("mud", 1, WordState::Unknown)],
        )
        .unwrap();
        write(&path, &marked).unwrap();

        let settings = FilterSettings {
            filter_files: vec![FilterFile::new(&path, FilterFileKind::SessionSeen)],
            ..FilterSettings::default()
        };
        let filter = WordFilter::build(&settings).unwrap();

        assert_eq!(identifiers(&filter, &session()), vec!["the", "London"]);
    }

    #[test]
    fn test_disabled_filter_files_are_skipped() {
        let dir = TempDir::new().unwrap();
        let mut file = FilterFile::new(dir.path().join("absent.txt"), FilterFileKind::List);
        file.enabled = false;
        let settings = FilterSettings { filter_files: vec![file], ..FilterSettings::default() };

        assert!(WordFilter::build(&settings).is_ok());
    }

    #[test]
    fn test_disabled_filter_shows_every_word() {
        let dir = TempDir::new().unwrap();
        let settings = FilterSettings {
            enabled: false,
            minimum_letters: 5,
            allow_initial_capitals: false,
            filter_files: vec![FilterFile::new(
                dir.path().join("absent.wordy"),
                FilterFileKind::SessionKnown,
            )],
            ..FilterSettings::default()
        };

        let filter = WordFilter::build(&settings).unwrap();

        assert_eq!(
            identifiers(&filter, &session()),
            vec!["the", "a", "London", "fog", "chancery", "mud"]
        );
    }

    #[test]
    fn test_missing_filter_file_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("absent.wordy");
        let settings = FilterSettings {
            filter_files: vec![FilterFile::new(&path, FilterFileKind::SessionKnown)],
            ..FilterSettings::default()
        };

        let error = WordFilter::build(&settings).unwrap_err();

        assert!(matches!(error, WordhuntError::FilterRead { path: p, .. } if p == path));
    }

    #[test]
    fn test_settings_deserialise_with_defaults() {
        let settings: FilterSettings = serde_json::from_str(
            r#"{"minimum_letters": 4, "filter_files": [{"path": "known.wordy", "kind": "session_known"}]}"#,
        )
        .unwrap();

        assert_eq!(settings.minimum_letters, 4);
        assert!(settings.enabled);
        assert_eq!(settings.minimum_occurrences, DEFAULT_MINIMUM_OCCURRENCES);
        assert!(settings.filter_files[0].enabled);
    }
}
