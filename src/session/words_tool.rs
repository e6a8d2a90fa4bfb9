use std::{
    fmt,
    path::Path,
    time::{
        Duration,
        Instant,
    },
};

use serde::{
    Deserialize,
    Serialize,
};
use tracing::info;

use super::serialiser::read_marked_words;
use crate::core::{
    file_name::display_name,
    WordEntry,
    WordState,
    WordhuntError,
};

/// Which marked words to take from a session file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkedKind {
    /// Words marked as known.
    Known,
    /// Words marked as unknown, the ones still to learn.
    Unknown,
    /// Words marked either way.
    Seen,
}

impl MarkedKind {
    pub fn includes(self, state: WordState) -> bool {
        match self {
            MarkedKind::Known => state == WordState::Known,
            MarkedKind::Unknown => state == WordState::Unknown,
            MarkedKind::Seen => state.is_marked(),
        }
    }
}

impl fmt::Display for MarkedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkedKind::Known => write!(f, "known"),
            MarkedKind::Unknown => write!(f, "unknown"),
            MarkedKind::Seen => write!(f, "known or unknown"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionReport {
    pub kind: MarkedKind,
    pub word_count: usize,
    pub elapsed: Duration,
    pub file_name: String,
}

#[derive(Debug, Clone)]
pub struct Extraction {
    pub words: Vec<String>,
    pub report: ExtractionReport,
}

pub fn known_words(path: &Path) -> Result<Vec<String>, WordhuntError> {
    extract(path, MarkedKind::Known).map(|extraction| extraction.words)
}

pub fn unknown_words(path: &Path) -> Result<Vec<String>, WordhuntError> {
    extract(path, MarkedKind::Unknown).map(|extraction| extraction.words)
}

pub fn seen_words(path: &Path) -> Result<Vec<String>, WordhuntError> {
    extract(path, MarkedKind::Seen).map(|extraction| extraction.words)
}

pub fn extract(path: &Path, kind: MarkedKind) -> Result<Extraction, WordhuntError> {
    let start = Instant::now();
    let marked = read_marked_words(path).map_err(|e| WordhuntError::filter_read(path, e))?;
    let words = select(&marked, kind);

    let report = ExtractionReport {
        kind,
        word_count: words.len(),
        elapsed: start.elapsed(),
        file_name: display_name(path),
    };
    info!(
        "Read filter file and found {} words marked as {} in {}ms ({})",
        report.word_count,
        report.kind,
        report.elapsed.as_millis(),
        report.file_name
    );

    Ok(Extraction { words, report })
}

/// Identifiers of the words `kind` covers, in session order.
pub fn select(words: &[WordEntry], kind: MarkedKind) -> Vec<String> {
    words
        .iter()
        .filter(|w| kind.includes(w.state()))
        .map(|w| w.identifier().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::{
        core::Session,
        session::serialiser::write,
    };

    fn saved_session(dir: &TempDir) -> std::path::PathBuf {
        let words = vec![
            WordEntry::new("the".to_string(), 3, Vec::new(), WordState::Known),
            WordEntry::new("to".to_string(), 2, Vec::new(), WordState::Unknown),
            WordEntry::new("a".to_string(), 1, Vec::new(), WordState::Unmarked),
            WordEntry::new("ghost".to_string(), 1, Vec::new(), WordState::Known),
        ];
        let path = dir.path().join("filter.wordy");
        write(&path, &Session::try_new("filter", words).unwrap()).unwrap();
        path
    }

    #[test]
    fn test_known_words() {
        let dir = TempDir::new().unwrap();
        let path = saved_session(&dir);

        assert_eq!(known_words(&path).unwrap(), vec!["the", "ghost"]);
    }

    #[test]
    fn test_unknown_words() {
        let dir = TempDir::new().unwrap();
        let path = saved_session(&dir);

        assert_eq!(unknown_words(&path).unwrap(), vec!["to"]);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(MarkedKind::Unknown.to_string(), "unknown");
        assert_eq!(serde_json::to_string(&MarkedKind::Unknown).unwrap(), r#""unknown""#);
        assert_eq!(
            serde_json::from_str::<MarkedKind>(r#""seen""#).unwrap(),
            MarkedKind::Seen
        );
    }

    #[test]
    fn test_seen_words_keep_session_order() {
        let dir = TempDir::new().unwrap();
        let path = saved_session(&dir);

        assert_eq!(seen_words(&path).unwrap(), vec!["the", "to", "ghost"]);
    }

    #[test]
    fn test_report_describes_extraction() {
        let dir = TempDir::new().unwrap();
        let path = saved_session(&dir);

        let extraction = extract(&path, MarkedKind::Seen).unwrap();

        assert_eq!(extraction.report.kind, MarkedKind::Seen);
        assert_eq!(extraction.report.word_count, 3);
        assert_eq!(extraction.report.file_name, "filter.wordy");
    }

    #[test]
    fn test_select_known_and_seen() {
        let words = vec![
            WordEntry::new("the".to_string(), 1, Vec::new(), WordState::Known),
            WordEntry::new("to".to_string(), 1, Vec::new(), WordState::Unknown),
            WordEntry::new("a".to_string(), 1, Vec::new(), WordState::Unmarked),
        ];

        assert_eq!(select(&words, MarkedKind::Known), vec!["the"]);
        assert_eq!(select(&words, MarkedKind::Unknown), vec!["to"]);
        assert_eq!(select(&words, MarkedKind::Seen), vec!["the", "to"]);
    }

    #[test]
    fn test_unreadable_file_is_wrapped() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.wordy");
        fs::write(&path, r#"{"formatVersion": 99}"#).unwrap();

        match known_words(&path) {
            Err(WordhuntError::FilterRead { path: p, source }) => {
                assert_eq!(p, path);
                assert!(matches!(
                    *source,
                    WordhuntError::UnsupportedFormatVersion { version: 99, .. }
                ));
            }
            other => panic!("Expected FilterRead, got {:?}", other),
        }
    }
}
