use std::{
    fs,
    io::Write,
    path::Path,
};

use tracing::info;

use crate::{
    core::{
        file_name::display_name,
        WordhuntError,
    },
    persistence::write_atomically,
    session::words_tool::{
        extract,
        MarkedKind,
    },
};

/// Writes the `kind` words of a saved session as a word list, one identifier per line.
/// [`MarkedKind::Unknown`] gives the list of words still to learn.
pub fn export_words(
    session_file: &Path,
    kind: MarkedKind,
    destination: &Path,
) -> Result<usize, WordhuntError> {
    let extraction = extract(session_file, kind)?;
    write_word_list(destination, &extraction.words)?;

    info!(
        "Exported {} {} words from {} to {}",
        extraction.words.len(),
        kind,
        display_name(session_file),
        display_name(destination)
    );
    Ok(extraction.words.len())
}

pub fn write_word_list(path: &Path, words: &[String]) -> Result<(), WordhuntError> {
    write_atomically(path, |writer| {
        for word in words {
            writeln!(writer, "{}", word)?;
        }
        Ok(())
    })
}

pub fn read_word_list(path: &Path) -> Result<Vec<String>, WordhuntError> {
    let content = fs::read_to_string(path)
        .map_err(|source| WordhuntError::WordListRead { path: path.to_path_buf(), source })?;

    Ok(content
        .lines()
        .map(|line| line.trim().to_string())
        .filter(|line| !line.is_empty())
        .collect())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::{
        analysis::{
            AnalysisOptions,
            Analyser,
        },
        core::{
            Session,
            WordEntry,
            WordState,
        },
        session::serialiser::write,
    };

    #[test]
    fn test_export_seen_words() {
        let dir = TempDir::new().unwrap();
        let session_file = dir.path().join("session.wordy");
        let list = dir.path().join("seen.txt");
        let session = Session::try_new(
            "book.txt",
            vec![
                WordEntry::new("the".to_string(), 2, Vec::new(), WordState::Known),
                WordEntry::new("a".to_string(), 1, Vec::new(), WordState::Unmarked),
                WordEntry::new("to".to_string(), 1, Vec::new(), WordState::Unknown),
            ],
        )
        .unwrap();
        write(&session_file, &session).unwrap();

        let count = export_words(&session_file, MarkedKind::Seen, &list).unwrap();

        assert_eq!(count, 2);
        assert_eq!(fs::read_to_string(&list).unwrap(), "the\nto\n");
        assert_eq!(read_word_list(&list).unwrap(), vec!["the", "to"]);
    }

    #[test]
    fn test_export_unknown_words() {
        let dir = TempDir::new().unwrap();
        let session_file = dir.path().join("session.wordy");
        let list = dir.path().join("to-learn.txt");
        let analyser = Analyser::new(AnalysisOptions::default()).unwrap();
        let mut session = analyser.analyse("walkthrough.txt", "Bread and butter and the jam.\n");
        let and = session.position("and").unwrap();
        let the = session.position("the").unwrap();
        session.mark(and, WordState::Known).unwrap();
        session.mark(the, WordState::Unknown).unwrap();
        write(&session_file, &session).unwrap();

        let count = export_words(&session_file, MarkedKind::Unknown, &list).unwrap();

        let exported = read_word_list(&list).unwrap();
        assert_eq!(count, 1);
        assert_eq!(exported, vec!["the"]);
        assert!(!exported.contains(&"and".to_string()));
    }

    #[test]
    fn test_export_from_unreadable_session_fails() {
        let dir = TempDir::new().unwrap();
        let list = dir.path().join("known.txt");

        let result = export_words(&dir.path().join("absent.wordy"), MarkedKind::Known, &list);

        assert!(matches!(result, Err(WordhuntError::FilterRead { .. })));
        assert!(!list.exists());
    }

    #[test]
    fn test_read_word_list_skips_blank_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("list.txt");
        fs::write(&path, "  alpha \r\n\r\nbeta\n\n").unwrap();

        assert_eq!(read_word_list(&path).unwrap(), vec!["alpha", "beta"]);
    }

    #[test]
    fn test_missing_word_list_names_the_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("names.txt");

        let error = read_word_list(&path).unwrap_err();

        assert!(matches!(error, WordhuntError::WordListRead { path: ref p, .. } if p == &path));
        assert!(error.to_string().starts_with("Unable to read word list"));
    }
}
