//! Vocabulary sessions: analyse a document into an ordered word list, mark words as known or
//! unknown, and save and reload the marks across every session file format ever written.

pub mod analysis;
pub mod config;
pub mod core;
pub mod filter;
pub mod persistence;
pub mod session;

pub use analysis::{
    AnalysisOptions,
    Analyser,
    Document,
};
pub use config::WordhuntConfig;
pub use crate::core::{
    are_equivalent,
    EnrichedSession,
    Session,
    WordEntry,
    WordState,
    WordhuntError,
};
pub use session::{
    known_words,
    read,
    seen_words,
    unknown_words,
    write,
};
