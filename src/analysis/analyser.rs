use std::{
    collections::HashMap,
    time::Instant,
};

use serde::{
    Deserialize,
    Serialize,
};
use tracing::{
    debug,
    info,
};

use super::{
    document::Document,
    tokenizer::{
        TokenRules,
        WordTokenizer,
    },
};
use crate::core::{
    file_name::display_name,
    EnrichedSession,
    Session,
    WordEntry,
    WordhuntError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisOptions {
    pub rules: TokenRules,
    /// Keep the line each occurrence was found on.
    pub retain_contexts: bool,
    /// Show a word in lower case once it has been seen that way, even if it first appeared capitalised.
    pub prefer_lowercase: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self { rules: TokenRules::default(), retain_contexts: true, prefer_lowercase: true }
    }
}

#[derive(Debug, Clone)]
pub struct Analyser {
    options: AnalysisOptions,
    tokenizer: WordTokenizer,
}

impl Analyser {
    pub fn new(options: AnalysisOptions) -> Result<Self, WordhuntError> {
        let tokenizer = WordTokenizer::new(&options.rules)?;
        Ok(Self { options, tokenizer })
    }

    pub fn options(&self) -> &AnalysisOptions {
        &self.options
    }

    /// Builds a fresh, unsaved session named after the document.
    pub fn create_new_session(&self, document: &Document) -> Result<EnrichedSession, WordhuntError> {
        let text = document.read_text()?;
        let name = display_name(&document.path);
        let start = Instant::now();

        let session = self.analyse(&name, &text);

        info!(
            "Analysed '{}': {} distinct words in {}ms",
            name,
            session.len(),
            start.elapsed().as_millis()
        );
        Ok(EnrichedSession::unsaved(session))
    }

    pub fn analyse(&self, name: &str, text: &str) -> Session {
        let mut words: Vec<WordEntry> = Vec::new();
        // folded form -> position in `words`
        let mut positions: HashMap<String, usize> = HashMap::new();
        let mut occurrences = 0usize;

        for line in text.lines() {
            let context = self.options.retain_contexts.then(|| line.trim());

            for token in self.tokenizer.tokens(line) {
                occurrences += 1;
                let folded = token.to_lowercase();

                match positions.get(&folded) {
                    Some(&index) => {
                        let word = &mut words[index];
                        word.record_use(context);
                        if self.options.prefer_lowercase
                            && is_lowercase(token)
                            && !is_lowercase(word.identifier())
                        {
                            word.replace_identifier(token);
                        }
                    }
                    None => {
                        positions.insert(folded, words.len());
                        words.push(WordEntry::first_use(token, context));
                    }
                }
            }
        }

        debug!("Tokenised {} occurrences into {} words", occurrences, words.len());
        Session::from_valid_words(name.to_string(), words)
    }
}

fn is_lowercase(word: &str) -> bool {
    !word.chars().any(char::is_uppercase)
}
