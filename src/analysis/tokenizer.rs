use regex::Regex;
use serde::{
    Deserialize,
    Serialize,
};

use crate::core::WordhuntError;

const LETTER_RUN: &str = r"[\p{L}\p{M}]+";

/// Which characters may join two letter runs into a single word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TokenRules {
    pub allow_apostrophes: bool,
    pub allow_hyphens: bool,
}

impl Default for TokenRules {
    fn default() -> Self {
        Self { allow_apostrophes: true, allow_hyphens: false }
    }
}

impl TokenRules {
    fn pattern(&self) -> String {
        let mut joiners = String::new();
        if self.allow_apostrophes {
            joiners.push_str("'’");
        }
        if self.allow_hyphens {
            joiners.push_str(r"\-");
        }

        if joiners.is_empty() {
            LETTER_RUN.to_string()
        } else {
            format!("{LETTER_RUN}(?:[{joiners}]{LETTER_RUN})*")
        }
    }
}

#[derive(Debug, Clone)]
pub struct WordTokenizer {
    pattern: Regex,
}

impl WordTokenizer {
    pub fn new(rules: &TokenRules) -> Result<Self, WordhuntError> {
        Ok(Self { pattern: Regex::new(&rules.pattern())? })
    }

    /// Word tokens of `text` in reading order. Digits, punctuation and whitespace never appear.
    pub fn tokens<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pattern.find_iter(text).map(|m| m.as_str())
    }
}
