pub mod analyser;
pub mod document;
pub mod tokenizer;

pub use analyser::{
    AnalysisOptions,
    Analyser,
};
pub use document::Document;
pub use tokenizer::{
    TokenRules,
    WordTokenizer,
};
