pub mod formats;
pub mod serialiser;
pub mod words_tool;

pub use formats::{
    decode,
    encode,
};
pub use serialiser::{
    read,
    read_marked_words,
    write,
};
pub use words_tool::{
    extract,
    known_words,
    seen_words,
    unknown_words,
    Extraction,
    ExtractionReport,
    MarkedKind,
};
