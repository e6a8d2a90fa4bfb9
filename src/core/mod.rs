pub mod errors;
pub mod file_name;
pub mod models;

pub use errors::WordhuntError;
pub use models::{
    are_equivalent,
    EnrichedSession,
    Session,
    SessionProgress,
    StateTransition,
    WordEntry,
    WordState,
    LATEST_FORMAT_VERSION,
};
