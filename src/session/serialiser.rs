use std::{
    fs,
    io,
    path::Path,
};

use tracing::{
    debug,
    info,
};

use super::formats;
use crate::{
    core::{
        file_name::display_name,
        EnrichedSession,
        Session,
        WordEntry,
        WordhuntError,
    },
    persistence::write_atomically,
};

pub fn read(path: &Path) -> Result<EnrichedSession, WordhuntError> {
    let bytes = fs::read(path)
        .map_err(|source| WordhuntError::SessionRead { path: path.to_path_buf(), source })?;
    let payload = String::from_utf8(bytes).map_err(|_| {
        WordhuntError::CorruptSessionFile {
            path: Some(path.to_path_buf()),
            reason: "content is not UTF-8 text".to_string(),
        }
    })?;

    let (session, version) =
        formats::decode_with_version(&payload).map_err(|e| e.at_path(path))?;

    debug!(
        "Read session '{}' ({} words, format version {}) from {}",
        session.name(),
        session.len(),
        version,
        display_name(path)
    );
    Ok(EnrichedSession::with_file(session, path))
}

pub fn read_marked_words(path: &Path) -> Result<Vec<WordEntry>, WordhuntError> {
    read(path).map(|enriched| enriched.session.into_words())
}

/// Saves in the latest format, whatever format the session was read from.
pub fn write(path: &Path, session: &Session) -> Result<(), WordhuntError> {
    write_atomically(path, |writer| {
        formats::encode_to_writer(writer, session).map_err(io::Error::from)
    })?;

    info!("Saved session '{}' to {}", session.name(), display_name(path));
    Ok(())
}
