use std::{
    ffi::OsString,
    fs::{
        self,
        File,
    },
    io::{
        self,
        BufWriter,
        Write,
    },
    path::{
        Path,
        PathBuf,
    },
};

use serde::{
    de::DeserializeOwned,
    Serialize,
};
use tracing::debug;

use crate::core::WordhuntError;

/// Writes `path` through a sibling temporary file that replaces it only once fully written.
pub fn write_atomically<F>(path: &Path, fill: F) -> Result<(), WordhuntError>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let temp_path = temporary_path(path);

    let result = write_synced(&temp_path, fill).and_then(|()| fs::rename(&temp_path, path));
    if let Err(source) = result {
        let _ = fs::remove_file(&temp_path);
        return Err(WordhuntError::SessionWrite { path: path.to_path_buf(), source });
    }

    debug!("Replaced {}", path.display());
    Ok(())
}

fn write_synced<F>(temp_path: &Path, fill: F) -> io::Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let mut writer = BufWriter::new(File::create(temp_path)?);
    fill(&mut writer)?;
    writer.flush()?;
    let file = writer.into_inner().map_err(|e| e.into_error())?;
    file.sync_all()
}

fn temporary_path(path: &Path) -> PathBuf {
    let mut name =
        path.file_name().map(|n| n.to_os_string()).unwrap_or_else(|| OsString::from("wordhunt"));
    name.push(".tmp");
    path.with_file_name(name)
}

pub fn save_json<T: Serialize>(data: &T, path: &Path) -> Result<(), WordhuntError> {
    write_atomically(path, |writer| {
        serde_json::to_writer_pretty(&mut *writer, data)?;
        writer.write_all(b"\n")
    })
}

/// Loads `path`, falling back to the default value when the file does not exist.
pub fn load_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T, WordhuntError> {
    let json = match fs::read_to_string(path) {
        Ok(json) => json,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!("{} not found, using defaults", path.display());
            return Ok(T::default());
        }
        Err(e) => {
            return Err(WordhuntError::Config { path: path.to_path_buf(), reason: e.to_string() })
        }
    };

    serde_json::from_str(&json)
        .map_err(|e| WordhuntError::Config { path: path.to_path_buf(), reason: e.to_string() })
}
