use std::{
    fs,
    io,
    path::{
        Path,
        PathBuf,
    },
};

use encoding_rs::{
    Encoding,
    UTF_8,
};

use crate::core::WordhuntError;

/// A document on disk with an optional declared character encoding.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub encoding: Option<&'static Encoding>,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), encoding: None }
    }

    /// Declares the encoding by its WHATWG label, e.g. `"windows-1252"` or `"utf-16le"`.
    pub fn with_label(path: impl Into<PathBuf>, label: &str) -> Result<Self, WordhuntError> {
        let path = path.into();
        let encoding = Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| {
            invalid(&path, io::ErrorKind::InvalidInput, format!("unknown encoding '{}'", label))
        })?;

        Ok(Self { path, encoding: Some(encoding) })
    }

    pub fn read_text(&self) -> Result<String, WordhuntError> {
        let bytes = fs::read(&self.path)
            .map_err(|source| WordhuntError::AnalysisIo { path: self.path.clone(), source })?;

        decode(&self.path, &bytes, self.encoding)
    }
}

fn decode(
    path: &Path,
    bytes: &[u8],
    declared: Option<&'static Encoding>,
) -> Result<String, WordhuntError> {
    let (encoding, bom_length) = match (declared, Encoding::for_bom(bytes)) {
        (Some(declared), Some((detected, length))) if declared == detected => (declared, length),
        (Some(declared), _) => (declared, 0),
        (None, Some((detected, length))) => (detected, length),
        (None, None) => (UTF_8, 0),
    };

    let text = encoding
        .decode_without_bom_handling_and_without_replacement(&bytes[bom_length..])
        .ok_or_else(|| {
            invalid(
                path,
                io::ErrorKind::InvalidData,
                format!("content is not valid {} text", encoding.name()),
            )
        })?;

    if text.contains('\0') {
        return Err(invalid(path, io::ErrorKind::InvalidData, "content is binary".to_string()));
    }

    Ok(text.into_owned())
}

fn invalid(path: &Path, kind: io::ErrorKind, message: String) -> WordhuntError {
    WordhuntError::AnalysisIo { path: path.to_path_buf(), source: io::Error::new(kind, message) }
}
