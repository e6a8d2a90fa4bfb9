//! On-disk session layouts, oldest first.
//!
//! Each historical layout has its own reader type and converts straight into the current
//! [`Session`] model. Only the latest layout is ever written. Supporting a new layout means
//! a new variant in [`SessionFormat`] and a new match arm in [`SessionFormat::parse`].

use serde::{
    de::DeserializeOwned,
    Deserialize,
    Serialize,
};
use serde_json::{
    Number,
    Value,
};

use crate::core::{
    Session,
    WordEntry,
    WordState,
    WordhuntError,
    LATEST_FORMAT_VERSION,
};

pub const FORMAT_VERSION_FIELD: &str = "formatVersion";

/// Files written before the version field existed.
const IMPLICIT_VERSION: i128 = 1;

/// Mark names used by versions 1 to 3.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum LegacyWordState {
    Unseen,
    Known,
    Unknown,
}

impl From<LegacyWordState> for WordState {
    fn from(state: LegacyWordState) -> Self {
        match state {
            LegacyWordState::Unseen => WordState::Unmarked,
            LegacyWordState::Known => WordState::Known,
            LegacyWordState::Unknown => WordState::Unknown,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionV1 {
    name: String,
    ordered_uses: Vec<WordV1>,
}

/// Version 1 stored every use, so the count is implied.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WordV1 {
    word_identifier: String,
    uses: Vec<String>,
    state: LegacyWordState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionV2 {
    name: String,
    ordered_uses: Vec<WordV2>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WordV2 {
    word_identifier: String,
    use_count: u32,
    #[serde(default)]
    uses: Vec<String>,
    state: LegacyWordState,
}

/// Version 3 moved the context lines into a table shared by all words.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionV3 {
    name: String,
    #[serde(default)]
    lines: Vec<String>,
    ordered_uses: Vec<WordV3>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WordV3 {
    word_identifier: String,
    use_count: u32,
    #[serde(default)]
    line_nos: Vec<usize>,
    state: LegacyWordState,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SessionV4 {
    name: String,
    words: Vec<WordV4>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WordV4 {
    identifier: String,
    use_count: u32,
    #[serde(default)]
    uses: Vec<String>,
    state: WordState,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionRecord<'a> {
    format_version: u32,
    name: &'a str,
    words: Vec<WordRecord<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WordRecord<'a> {
    identifier: &'a str,
    use_count: u32,
    uses: &'a [String],
    state: WordState,
}

impl<'a> From<&'a Session> for SessionRecord<'a> {
    fn from(session: &'a Session) -> Self {
        SessionRecord {
            format_version: LATEST_FORMAT_VERSION,
            name: session.name(),
            words: session
                .words()
                .iter()
                .map(|word| WordRecord {
                    identifier: word.identifier(),
                    use_count: word.use_count(),
                    uses: word.uses(),
                    state: word.state(),
                })
                .collect(),
        }
    }
}

#[derive(Debug)]
enum SessionFormat {
    V1(SessionV1),
    V2(SessionV2),
    V3(SessionV3),
    V4(SessionV4),
}

impl SessionFormat {
    fn parse(payload: &str) -> Result<Self, WordhuntError> {
        let value: Value = serde_json::from_str(payload)
            .map_err(|e| WordhuntError::corrupt(format!("not a session document: {}", e)))?;

        match declared_version(&value)? {
            1 => layout(value, 1).map(SessionFormat::V1),
            2 => layout(value, 2).map(SessionFormat::V2),
            3 => layout(value, 3).map(SessionFormat::V3),
            4 => layout(value, 4).map(SessionFormat::V4),
            version => Err(WordhuntError::UnsupportedFormatVersion { version, path: None }),
        }
    }

    fn version(&self) -> u32 {
        match self {
            SessionFormat::V1(_) => 1,
            SessionFormat::V2(_) => 2,
            SessionFormat::V3(_) => 3,
            SessionFormat::V4(_) => 4,
        }
    }

    fn into_session(self) -> Result<Session, WordhuntError> {
        match self {
            SessionFormat::V1(file) => {
                let words = file
                    .ordered_uses
                    .into_iter()
                    .map(|w| {
                        let use_count = u32::try_from(w.uses.len()).unwrap_or(u32::MAX);
                        WordEntry::new(w.word_identifier, use_count, w.uses, w.state.into())
                    })
                    .collect();
                Session::try_new(file.name, words)
            }
            SessionFormat::V2(file) => {
                let words = file
                    .ordered_uses
                    .into_iter()
                    .map(|w| WordEntry::new(w.word_identifier, w.use_count, w.uses, w.state.into()))
                    .collect();
                Session::try_new(file.name, words)
            }
            SessionFormat::V3(file) => {
                let lines = file.lines;
                let words = file
                    .ordered_uses
                    .into_iter()
                    .map(|w| {
                        let uses = resolve_lines(&lines, &w.line_nos, &w.word_identifier)?;
                        Ok(WordEntry::new(w.word_identifier, w.use_count, uses, w.state.into()))
                    })
                    .collect::<Result<Vec<_>, WordhuntError>>()?;
                Session::try_new(file.name, words)
            }
            SessionFormat::V4(file) => {
                let words = file
                    .words
                    .into_iter()
                    .map(|w| WordEntry::new(w.identifier, w.use_count, w.uses, w.state))
                    .collect();
                Session::try_new(file.name, words)
            }
        }
    }
}

fn declared_version(value: &Value) -> Result<i128, WordhuntError> {
    let fields = value
        .as_object()
        .ok_or_else(|| WordhuntError::corrupt("session document is not a JSON object"))?;

    match fields.get(FORMAT_VERSION_FIELD) {
        None => Ok(IMPLICIT_VERSION),
        Some(version) => version.as_number().and_then(integer_value).ok_or_else(|| {
            WordhuntError::corrupt(format!("{} is not an integer: {}", FORMAT_VERSION_FIELD, version))
        }),
    }
}

/// Integers beyond the 64-bit range are parsed as floats; those saturate.
fn integer_value(number: &Number) -> Option<i128> {
    if let Some(n) = number.as_i64() {
        return Some(i128::from(n));
    }
    if let Some(n) = number.as_u64() {
        return Some(i128::from(n));
    }
    number
        .as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0 && f.abs() > u64::MAX as f64)
        .map(|f| f as i128)
}

fn layout<T: DeserializeOwned>(value: Value, version: u32) -> Result<T, WordhuntError> {
    serde_json::from_value(value)
        .map_err(|e| WordhuntError::corrupt(format!("invalid version {} layout: {}", version, e)))
}

fn resolve_lines(
    lines: &[String],
    line_nos: &[usize],
    identifier: &str,
) -> Result<Vec<String>, WordhuntError> {
    line_nos
        .iter()
        .map(|&n| {
            lines.get(n).cloned().ok_or_else(|| {
                WordhuntError::corrupt(format!(
                    "word '{}' refers to line {} but only {} lines are stored",
                    identifier,
                    n,
                    lines.len()
                ))
            })
        })
        .collect()
}

/// Decodes a session document of any supported version into the current model.
pub fn decode(payload: &str) -> Result<Session, WordhuntError> {
    decode_with_version(payload).map(|(session, _)| session)
}

/// Like [`decode`], also reporting which layout the document used.
pub fn decode_with_version(payload: &str) -> Result<(Session, u32), WordhuntError> {
    let format = SessionFormat::parse(payload)?;
    let version = format.version();

    Ok((format.into_session()?, version))
}

/// The latest layout as pretty-printed JSON.
pub fn encode(session: &Session) -> Result<String, WordhuntError> {
    Ok(serde_json::to_string_pretty(&SessionRecord::from(session))?)
}

pub(crate) fn encode_to_writer<W: std::io::Write>(
    writer: W,
    session: &Session,
) -> serde_json::Result<()> {
    serde_json::to_writer_pretty(writer, &SessionRecord::from(session))
}
