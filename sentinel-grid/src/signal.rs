use alloc::string::String;

/// A sentinel payload that is not a non-negative row index.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum IndexParseError {
    #[error("empty row index")]
    Empty,
    #[error("negative row index: {0:?}")]
    Negative(String),
    #[error("row index is not an integer: {0:?}")]
    NotAnInteger(String),
}

/// Parses the raw identifier attached to a sentinel into a row index.
///
/// Surrounding whitespace is ignored. Anything that is not a non-negative integer that fits in a
/// `usize` is rejected.
pub fn parse_row_index(raw: &str) -> Result<usize, IndexParseError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(IndexParseError::Empty);
    }
    if let Some(rest) = trimmed.strip_prefix('-') {
        if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(IndexParseError::Negative(trimmed.into()));
        }
    }
    trimmed
        .parse::<usize>()
        .map_err(|_| IndexParseError::NotAnInteger(trimmed.into()))
}
