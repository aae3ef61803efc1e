use crate::errors::ValidationError;

/// Split raw Set input into a key and a value.
///
/// The first segment is the key and is trimmed. The second segment is the value, taken
/// as-is, and is empty when missing. Anything after the second separator is discarded.
pub fn parse_set_input(raw: &str, separator: char) -> Result<(String, String), ValidationError> {
    let mut segments = raw.split(separator);
    let key = parse_key(segments.next().unwrap_or_default())?;
    let value = segments.next().unwrap_or_default().to_owned();

    Ok((key, value))
}

/// Trim a raw key, rejecting one that is left empty.
pub fn parse_key(raw: &str) -> Result<String, ValidationError> {
    let key = raw.trim();
    if key.is_empty() {
        return Err(ValidationError::EmptyKey);
    }
    Ok(key.to_owned())
}
