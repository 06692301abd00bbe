use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetKeyError {
    #[error("asset key must not be empty")]
    Empty,
    #[error("asset key must not start with '/'")]
    LeadingSlash,
    #[error("asset key must not contain '\\\\'")]
    Backslash,
    #[error("asset key must not contain '..'")]
    ParentTraversal,
    #[error("asset key contains invalid character '{character}'")]
    InvalidCharacter { character: char },
}

pub fn validate_asset_key(key: &str) -> Result<(), AssetKeyError> {
    if key.is_empty() {
        return Err(AssetKeyError::Empty);
    }
    if key.starts_with('/') {
        return Err(AssetKeyError::LeadingSlash);
    }
    if key.contains('\\') {
        return Err(AssetKeyError::Backslash);
    }
    if key.contains("..") {
        return Err(AssetKeyError::ParentTraversal);
    }
    match key
        .chars()
        .find(|ch| !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '/' | '-')))
    {
        Some(character) => Err(AssetKeyError::InvalidCharacter { character }),
        None => Ok(()),
    }
}
