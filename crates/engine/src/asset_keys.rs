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

/// Asset keys are root-relative paths such as `res/ent/wall.png`.
pub(crate) fn validate_asset_key(key: &str) -> Result<(), AssetKeyError> {
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
        .find(|ch| !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '_' | '/' | '-' | '.')))
    {
        Some(character) => Err(AssetKeyError::InvalidCharacter { character }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_game_asset_keys() {
        for key in ["res/tank.png", "res/ent/wall.png", "res/ui/fbtn.png", "res/lvl/prompt-2.png"] {
            assert!(validate_asset_key(key).is_ok(), "key={key}");
        }
    }

    #[test]
    fn rejects_keys_escaping_the_root() {
        for key in ["", "/res/tank.png", "..", "res/../secret", r"res\tank.png", "Res/Tank.png"] {
            assert!(validate_asset_key(key).is_err(), "key={key}");
        }
    }

    #[test]
    fn reports_offending_character() {
        assert_eq!(
            validate_asset_key("res/tank png"),
            Err(AssetKeyError::InvalidCharacter { character: ' ' })
        );
    }
}
