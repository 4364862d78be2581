//! Player-name validation for the high-score table.
//!
//! Names end up in a comma-separated score file, so separators and control
//! characters are rejected rather than escaped.

pub const MAX_NAME_CHARS: usize = 24;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NameError {
    #[error("name cannot be empty")]
    Empty,

    #[error("name is too long (maximum {max} characters)")]
    TooLong { max: usize },

    #[error("name contains invalid characters: {chars}")]
    InvalidCharacters { chars: String },
}

/// Trim and check a player name, returning the name to store.
pub fn validate_player_name(name: &str) -> Result<String, NameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }
    if trimmed.chars().count() > MAX_NAME_CHARS {
        return Err(NameError::TooLong {
            max: MAX_NAME_CHARS,
        });
    }

    let mut invalid: Vec<String> = Vec::new();
    for ch in trimmed.chars().filter(|c| *c == ',' || c.is_control()) {
        let shown = if ch.is_control() {
            format!("\\u{{{:04x}}}", ch as u32)
        } else {
            ch.to_string()
        };
        if !invalid.contains(&shown) {
            invalid.push(shown);
        }
    }
    if !invalid.is_empty() {
        return Err(NameError::InvalidCharacters {
            chars: invalid.join(", "),
        });
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_names() {
        assert_eq!(validate_player_name("alice").unwrap(), "alice");
        assert_eq!(validate_player_name("  Sir Robin ").unwrap(), "Sir Robin");
        assert_eq!(validate_player_name("Zoë").unwrap(), "Zoë");
        assert!(validate_player_name(&"x".repeat(MAX_NAME_CHARS)).is_ok());
    }

    #[test]
    fn test_invalid_names() {
        assert_eq!(validate_player_name("   "), Err(NameError::Empty));
        assert_eq!(
            validate_player_name(&"x".repeat(MAX_NAME_CHARS + 1)),
            Err(NameError::TooLong { max: MAX_NAME_CHARS })
        );
        assert_eq!(
            validate_player_name("a,b,c"),
            Err(NameError::InvalidCharacters { chars: ",".into() })
        );
        assert_eq!(
            validate_player_name("tab\there"),
            Err(NameError::InvalidCharacters {
                chars: "\\u{0009}".into()
            })
        );
    }
}
