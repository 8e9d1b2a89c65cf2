//! Note entity and the validated draft accepted by stores

use crate::error::ValidationError;
use crate::identity::{NoteId, Timestamp};
use serde::{Deserialize, Serialize};

/// Minimum title length, in characters.
pub const TITLE_MIN_CHARS: usize = 1;

/// Maximum title length, in characters. Matches the `varchar(20)` column.
pub const TITLE_MAX_CHARS: usize = 20;

/// A persisted note.
///
/// `id`, `created` and `changed` are owned by the store; clients only ever
/// supply a title and a description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub description: String,
    pub created: Timestamp,
    /// `None` until the first update.
    pub changed: Option<Timestamp>,
}

/// Title and description that passed validation.
///
/// Stores only accept this type for insert and update, so an unvalidated
/// payload can never be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    title: String,
    description: String,
}

impl NoteDraft {
    /// Validate and build a draft. The title is checked before the
    /// description.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let description = description.into();
        validate_title(&title)?;
        validate_description(&description)?;
        Ok(Self { title, description })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Title must hold between 1 and 20 Unicode scalar values.
pub fn validate_title(title: &str) -> Result<(), ValidationError> {
    let length = title.chars().count();
    if (TITLE_MIN_CHARS..=TITLE_MAX_CHARS).contains(&length) {
        Ok(())
    } else {
        Err(ValidationError::InvalidTitle { length })
    }
}

/// Description must not be empty. Whitespace counts as content.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    if description.is_empty() {
        Err(ValidationError::InvalidDescription)
    } else {
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_boundaries() {
        assert_eq!(
            validate_title(""),
            Err(ValidationError::InvalidTitle { length: 0 })
        );
        assert!(validate_title("a").is_ok());
        assert!(validate_title(&"a".repeat(20)).is_ok());
        assert_eq!(
            validate_title(&"a".repeat(21)),
            Err(ValidationError::InvalidTitle { length: 21 })
        );
    }

    #[test]
    fn test_title_counts_characters_not_bytes() {
        // 20 two-byte characters: 40 bytes, still a valid title
        let title = "é".repeat(20);
        assert_eq!(title.len(), 40);
        assert!(validate_title(&title).is_ok());
        assert!(validate_title(&"é".repeat(21)).is_err());
    }

    #[test]
    fn test_description_must_not_be_empty() {
        assert_eq!(
            validate_description(""),
            Err(ValidationError::InvalidDescription)
        );
        assert!(validate_description(" \t\n").is_ok());
        assert!(validate_description("x").is_ok());
    }

    #[test]
    fn test_draft_checks_title_first() {
        let err = NoteDraft::new("", "").unwrap_err();
        assert_eq!(err, ValidationError::InvalidTitle { length: 0 });
    }

    #[test]
    fn test_draft_keeps_values_verbatim() {
        let draft = NoteDraft::new("Groceries", "  milk, eggs  ").unwrap();
        assert_eq!(draft.title(), "Groceries");
        assert_eq!(draft.description(), "  milk, eggs  ");
    }
}
