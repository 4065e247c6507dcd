use std::fmt;

/// The form fields as the user is typing them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedbackDraft {
    pub name: String,
    pub message: String,
}

/// A validated submission: both fields are non-blank.
///
/// Only obtainable through [`FeedbackDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedbackRecord {
    name: String,
    message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    EmptyName,
    EmptyMessage,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyName => write!(f, "name is required"),
            ValidationError::EmptyMessage => write!(f, "feedback message is required"),
        }
    }
}

impl std::error::Error for ValidationError {}

impl FeedbackDraft {
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Whitespace-only fields count as empty.
    pub fn validate(&self) -> Result<FeedbackRecord, ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.message.trim().is_empty() {
            return Err(ValidationError::EmptyMessage);
        }
        Ok(FeedbackRecord {
            name: self.name.clone(),
            message: self.message.clone(),
        })
    }

    pub fn is_submittable(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.message.clear();
    }
}

impl FeedbackRecord {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_both_fields() {
        let record = FeedbackDraft::new("Ayesha", "بہت اچھا").validate().unwrap();
        assert_eq!(record.name(), "Ayesha");
        assert_eq!(record.message(), "بہت اچھا");
    }

    #[test]
    fn test_validate_rejects_empty_name() {
        let draft = FeedbackDraft::new("", "hello");
        assert_eq!(draft.validate(), Err(ValidationError::EmptyName));
        assert!(!draft.is_submittable());
    }

    #[test]
    fn test_validate_rejects_blank_message() {
        let draft = FeedbackDraft::new("Ali", "   \n");
        assert_eq!(draft.validate(), Err(ValidationError::EmptyMessage));
    }

    #[test]
    fn test_validate_keeps_text_verbatim() {
        let record = FeedbackDraft::new(" Ali ", "line one\nline two").validate().unwrap();
        assert_eq!(record.name(), " Ali ");
        assert_eq!(record.message(), "line one\nline two");
    }

    #[test]
    fn test_clear() {
        let mut draft = FeedbackDraft::new("a", "b");
        draft.clear();
        assert_eq!(draft, FeedbackDraft::default());
    }
}
