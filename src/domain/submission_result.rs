use crate::domain::{Field, FieldErrors, NewSubscriber};

pub const VALIDATION_FAILED: &str = "Validation failed. Please check your inputs.";
pub const STORAGE_FAILED: &str = "Database error. Failed to subscribe. Please try again.";

/// State handed back to the page after a submission.
///
/// Only the constructors below build one, so `success == true` never comes
/// with `errors` and `errors` is only set on a failed submission.
/// Deserializing rejects a payload that breaks that rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "RawSubmissionResult")]
pub struct SubmissionResult {
    success: bool,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<FieldErrors>,
}

#[derive(serde::Deserialize)]
struct RawSubmissionResult {
    success: bool,
    message: String,
    #[serde(default)]
    errors: Option<FieldErrors>,
}

impl TryFrom<RawSubmissionResult> for SubmissionResult {
    type Error = String;

    fn try_from(raw: RawSubmissionResult) -> Result<Self, Self::Error> {
        if raw.success && raw.errors.is_some() {
            return Err("a successful submission cannot carry field errors".to_string());
        }
        Ok(Self {
            success: raw.success,
            message: raw.message,
            errors: raw.errors,
        })
    }
}

impl SubmissionResult {
    /// Before anything was submitted.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn subscribed(subscriber: &NewSubscriber) -> Self {
        Self {
            success: true,
            message: format!(
                "Success! Welcome, {}. Your email ({}) is registered.",
                subscriber.name, subscriber.email
            ),
            errors: None,
        }
    }

    pub fn invalid(errors: FieldErrors) -> Self {
        Self {
            success: false,
            message: VALIDATION_FAILED.to_string(),
            errors: Some(errors),
        }
    }

    pub fn storage_failure() -> Self {
        Self {
            success: false,
            message: STORAGE_FAILED.to_string(),
            errors: None,
        }
    }

    pub fn success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn errors(&self) -> Option<&FieldErrors> {
        self.errors.as_ref()
    }

    pub fn first_error(&self, field: Field) -> Option<&str> {
        self.errors.as_ref().and_then(|errors| errors.first(field))
    }
}
