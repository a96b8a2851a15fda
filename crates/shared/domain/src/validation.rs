//! Custom rules for `#[derive(Validate)]` inputs.

use validator::ValidationError;

/// Reject strings made only of whitespace
pub(crate) fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
