use serde::Deserialize;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateAccountRequest {
    pub user_id: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateAccountRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateProfileRequest {
    pub user_id: String,
    pub display_name: String,
}

/// Trimmed copy of a required text field, or `None` when blank.
pub fn required_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_trims_and_rejects_blank() {
        assert_eq!(required_text("  Main  ").as_deref(), Some("Main"));
        assert_eq!(required_text("   "), None);
        assert_eq!(required_text(""), None);
    }
}
