//! Required-field checks for form input. Everything else is left to the
//! backend, whose field errors are shown as returned.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            is_valid: false,
            error: Some(message.into()),
        }
    }
}

pub fn validate_required(value: &str, label: &str) -> ValidationResult {
    if value.trim().is_empty() {
        return ValidationResult::err(format!("{label} is required"));
    }
    ValidationResult::ok()
}

pub fn validate_password_match(password: &str, confirm: &str) -> ValidationResult {
    if password != confirm {
        return ValidationResult::err("New passwords do not match");
    }
    ValidationResult::ok()
}
