use crate::config::Limits;
use crate::errors::{ValidationError, ValidationIssue, ValidationResult};

fn check_length(field: &str, value: &str, max: usize, issues: &mut Vec<ValidationIssue>) {
    let len = value.chars().count();
    if len > max {
        issues.push(ValidationIssue::new(
            field,
            "validation.length",
            format!("length must be at most {max} (got {len})"),
        ));
    }
}

fn check_not_blank(field: &str, value: &str, issues: &mut Vec<ValidationIssue>) {
    if value.trim().is_empty() {
        issues.push(ValidationIssue::new(field, "validation.required", "must not be blank"));
    }
}

fn finish(issues: Vec<ValidationIssue>) -> ValidationResult<()> {
    if issues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::new(issues))
    }
}

/// Validates the profile fields supplied when registering or editing a user.
/// The bio may be empty.
pub fn validate_profile(display_name: &str, bio: &str, limits: &Limits) -> ValidationResult<()> {
    let mut issues = Vec::new();
    check_not_blank("display_name", display_name, &mut issues);
    check_length("display_name", display_name, limits.max_display_name_len, &mut issues);
    check_length("bio", bio, limits.max_bio_len, &mut issues);
    finish(issues)
}

/// Validates a post, comment or notification body.
pub fn validate_body(field: &str, body: &str, limits: &Limits) -> ValidationResult<()> {
    let mut issues = Vec::new();
    check_not_blank(field, body, &mut issues);
    check_length(field, body, limits.max_body_len, &mut issues);
    finish(issues)
}
