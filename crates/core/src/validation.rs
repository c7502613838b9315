//! Designer creation form validation.
//!
//! Runs before any API call: a rejected form never reaches a store. Both
//! fields are trimmed before the rules apply and the trimmed values are what
//! gets submitted.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::model::CreateDesigner;

/// Minimum length of a trimmed full name.
pub const MIN_FULL_NAME_LEN: usize = 3;

/// `HH:MM-HH:MM`, hours 00-23, minutes 00-59, ASCII digits only.
pub const WORKING_HOURS_PATTERN: &str =
    r"^(?:[01][0-9]|2[0-3]):[0-5][0-9]-(?:[01][0-9]|2[0-3]):[0-5][0-9]$";

static WORKING_HOURS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(WORKING_HOURS_PATTERN).expect("valid regex"));

/// Raw values typed into the "Add new designer" form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct DesignerForm {
    #[validate(custom(function = "validate_full_name"))]
    pub full_name: String,
    #[validate(custom(function = "validate_working_hours"))]
    pub working_hours: String,
}

/// Per-field messages for a rejected form, first failing rule only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    pub full_name: Option<String>,
    pub working_hours: Option<String>,
}

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.full_name.is_none() && self.working_hours.is_none()
    }
}

impl From<FormErrors> for CoreError {
    fn from(errors: FormErrors) -> Self {
        let messages: Vec<String> = [errors.full_name, errors.working_hours]
            .into_iter()
            .flatten()
            .collect();
        CoreError::Validation(messages.join("; "))
    }
}

impl DesignerForm {
    pub fn new(full_name: impl Into<String>, working_hours: impl Into<String>) -> Self {
        Self {
            full_name: full_name.into(),
            working_hours: working_hours.into(),
        }
    }

    /// Validate and produce the trimmed creation input.
    pub fn parse(&self) -> Result<CreateDesigner, FormErrors> {
        match self.validate() {
            Ok(()) => Ok(CreateDesigner {
                full_name: self.full_name.trim().to_string(),
                working_hours: self.working_hours.trim().to_string(),
            }),
            Err(errors) => {
                let mut out = FormErrors::default();
                for (field, field_errors) in errors.field_errors() {
                    let field: &str = field.as_ref();
                    let message = field_errors.first().map(message_of);
                    match field {
                        "full_name" => out.full_name = message,
                        "working_hours" => out.working_hours = message,
                        _ => {}
                    }
                }
                Err(out)
            }
        }
    }
}

/// Whether `value` (after trimming) is a valid `HH:MM-HH:MM` range.
pub fn is_valid_working_hours(value: &str) -> bool {
    WORKING_HOURS_RE.is_match(value.trim())
}

fn message_of(error: &ValidationError) -> String {
    error
        .message
        .as_ref()
        .map(|m| m.to_string())
        .unwrap_or_else(|| error.code.to_string())
}

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn validate_full_name(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(rule("required", "Full name is required"));
    }
    if trimmed.chars().count() < MIN_FULL_NAME_LEN {
        return Err(rule(
            "min_length",
            "Full name must be at least 3 characters",
        ));
    }
    Ok(())
}

fn validate_working_hours(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(rule("required", "Working hours is required"));
    }
    if !WORKING_HOURS_RE.is_match(trimmed) {
        return Err(rule(
            "format",
            "Working hours must be in format HH:MM-HH:MM",
        ));
    }
    Ok(())
}
