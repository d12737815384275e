//! Field-level constraint checks.
//!
//! Each entity reports every violated constraint rather than stopping at the
//! first one. Violations in owned children are reported with an indexed
//! field path (`pets[1].name`, `visits[0].description`).

use chrono::NaiveDate;
use petclinic_types::is_wire_date;
use serde::{Deserialize, Serialize};

pub const MUST_NOT_BE_EMPTY: &str = "must not be empty";
pub const MUST_NOT_BE_NULL: &str = "must not be null";
pub const TELEPHONE_OUT_OF_BOUNDS: &str =
    "numeric value out of bounds (<10 digits>.<0 digits> expected)";
pub const DATE_OUT_OF_RANGE: &str = "must be between 0000/01/01 and 9999/12/31";

/// Maximum number of digits in a telephone number.
pub const TELEPHONE_MAX_DIGITS: usize = 10;

/// One violated constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    /// Entity kind, e.g. "owner".
    pub object_name: String,
    /// Field path relative to the validated root.
    pub field_name: String,
    /// The rejected value, when there was one.
    pub field_value: Option<String>,
    pub error_message: String,
}

/// Every violation found while validating one entity graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[serde(transparent)]
#[error("validation failed: {}", describe(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn describe(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}.{} {}", e.object_name, e.field_name, e.error_message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn push(
        &mut self,
        object_name: &str,
        field_name: &str,
        field_value: Option<&str>,
        error_message: &str,
    ) {
        self.0.push(FieldError {
            object_name: object_name.to_string(),
            field_name: field_name.to_string(),
            field_value: field_value.map(str::to_string),
            error_message: error_message.to_string(),
        });
    }

    /// Records a "must not be empty" violation if `value` is empty or blank.
    pub fn require_text(&mut self, object_name: &str, field_name: &str, value: &str) {
        if value.trim().is_empty() {
            self.push(object_name, field_name, Some(value), MUST_NOT_BE_EMPTY);
        }
    }

    /// Records a violation if `date` has no four-digit year.
    pub fn require_wire_date(&mut self, object_name: &str, field_name: &str, date: NaiveDate) {
        if !is_wire_date(date) {
            let value = date.to_string();
            self.push(object_name, field_name, Some(&value), DATE_OUT_OF_RANGE);
        }
    }

    /// Merges a child's violations under `prefix` (e.g. `pets[0]`).
    pub fn absorb(&mut self, prefix: &str, child: ValidationErrors) {
        self.0.extend(child.0.into_iter().map(|mut e| {
            e.field_name = format!("{prefix}.{}", e.field_name);
            e
        }));
    }

    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Constraint checks for one entity type.
pub trait Validate {
    /// Appends this entity's violations to `errors`.
    fn collect_errors(&self, errors: &mut ValidationErrors);

    /// Runs every check and returns the violations, if any.
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        self.collect_errors(&mut errors);
        errors.into_result()
    }
}

/// Telephone numbers are digits only, at most ten of them.
pub fn check_telephone(errors: &mut ValidationErrors, object_name: &str, value: &str) {
    if value.is_empty() {
        errors.push(object_name, "telephone", Some(value), MUST_NOT_BE_EMPTY);
    } else if value.len() > TELEPHONE_MAX_DIGITS || !value.bytes().all(|b| b.is_ascii_digit()) {
        errors.push(object_name, "telephone", Some(value), TELEPHONE_OUT_OF_BOUNDS);
    }
}
