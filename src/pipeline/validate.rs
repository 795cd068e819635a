//! Validation: require the core fields to be present and non-empty.
//!
//! The validator never stops at the first problem. It walks the full
//! required-field list, files each offender as *missing* (key absent) or
//! *empty* (present but blank/empty), and raises one aggregated
//! [`ResumeError::Validation`] naming both lists — the user fixes everything
//! from a single message instead of replaying the pipeline once per field.

use crate::error::ResumeError;
use crate::model::ResumeRecord;
use tracing::{error, info};

/// Presence/emptiness state of one required field.
enum FieldState {
    Missing,
    Empty,
    Ok,
}

fn string_state(v: &Option<String>) -> FieldState {
    match v {
        None => FieldState::Missing,
        Some(s) if s.trim().is_empty() => FieldState::Empty,
        Some(_) => FieldState::Ok,
    }
}

fn list_state<T>(v: &Option<Vec<T>>) -> FieldState {
    match v {
        None => FieldState::Missing,
        Some(l) if l.is_empty() => FieldState::Empty,
        Some(_) => FieldState::Ok,
    }
}

/// Check the record for required, non-empty fields.
///
/// String fields are empty when blank after trimming; list fields when they
/// hold no entries. Numeric and boolean scalars were stringified at load
/// time, so they are never empty. Field order in the error report follows
/// the order below.
///
/// # Errors
/// [`ResumeError::Validation`] naming every missing and every empty field.
pub fn validate(record: &ResumeRecord) -> Result<(), ResumeError> {
    let checks: [(&str, FieldState); 11] = [
        ("name", string_state(&record.name)),
        ("date_of_birth", string_state(&record.date_of_birth)),
        ("position", string_state(&record.position)),
        ("email", string_state(&record.email)),
        ("phone", string_state(&record.phone)),
        ("summary", string_state(&record.summary)),
        ("experience", list_state(&record.experience)),
        ("education", list_state(&record.education)),
        ("skills", list_state(&record.skills)),
        ("languages", list_state(&record.languages)),
        ("projects", list_state(&record.projects)),
    ];

    let mut missing = Vec::new();
    let mut empty = Vec::new();
    for (name, state) in checks {
        match state {
            FieldState::Missing => missing.push(name.to_string()),
            FieldState::Empty => empty.push(name.to_string()),
            FieldState::Ok => {}
        }
    }

    if !missing.is_empty() {
        error!("required fields missing: {}", missing.join(", "));
    }
    if !empty.is_empty() {
        error!("required fields empty: {}", empty.join(", "));
    }
    if !missing.is_empty() || !empty.is_empty() {
        return Err(ResumeError::validation(missing, empty));
    }

    info!("resume data passed validation");
    Ok(())
}
