//! Enrichment: derive `age` from `date_of_birth`.
//!
//! This stage never fails. A missing or unparseable birth date yields age 0
//! and a warning; a bad date must not block document generation.

use crate::model::ResumeRecord;
use chrono::{Datelike, Local, NaiveDate};
use tracing::{debug, warn};

/// Whole years between `dob` and `today`, with the has-the-birthday-occurred
/// adjustment: one year is subtracted while `today` is still before this
/// year's birthday. A `dob` in the future clamps to 0.
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> u32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age.max(0) as u32
}

/// Set `record.age` from `record.date_of_birth` as of the current date.
///
/// Idempotent: re-running recomputes the same value for the same date.
pub fn enrich(record: &mut ResumeRecord) {
    let today = Local::now().date_naive();
    record.age = match record.date_of_birth.as_deref() {
        Some(s) => match NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d") {
            Ok(dob) => {
                let age = age_on(dob, today);
                debug!("derived age {age} from date of birth {s}");
                age
            }
            Err(e) => {
                warn!("could not parse date_of_birth '{s}': {e}; age set to 0");
                0
            }
        },
        None => {
            warn!("date_of_birth is absent; age set to 0");
            0
        }
    };
}
