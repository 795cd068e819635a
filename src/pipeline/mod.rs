//! Pipeline stages for resume generation.
//!
//! Each submodule implements exactly one transformation step, independently
//! callable and independently testable.
//!
//! ## Data Flow
//!
//! ```text
//! load ──▶ validate ──▶ enrich ──▶ images ──▶ render
//! (YAML)   (required    (derive    (resolve    (HTML, then
//!           fields)      age)       ImageRefs)  optional PDF)
//! ```
//!
//! 1. [`load`]     — parse the YAML data file into a `ResumeRecord`
//! 2. [`validate`] — require the core fields, reporting all offenders at once
//! 3. [`enrich`]   — derive `age` from the birth date; never fails
//! 4. [`images`]   — resolve image references, downloading and caching;
//!    failures degrade, they never abort the run
//! 5. [`render`]   — full HTML pass, then optionally a print pass converted
//!    to PDF by an external engine
//!
//! The flow is strictly left to right, once per run. Validation failures
//! stop the run before any image resolution or rendering happens.

pub mod enrich;
pub mod images;
pub mod load;
pub mod render;
pub mod validate;
