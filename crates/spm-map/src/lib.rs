//! Field mapping workflow.
//!
//! The analysis endpoint suggests one standard field per CSV header. The user
//! may override any suggestion, reset it, and finally submit the complete
//! mapping once every header has a target.

#![deny(unsafe_code)]

pub mod notes;
pub mod state;
pub mod step;

pub use notes::{AdvisoryNote, NoteKind, classify_note};
pub use state::{MappingState, MappingSummary, SUCCESS_BANNER_DURATION};
pub use step::{MappingStep, SAMPLE_ROW_LIMIT};
