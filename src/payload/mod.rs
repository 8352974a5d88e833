//! Aggregate query payloads
//!
//! - `validator`: structural checks on raw JSON, all defects in one pass
//! - `builder`: constructors for common axis and filter shapes
//! - `loader`: payload files, with or without a `payload` envelope

mod builder;
mod errors;
mod loader;
mod validator;

pub use builder::{
    dimension_axis, member_set_filter, selection_concept_filter, time_axis, QueryBuilder,
    DEFAULT_QUALIFYING_PATH, DEFAULT_TIME_DIMENSION, DEFAULT_TIME_LEVEL,
};
pub use errors::{PayloadError, PayloadResult};
pub use loader::{load_payload, parse_payload};
pub use validator::{validate, PayloadValidator, ValidationReport};
