//! CellSet Decoder
//!
//! Materializes the sparse, axis-indexed cell set returned by the aggregate
//! endpoint into flat `TabularRecord`s, one per cell.
//!
//! # Column layout
//!
//! - one column per response axis, in axis order (`Measures` for the
//!   metric axis, the dimension name otherwise)
//! - `value`, then `support` when the cell carries it
//! - a leading `Measures` column when a metric is known but no axis
//!   carries it
//!
//! # Errors
//!
//! API-side failures (`error` in the body) and structural corruption are
//! fatal. Unparsable scalars are not: they decode to null.

mod classify;
mod decoder;
mod errors;
mod record;
mod timelabels;

pub use classify::{classify_axis, is_measures_axis, AxisRole, MEASURES_COLUMN};
pub use decoder::decode;
pub use errors::{DecodeError, DecodeResult};
pub use record::{Scalar, TabularRecord};
pub use timelabels::{to_year_end, year_end_label, DATE_IN_RANGE_COLUMN};
