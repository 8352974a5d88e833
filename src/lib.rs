//! cellquery - validation and decoding for aggregate analytics queries
//!
//! Pure core: `payload` checks request bodies, `cellset` flattens cell set
//! responses. `transport` and `batch` talk to the API; `cli` wires it up.

pub mod axis;
pub mod batch;
pub mod cellset;
pub mod cli;
pub mod observability;
pub mod payload;
pub mod transport;

pub use cellset::{decode, DecodeError, Scalar, TabularRecord};
pub use payload::{validate, PayloadValidator, ValidationReport};
