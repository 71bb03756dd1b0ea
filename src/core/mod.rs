//! Pure in-memory core: province resolution and bucket aggregation.
//!
//! Nothing in this module performs I/O; handlers feed it record sets from
//! the repository and reshape its output into the response envelope.

pub mod aggregate;
pub mod resolver;

pub use aggregate::{Aggregation, AggregationBucket, aggregate, outlet_key};
pub use resolver::{candidates, matches_province, resolve};
