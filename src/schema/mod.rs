//! Column descriptors shared by every load path.
//!
//! - [`Kind`] — semantic column type
//! - [`Value`] — borrowed scalar produced by a column accessor
//! - [`Datum`] — owned twin of [`Value`] for materialized rows
//! - [`Column`] — name, kind, nullability, and accessor for one column
//! - [`Leaf`] / [`Parent`] — per-record table metadata
//! - [`Registry`] — type-keyed lookup of leaf descriptors
//!
//! ## Table Names
//!
//! Constants for all 23 tables: 7 parents and 16 leaves.
mod column;
mod kind;
mod record;
mod registry;
mod tables;
mod value;

pub use column::*;
pub use kind::*;
pub use record::*;
pub use registry::*;
pub use tables::*;
pub use value::*;
