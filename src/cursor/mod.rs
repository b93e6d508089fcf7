//! Row sources for the bulk-copy primitive.
//!
//! - [`RowSource`] — forward-only, ordinal-indexed row view
//! - [`Cursor`] — streams straight out of a leaf buffer, no copies
//! - [`Batch`] — materializes a buffer into owned rows first
//! - [`Mapping`] — source→destination column names for a copy
mod batch;
mod mapping;
mod source;
mod stream;

pub use batch::*;
pub use mapping::*;
pub use source::*;
pub use stream::*;
