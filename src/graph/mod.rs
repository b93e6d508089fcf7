//! The in-memory root graph and the leaf buffers pulled out of it.
//!
//! - [`Graph`] — arena of parent records for one game
//! - [`Owns`] — arena lookup by parent type
//! - [`Buffer`] / [`Buffers`] — leaves detached from their parents, with
//!   a parallel list of parent indices for backpatching
mod arena;
mod buffer;
mod flatten;

pub use arena::*;
pub use buffer::*;
