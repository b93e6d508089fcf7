//! Typed handles for parent records.
//!
//! A parent is addressed two ways over its lifetime: by its [`Local`] index
//! in the in-memory [`Graph`](crate::Graph) from the moment it is built, and
//! by its database-generated [`Key`] once the store has inserted it.
mod key;
mod link;
mod local;

pub use key::*;
pub use link::*;
pub use local::*;
