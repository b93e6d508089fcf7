//! The bulk load state machine.
//!
//! One root graph per call, one transaction per graph:
//!
//! ```text
//! parents → flatten → backpatch → copy (per table) → commit
//! ```
//!
//! Any failure, or a cancellation seen before commit, rolls the whole
//! graph back.
mod load;
mod receipt;
mod step;

pub use load::*;
pub use receipt::*;
pub use step::*;
