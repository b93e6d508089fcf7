//! Parent records and the leaf rows they own.
//!
//! Each file holds one parent type, its leaf collections, and the column
//! descriptors for all of them.
//!
//! ```text
//! Game ── GamePlayer
//!  └─ Deal ── DealDeckCard, DealKnownVoid
//!      ├─ DealPlayer ── StartingHandCard
//!      ├─ CallTrumpDecision ── CallHandCard, CallValidDecision, CallPredictedPoints
//!      ├─ DiscardCardDecision ── DiscardHandCard, DiscardPredictedPoints
//!      └─ Trick ── TrickCardPlayed
//!          └─ PlayCardDecision ── PlayHandCard, PlayPlayedCard, PlayValidCard,
//!                                 PlayKnownVoid, PlayAccountedCard, PlayPredictedPoints
//! ```
mod call;
mod deal;
mod discard;
mod game;
mod play;
mod player;
mod trick;

pub use call::*;
pub use deal::*;
pub use discard::*;
pub use game::*;
pub use play::*;
pub use player::*;
pub use trick::*;
