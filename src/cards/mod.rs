pub mod call;
pub use call::*;

pub mod card;
pub use card::*;

pub mod rank;
pub use rank::*;

pub mod suit;
pub use suit::*;
