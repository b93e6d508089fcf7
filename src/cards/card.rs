use super::rank::Rank;
use super::suit::Suit;
use std::fmt::Display;
use std::fmt::Formatter;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Card {
    suit: Suit,
    rank: Rank,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }
    pub fn rank(&self) -> Rank {
        self.rank
    }
    pub fn suit(&self) -> Suit {
        self.suit
    }
    /// All 24 cards, ordered by suit then rank.
    pub fn deck() -> [Self; 24] {
        let mut deck = [Card::new(Rank::Nine, Suit::Club); 24];
        for (i, card) in deck.iter_mut().enumerate() {
            *card = Self::from_index(i);
        }
        deck
    }
    /// Suit this card follows once trump is named. The left bower
    /// belongs to trump rather than its printed suit.
    pub fn effective(&self, trump: Suit) -> Suit {
        if self.rank == Rank::Jack && self.suit == trump.sibling() {
            trump
        } else {
            self.suit
        }
    }
    fn from_index(i: usize) -> Self {
        Self {
            suit: Suit::all()[i / 6],
            rank: Rank::all()[i % 6],
        }
    }
}

/// i16 isomorphism
/// each card is mapped to its location in a sorted 24-card deck
/// Js
/// 3 * 6 + 2
/// 20
impl From<Card> for i16 {
    fn from(c: Card) -> i16 {
        u8::from(c.suit) as i16 * 6 + u8::from(c.rank) as i16
    }
}
impl TryFrom<i16> for Card {
    type Error = String;
    fn try_from(n: i16) -> Result<Self, Self::Error> {
        match n {
            0..24 => Ok(Self::from_index(n as usize)),
            _ => Err(format!("invalid card i16: {}", n)),
        }
    }
}

/// str isomorphism
impl TryFrom<&str> for Card {
    type Error = String;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(r), Some(s), None) => Ok(Self {
                rank: Rank::try_from(r.to_string().as_str())?,
                suit: Suit::try_from(s.to_string().as_str())?,
            }),
            _ => Err(format!("invalid card str: {}", s)),
        }
    }
}

impl Display for Card {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}
