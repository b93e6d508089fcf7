use super::*;
use crate::Key;
use crate::Link;
use crate::Local;
use crate::Position;
use crate::cards::*;
use crate::schema::*;

/// One trick of a deal.
#[derive(Debug, Clone)]
pub struct Trick {
    key: Option<Key<Self>>,
    deal: Link<Deal>,
    number: i16,
    leader: Position,
    winner: Option<Position>,
    pub cards: Vec<TrickCardPlayed>,
}

impl Trick {
    pub fn new(deal: Local<Deal>, number: i16, leader: Position) -> Self {
        Self {
            key: None,
            deal: Link::new(deal),
            number,
            leader,
            winner: None,
            cards: Vec::new(),
        }
    }
    pub fn won(mut self, winner: Position) -> Self {
        self.win(winner);
        self
    }
    pub fn win(&mut self, winner: Position) {
        self.winner = Some(winner);
    }
    pub fn winner(&self) -> Option<Position> {
        self.winner
    }
    pub fn number(&self) -> i16 {
        self.number
    }
    pub fn leader(&self) -> Position {
        self.leader
    }
    pub fn deal(&self) -> &Link<Deal> {
        &self.deal
    }
    pub fn deal_mut(&mut self) -> &mut Link<Deal> {
        &mut self.deal
    }
}

impl Parent for Trick {
    const TABLE: &'static str = TRICK;
    const REFERENCES: Option<(&'static str, &'static str)> = Some(("deal_id", DEAL));
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("deal_id",      Kind::Int8, |t| Value::from(t.deal.key())),
        Column::required("trick_number", Kind::Int2, |t| Value::Int2(t.number)),
        Column::required("leader",       Kind::Int2, |t| Value::from(t.leader)),
        Column::optional("winner",       Kind::Int2, |t| Value::from(t.winner)),
    ];
    fn key(&self) -> Option<Key<Self>> {
        self.key
    }
    fn assign(&mut self, key: Key<Self>) {
        self.key = Some(key);
    }
}

impl Child for Trick {
    type Owner = Deal;
    fn owner(&self) -> &Link<Deal> {
        &self.deal
    }
    fn owner_mut(&mut self) -> &mut Link<Deal> {
        &mut self.deal
    }
}

/// A card played to a trick.
/// Composite key: (trick_id, play_order)
#[derive(Debug, Clone)]
pub struct TrickCardPlayed {
    owner: Option<Key<Trick>>,
    play_order: i16,
    seat: Position,
    card: Card,
}

impl TrickCardPlayed {
    pub fn new(play_order: i16, seat: Position, card: Card) -> Self {
        Self {
            owner: None,
            play_order,
            seat,
            card,
        }
    }
    pub fn card(&self) -> Card {
        self.card
    }
}

impl Leaf for TrickCardPlayed {
    type Parent = Trick;
    const TABLE: &'static str = TRICK_CARD_PLAYED;
    const PRIMARY: &'static [&'static str] = &["trick_id", "play_order"];
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("trick_id",   Kind::Int8, |c| Value::from(c.owner)),
        Column::required("play_order", Kind::Int2, |c| Value::Int2(c.play_order)),
        Column::required("seat",       Kind::Int2, |c| Value::from(c.seat)),
        Column::required("card",       Kind::Int2, |c| Value::from(c.card)),
    ];
    fn attach(&mut self, key: Key<Trick>) {
        self.owner = Some(key);
    }
}
