use super::*;
use crate::Key;
use crate::Link;
use crate::Local;
use crate::Points;
use crate::Position;
use crate::cards::*;
use crate::schema::*;

/// One deal of a game: shuffle, bidding, and five tricks.
#[derive(Debug, Clone)]
pub struct Deal {
    key: Option<Key<Self>>,
    game: Link<Game>,
    number: i16,
    dealer: Position,
    upcard: Card,
    trump: Option<Suit>,
    maker: Option<Position>,
    alone: bool,
    points: [Points; 2],
    pub deck: Vec<DealDeckCard>,
    pub voids: Vec<DealKnownVoid>,
}

impl Deal {
    pub fn new(number: i16, dealer: Position, upcard: Card) -> Self {
        Self {
            key: None,
            game: Link::new(Local::new(0)),
            number,
            dealer,
            upcard,
            trump: None,
            maker: None,
            alone: false,
            points: [0, 0],
            deck: Vec::new(),
            voids: Vec::new(),
        }
    }
    /// Record who named trump. A deal where everyone passed twice keeps
    /// no trump and no maker.
    pub fn called(mut self, trump: Suit, maker: Position, alone: bool) -> Self {
        self.trump = Some(trump);
        self.maker = Some(maker);
        self.alone = alone;
        self
    }
    pub fn scored(mut self, points: [Points; 2]) -> Self {
        self.score(points);
        self
    }
    /// Points each team took from the deal, once it has been played.
    pub fn score(&mut self, points: [Points; 2]) {
        self.points = points;
    }
    pub fn points(&self) -> [Points; 2] {
        self.points
    }
    pub fn number(&self) -> i16 {
        self.number
    }
    pub fn dealer(&self) -> Position {
        self.dealer
    }
    pub fn upcard(&self) -> Card {
        self.upcard
    }
    pub fn trump(&self) -> Option<Suit> {
        self.trump
    }
    pub fn game(&self) -> &Link<Game> {
        &self.game
    }
    pub fn game_mut(&mut self) -> &mut Link<Game> {
        &mut self.game
    }
}

impl Parent for Deal {
    const TABLE: &'static str = DEAL;
    const REFERENCES: Option<(&'static str, &'static str)> = Some(("game_id", GAME));
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("game_id",      Kind::Int8, |d| Value::from(d.game.key())),
        Column::required("deal_number",  Kind::Int2, |d| Value::Int2(d.number)),
        Column::required("dealer",       Kind::Int2, |d| Value::from(d.dealer)),
        Column::required("upcard",       Kind::Int2, |d| Value::from(d.upcard)),
        Column::optional("trump",        Kind::Int2, |d| Value::from(d.trump)),
        Column::optional("maker",        Kind::Int2, |d| Value::from(d.maker)),
        Column::required("going_alone",  Kind::Bool, |d| Value::Bool(d.alone)),
        Column::required("team1_points", Kind::Int2, |d| Value::Int2(d.points[0])),
        Column::required("team2_points", Kind::Int2, |d| Value::Int2(d.points[1])),
    ];
    fn key(&self) -> Option<Key<Self>> {
        self.key
    }
    fn assign(&mut self, key: Key<Self>) {
        self.key = Some(key);
    }
}

impl Child for Deal {
    type Owner = Game;
    fn owner(&self) -> &Link<Game> {
        &self.game
    }
    fn owner_mut(&mut self) -> &mut Link<Game> {
        &mut self.game
    }
}

/// A card's position in the shuffled deck.
/// Composite key: (deal_id, sort_order)
#[derive(Debug, Clone)]
pub struct DealDeckCard {
    owner: Option<Key<Deal>>,
    sort_order: i16,
    card: Card,
}

impl DealDeckCard {
    pub fn new(sort_order: i16, card: Card) -> Self {
        Self {
            owner: None,
            sort_order,
            card,
        }
    }
    pub fn card(&self) -> Card {
        self.card
    }
}

impl Leaf for DealDeckCard {
    type Parent = Deal;
    const TABLE: &'static str = DEAL_DECK_CARD;
    const PRIMARY: &'static [&'static str] = &["deal_id", "sort_order"];
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("deal_id",    Kind::Int8, |c| Value::from(c.owner)),
        Column::required("sort_order", Kind::Int2, |c| Value::Int2(c.sort_order)),
        Column::required("card",       Kind::Int2, |c| Value::from(c.card)),
    ];
    fn attach(&mut self, key: Key<Deal>) {
        self.owner = Some(key);
    }
}

/// A suit some seat showed out of during the deal.
/// Composite key: (deal_id, seat, suit)
#[derive(Debug, Clone)]
pub struct DealKnownVoid {
    owner: Option<Key<Deal>>,
    seat: Position,
    suit: Suit,
}

impl DealKnownVoid {
    pub fn new(seat: Position, suit: Suit) -> Self {
        Self {
            owner: None,
            seat,
            suit,
        }
    }
}

impl Leaf for DealKnownVoid {
    type Parent = Deal;
    const TABLE: &'static str = DEAL_KNOWN_VOID;
    const PRIMARY: &'static [&'static str] = &["deal_id", "seat", "suit"];
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("deal_id", Kind::Int8, |v| Value::from(v.owner)),
        Column::required("seat",    Kind::Int2, |v| Value::from(v.seat)),
        Column::required("suit",    Kind::Int2, |v| Value::from(v.suit)),
    ];
    fn attach(&mut self, key: Key<Deal>) {
        self.owner = Some(key);
    }
}
