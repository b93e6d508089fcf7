use super::*;
use crate::Estimate;
use crate::Key;
use crate::Link;
use crate::Local;
use crate::Position;
use crate::cards::*;
use crate::schema::*;

/// A card play decision within a trick, with everything the player could
/// see at the time.
#[derive(Debug, Clone)]
pub struct PlayCardDecision {
    key: Option<Key<Self>>,
    trick: Link<Trick>,
    seat: Position,
    leader: Position,
    trump: Suit,
    lead: Option<Suit>,
    chosen: Card,
    pub hand: Vec<PlayHandCard>,
    pub played: Vec<PlayPlayedCard>,
    pub valid: Vec<PlayValidCard>,
    pub voids: Vec<PlayKnownVoid>,
    pub accounted: Vec<PlayAccountedCard>,
    pub points: Vec<PlayPredictedPoints>,
}

impl PlayCardDecision {
    pub fn new(trick: Local<Trick>, seat: Position, leader: Position, trump: Suit, chosen: Card) -> Self {
        Self {
            key: None,
            trick: Link::new(trick),
            seat,
            leader,
            trump,
            lead: None,
            chosen,
            hand: Vec::new(),
            played: Vec::new(),
            valid: Vec::new(),
            voids: Vec::new(),
            accounted: Vec::new(),
            points: Vec::new(),
        }
    }
    /// Suit led to the trick, absent when this seat is leading.
    pub fn following(mut self, lead: Suit) -> Self {
        self.lead = Some(lead);
        self
    }
    pub fn seat(&self) -> Position {
        self.seat
    }
    pub fn chosen(&self) -> Card {
        self.chosen
    }
    pub fn trick(&self) -> &Link<Trick> {
        &self.trick
    }
    pub fn trick_mut(&mut self) -> &mut Link<Trick> {
        &mut self.trick
    }
}

impl Parent for PlayCardDecision {
    const TABLE: &'static str = PLAY_CARD;
    const REFERENCES: Option<(&'static str, &'static str)> = Some(("trick_id", TRICK));
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("trick_id",    Kind::Int8, |p| Value::from(p.trick.key())),
        Column::required("seat",        Kind::Int2, |p| Value::from(p.seat)),
        Column::required("leader",      Kind::Int2, |p| Value::from(p.leader)),
        Column::required("trump",       Kind::Int2, |p| Value::from(p.trump)),
        Column::optional("lead_suit",   Kind::Int2, |p| Value::from(p.lead)),
        Column::required("chosen_card", Kind::Int2, |p| Value::from(p.chosen)),
    ];
    fn key(&self) -> Option<Key<Self>> {
        self.key
    }
    fn assign(&mut self, key: Key<Self>) {
        self.key = Some(key);
    }
}

impl Child for PlayCardDecision {
    type Owner = Trick;
    fn owner(&self) -> &Link<Trick> {
        &self.trick
    }
    fn owner_mut(&mut self) -> &mut Link<Trick> {
        &mut self.trick
    }
}

/// A card in the player's hand.
/// Composite key: (play_card_decision_id, sort_order)
#[derive(Debug, Clone)]
pub struct PlayHandCard {
    owner: Option<Key<PlayCardDecision>>,
    sort_order: i16,
    card: Card,
}

impl PlayHandCard {
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

impl Leaf for PlayHandCard {
    type Parent = PlayCardDecision;
    const TABLE: &'static str = PLAY_CARD_HAND;
    const PRIMARY: &'static [&'static str] = &["play_card_decision_id", "sort_order"];
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("play_card_decision_id", Kind::Int8, |c| Value::from(c.owner)),
        Column::required("sort_order",            Kind::Int2, |c| Value::Int2(c.sort_order)),
        Column::required("card",                  Kind::Int2, |c| Value::from(c.card)),
    ];
    fn attach(&mut self, key: Key<PlayCardDecision>) {
        self.owner = Some(key);
    }
}

/// A card some seat has already played this deal.
/// Composite key: (play_card_decision_id, seat, card)
#[derive(Debug, Clone)]
pub struct PlayPlayedCard {
    owner: Option<Key<PlayCardDecision>>,
    seat: Position,
    card: Card,
}

impl PlayPlayedCard {
    pub fn new(seat: Position, card: Card) -> Self {
        Self {
            owner: None,
            seat,
            card,
        }
    }
}

impl Leaf for PlayPlayedCard {
    type Parent = PlayCardDecision;
    const TABLE: &'static str = PLAY_CARD_PLAYED;
    const PRIMARY: &'static [&'static str] = &["play_card_decision_id", "seat", "card"];
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("play_card_decision_id", Kind::Int8, |c| Value::from(c.owner)),
        Column::required("seat",                  Kind::Int2, |c| Value::from(c.seat)),
        Column::required("card",                  Kind::Int2, |c| Value::from(c.card)),
    ];
    fn attach(&mut self, key: Key<PlayCardDecision>) {
        self.owner = Some(key);
    }
}

/// A legal play.
/// Composite key: (play_card_decision_id, card)
#[derive(Debug, Clone)]
pub struct PlayValidCard {
    owner: Option<Key<PlayCardDecision>>,
    card: Card,
}

impl PlayValidCard {
    pub fn new(card: Card) -> Self {
        Self { owner: None, card }
    }
    pub fn card(&self) -> Card {
        self.card
    }
}

impl Leaf for PlayValidCard {
    type Parent = PlayCardDecision;
    const TABLE: &'static str = PLAY_CARD_VALID;
    const PRIMARY: &'static [&'static str] = &["play_card_decision_id", "card"];
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("play_card_decision_id", Kind::Int8, |c| Value::from(c.owner)),
        Column::required("card",                  Kind::Int2, |c| Value::from(c.card)),
    ];
    fn attach(&mut self, key: Key<PlayCardDecision>) {
        self.owner = Some(key);
    }
}

/// A suit some seat is known to be out of.
/// Composite key: (play_card_decision_id, seat, suit)
#[derive(Debug, Clone)]
pub struct PlayKnownVoid {
    owner: Option<Key<PlayCardDecision>>,
    seat: Position,
    suit: Suit,
}

impl PlayKnownVoid {
    pub fn new(seat: Position, suit: Suit) -> Self {
        Self {
            owner: None,
            seat,
            suit,
        }
    }
}

impl Leaf for PlayKnownVoid {
    type Parent = PlayCardDecision;
    const TABLE: &'static str = PLAY_CARD_VOID;
    const PRIMARY: &'static [&'static str] = &["play_card_decision_id", "seat", "suit"];
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("play_card_decision_id", Kind::Int8, |v| Value::from(v.owner)),
        Column::required("seat",                  Kind::Int2, |v| Value::from(v.seat)),
        Column::required("suit",                  Kind::Int2, |v| Value::from(v.suit)),
    ];
    fn attach(&mut self, key: Key<PlayCardDecision>) {
        self.owner = Some(key);
    }
}

/// A card known to be out of play: already played, buried, or the kitty.
/// Composite key: (play_card_decision_id, card)
#[derive(Debug, Clone)]
pub struct PlayAccountedCard {
    owner: Option<Key<PlayCardDecision>>,
    card: Card,
}

impl PlayAccountedCard {
    pub fn new(card: Card) -> Self {
        Self { owner: None, card }
    }
}

impl Leaf for PlayAccountedCard {
    type Parent = PlayCardDecision;
    const TABLE: &'static str = PLAY_CARD_ACCOUNTED;
    const PRIMARY: &'static [&'static str] = &["play_card_decision_id", "card"];
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("play_card_decision_id", Kind::Int8, |c| Value::from(c.owner)),
        Column::required("card",                  Kind::Int2, |c| Value::from(c.card)),
    ];
    fn attach(&mut self, key: Key<PlayCardDecision>) {
        self.owner = Some(key);
    }
}

/// Model estimate of the points won by playing a card.
/// Composite key: (play_card_decision_id, card)
#[derive(Debug, Clone)]
pub struct PlayPredictedPoints {
    owner: Option<Key<PlayCardDecision>>,
    card: Card,
    points: Estimate,
}

impl PlayPredictedPoints {
    pub fn new(card: Card, points: Estimate) -> Self {
        Self {
            owner: None,
            card,
            points,
        }
    }
}

impl Leaf for PlayPredictedPoints {
    type Parent = PlayCardDecision;
    const TABLE: &'static str = PLAY_CARD_POINTS;
    const PRIMARY: &'static [&'static str] = &["play_card_decision_id", "card"];
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("play_card_decision_id", Kind::Int8,   |p| Value::from(p.owner)),
        Column::required("card",                  Kind::Int2,   |p| Value::from(p.card)),
        Column::required("predicted_points",      Kind::Float4, |p| Value::Float4(p.points)),
    ];
    fn attach(&mut self, key: Key<PlayCardDecision>) {
        self.owner = Some(key);
    }
}
