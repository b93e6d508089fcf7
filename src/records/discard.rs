use super::*;
use crate::Estimate;
use crate::Key;
use crate::Link;
use crate::Local;
use crate::Position;
use crate::cards::*;
use crate::schema::*;

/// The dealer's discard after being ordered up.
#[derive(Debug, Clone)]
pub struct DiscardCardDecision {
    key: Option<Key<Self>>,
    deal: Link<Deal>,
    dealer: Position,
    upcard: Card,
    trump: Suit,
    chosen: Card,
    pub hand: Vec<DiscardHandCard>,
    pub points: Vec<DiscardPredictedPoints>,
}

impl DiscardCardDecision {
    pub fn new(deal: Local<Deal>, dealer: Position, upcard: Card, trump: Suit, chosen: Card) -> Self {
        Self {
            key: None,
            deal: Link::new(deal),
            dealer,
            upcard,
            trump,
            chosen,
            hand: Vec::new(),
            points: Vec::new(),
        }
    }
    pub fn chosen(&self) -> Card {
        self.chosen
    }
    pub fn deal(&self) -> &Link<Deal> {
        &self.deal
    }
    pub fn deal_mut(&mut self) -> &mut Link<Deal> {
        &mut self.deal
    }
}

impl Parent for DiscardCardDecision {
    const TABLE: &'static str = DISCARD;
    const REFERENCES: Option<(&'static str, &'static str)> = Some(("deal_id", DEAL));
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("deal_id",     Kind::Int8, |d| Value::from(d.deal.key())),
        Column::required("dealer",      Kind::Int2, |d| Value::from(d.dealer)),
        Column::required("upcard",      Kind::Int2, |d| Value::from(d.upcard)),
        Column::required("trump",       Kind::Int2, |d| Value::from(d.trump)),
        Column::required("chosen_card", Kind::Int2, |d| Value::from(d.chosen)),
    ];
    fn key(&self) -> Option<Key<Self>> {
        self.key
    }
    fn assign(&mut self, key: Key<Self>) {
        self.key = Some(key);
    }
}

impl Child for DiscardCardDecision {
    type Owner = Deal;
    fn owner(&self) -> &Link<Deal> {
        &self.deal
    }
    fn owner_mut(&mut self) -> &mut Link<Deal> {
        &mut self.deal
    }
}

/// One of the dealer's six cards before discarding.
/// Composite key: (discard_card_decision_id, sort_order)
#[derive(Debug, Clone)]
pub struct DiscardHandCard {
    owner: Option<Key<DiscardCardDecision>>,
    sort_order: i16,
    card: Card,
}

impl DiscardHandCard {
    pub fn new(sort_order: i16, card: Card) -> Self {
        Self {
            owner: None,
            sort_order,
            card,
        }
    }
}

impl Leaf for DiscardHandCard {
    type Parent = DiscardCardDecision;
    const TABLE: &'static str = DISCARD_HAND;
    const PRIMARY: &'static [&'static str] = &["discard_card_decision_id", "sort_order"];
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("discard_card_decision_id", Kind::Int8, |c| Value::from(c.owner)),
        Column::required("sort_order",               Kind::Int2, |c| Value::Int2(c.sort_order)),
        Column::required("card",                     Kind::Int2, |c| Value::from(c.card)),
    ];
    fn attach(&mut self, key: Key<DiscardCardDecision>) {
        self.owner = Some(key);
    }
}

/// Model estimate of the points kept by discarding a card.
/// Composite key: (discard_card_decision_id, card)
#[derive(Debug, Clone)]
pub struct DiscardPredictedPoints {
    owner: Option<Key<DiscardCardDecision>>,
    card: Card,
    points: Estimate,
}

impl DiscardPredictedPoints {
    pub fn new(card: Card, points: Estimate) -> Self {
        Self {
            owner: None,
            card,
            points,
        }
    }
}

impl Leaf for DiscardPredictedPoints {
    type Parent = DiscardCardDecision;
    const TABLE: &'static str = DISCARD_POINTS;
    const PRIMARY: &'static [&'static str] = &["discard_card_decision_id", "card"];
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("discard_card_decision_id", Kind::Int8,   |p| Value::from(p.owner)),
        Column::required("card",                     Kind::Int2,   |p| Value::from(p.card)),
        Column::required("predicted_points",         Kind::Float4, |p| Value::Float4(p.points)),
    ];
    fn attach(&mut self, key: Key<DiscardCardDecision>) {
        self.owner = Some(key);
    }
}
