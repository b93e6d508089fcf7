use super::*;
use crate::Estimate;
use crate::Key;
use crate::Link;
use crate::Local;
use crate::Position;
use crate::cards::*;
use crate::schema::*;

/// A bid made by one seat while trump was being called.
#[derive(Debug, Clone)]
pub struct CallTrumpDecision {
    key: Option<Key<Self>>,
    deal: Link<Deal>,
    seat: Position,
    dealer: Position,
    upcard: Card,
    chosen: CallTrump,
    ordinal: i16,
    pub hand: Vec<CallHandCard>,
    pub valid: Vec<CallValidDecision>,
    pub points: Vec<CallPredictedPoints>,
}

impl CallTrumpDecision {
    pub fn new(
        deal: Local<Deal>,
        seat: Position,
        dealer: Position,
        upcard: Card,
        chosen: CallTrump,
        ordinal: i16,
    ) -> Self {
        Self {
            key: None,
            deal: Link::new(deal),
            seat,
            dealer,
            upcard,
            chosen,
            ordinal,
            hand: Vec::new(),
            valid: Vec::new(),
            points: Vec::new(),
        }
    }
    pub fn chosen(&self) -> CallTrump {
        self.chosen
    }
    pub fn deal(&self) -> &Link<Deal> {
        &self.deal
    }
    pub fn deal_mut(&mut self) -> &mut Link<Deal> {
        &mut self.deal
    }
}

impl Parent for CallTrumpDecision {
    const TABLE: &'static str = CALL_TRUMP;
    const REFERENCES: Option<(&'static str, &'static str)> = Some(("deal_id", DEAL));
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("deal_id",         Kind::Int8, |c| Value::from(c.deal.key())),
        Column::required("seat",            Kind::Int2, |c| Value::from(c.seat)),
        Column::required("dealer",          Kind::Int2, |c| Value::from(c.dealer)),
        Column::required("upcard",          Kind::Int2, |c| Value::from(c.upcard)),
        Column::required("chosen_decision", Kind::Text, |c| Value::Text(c.chosen.label())),
        Column::required("decision_order",  Kind::Int2, |c| Value::Int2(c.ordinal)),
    ];
    fn key(&self) -> Option<Key<Self>> {
        self.key
    }
    fn assign(&mut self, key: Key<Self>) {
        self.key = Some(key);
    }
}

impl Child for CallTrumpDecision {
    type Owner = Deal;
    fn owner(&self) -> &Link<Deal> {
        &self.deal
    }
    fn owner_mut(&mut self) -> &mut Link<Deal> {
        &mut self.deal
    }
}

/// A card in the bidder's hand.
/// Composite key: (call_trump_decision_id, sort_order)
#[derive(Debug, Clone)]
pub struct CallHandCard {
    owner: Option<Key<CallTrumpDecision>>,
    sort_order: i16,
    card: Card,
}

impl CallHandCard {
    pub fn new(sort_order: i16, card: Card) -> Self {
        Self {
            owner: None,
            sort_order,
            card,
        }
    }
}

impl Leaf for CallHandCard {
    type Parent = CallTrumpDecision;
    const TABLE: &'static str = CALL_TRUMP_HAND;
    const PRIMARY: &'static [&'static str] = &["call_trump_decision_id", "sort_order"];
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("call_trump_decision_id", Kind::Int8, |c| Value::from(c.owner)),
        Column::required("sort_order",             Kind::Int2, |c| Value::Int2(c.sort_order)),
        Column::required("card",                   Kind::Int2, |c| Value::from(c.card)),
    ];
    fn attach(&mut self, key: Key<CallTrumpDecision>) {
        self.owner = Some(key);
    }
}

/// A bid the seat was allowed to make.
/// Composite key: (call_trump_decision_id, decision)
#[derive(Debug, Clone)]
pub struct CallValidDecision {
    owner: Option<Key<CallTrumpDecision>>,
    decision: CallTrump,
}

impl CallValidDecision {
    pub fn new(decision: CallTrump) -> Self {
        Self {
            owner: None,
            decision,
        }
    }
}

impl Leaf for CallValidDecision {
    type Parent = CallTrumpDecision;
    const TABLE: &'static str = CALL_TRUMP_VALID;
    const PRIMARY: &'static [&'static str] = &["call_trump_decision_id", "decision"];
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("call_trump_decision_id", Kind::Int8, |v| Value::from(v.owner)),
        Column::required("decision",               Kind::Text, |v| Value::Text(v.decision.label())),
    ];
    fn attach(&mut self, key: Key<CallTrumpDecision>) {
        self.owner = Some(key);
    }
}

/// Model estimate of the points a bid would win.
/// Composite key: (call_trump_decision_id, decision)
#[derive(Debug, Clone)]
pub struct CallPredictedPoints {
    owner: Option<Key<CallTrumpDecision>>,
    decision: CallTrump,
    points: Estimate,
}

impl CallPredictedPoints {
    pub fn new(decision: CallTrump, points: Estimate) -> Self {
        Self {
            owner: None,
            decision,
            points,
        }
    }
}

impl Leaf for CallPredictedPoints {
    type Parent = CallTrumpDecision;
    const TABLE: &'static str = CALL_TRUMP_POINTS;
    const PRIMARY: &'static [&'static str] = &["call_trump_decision_id", "decision"];
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("call_trump_decision_id", Kind::Int8,   |p| Value::from(p.owner)),
        Column::required("decision",               Kind::Text,   |p| Value::Text(p.decision.label())),
        Column::required("predicted_points",       Kind::Float4, |p| Value::Float4(p.points)),
    ];
    fn attach(&mut self, key: Key<CallTrumpDecision>) {
        self.owner = Some(key);
    }
}
