use super::*;
use crate::Key;
use crate::Link;
use crate::Local;
use crate::Position;
use crate::cards::*;
use crate::schema::*;

/// A seat's participation in one deal.
#[derive(Debug, Clone)]
pub struct DealPlayer {
    key: Option<Key<Self>>,
    deal: Link<Deal>,
    seat: Position,
    pub hand: Vec<StartingHandCard>,
}

impl DealPlayer {
    pub fn new(deal: Local<Deal>, seat: Position) -> Self {
        Self {
            key: None,
            deal: Link::new(deal),
            seat,
            hand: Vec::new(),
        }
    }
    pub fn seat(&self) -> Position {
        self.seat
    }
    pub fn deal(&self) -> &Link<Deal> {
        &self.deal
    }
    pub fn deal_mut(&mut self) -> &mut Link<Deal> {
        &mut self.deal
    }
}

impl Parent for DealPlayer {
    const TABLE: &'static str = DEAL_PLAYER;
    const REFERENCES: Option<(&'static str, &'static str)> = Some(("deal_id", DEAL));
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("deal_id", Kind::Int8, |p| Value::from(p.deal.key())),
        Column::required("seat",    Kind::Int2, |p| Value::from(p.seat)),
    ];
    fn key(&self) -> Option<Key<Self>> {
        self.key
    }
    fn assign(&mut self, key: Key<Self>) {
        self.key = Some(key);
    }
}

impl Child for DealPlayer {
    type Owner = Deal;
    fn owner(&self) -> &Link<Deal> {
        &self.deal
    }
    fn owner_mut(&mut self) -> &mut Link<Deal> {
        &mut self.deal
    }
}

/// A card dealt to a seat, in the order it was dealt.
/// Composite key: (deal_player_id, sort_order)
#[derive(Debug, Clone)]
pub struct StartingHandCard {
    owner: Option<Key<DealPlayer>>,
    sort_order: i16,
    card: Card,
}

impl StartingHandCard {
    pub fn new(sort_order: i16, card: Card) -> Self {
        Self {
            owner: None,
            sort_order,
            card,
        }
    }
}

impl Leaf for StartingHandCard {
    type Parent = DealPlayer;
    const TABLE: &'static str = STARTING_HAND_CARD;
    const PRIMARY: &'static [&'static str] = &["deal_player_id", "sort_order"];
    #[rustfmt::skip]
    const COLUMNS: &'static [Column<Self>] = &[
        Column::required("deal_player_id", Kind::Int8, |c| Value::from(c.owner)),
        Column::required("sort_order",     Kind::Int2, |c| Value::Int2(c.sort_order)),
        Column::required("card",           Kind::Int2, |c| Value::from(c.card)),
    ];
    fn attach(&mut self, key: Key<DealPlayer>) {
        self.owner = Some(key);
    }
}
