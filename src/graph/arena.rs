use crate::Error;
use crate::Key;
use crate::Local;
use crate::records::*;
use crate::schema::*;

/// One finished game and every parent record beneath it.
///
/// Parents live in per-type arenas and refer to their owners by [`Local`]
/// index; leaves stay inside their parents until [`flatten`](Graph::flatten)
/// moves them out.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    game: Game,
    deals: Vec<Deal>,
    players: Vec<DealPlayer>,
    calls: Vec<CallTrumpDecision>,
    discards: Vec<DiscardCardDecision>,
    tricks: Vec<Trick>,
    plays: Vec<PlayCardDecision>,
}

/// Arena access for one parent type.
pub trait Owns<P> {
    fn arena(&self) -> &[P];
    fn arena_mut(&mut self) -> &mut [P];
}

macro_rules! arena {
    ($parent:ty, $field:ident) => {
        impl Owns<$parent> for Graph {
            fn arena(&self) -> &[$parent] {
                &self.$field
            }
            fn arena_mut(&mut self) -> &mut [$parent] {
                &mut self.$field
            }
        }
    };
}

impl Owns<Game> for Graph {
    fn arena(&self) -> &[Game] {
        std::slice::from_ref(&self.game)
    }
    fn arena_mut(&mut self) -> &mut [Game] {
        std::slice::from_mut(&mut self.game)
    }
}
arena!(Deal, deals);
arena!(DealPlayer, players);
arena!(CallTrumpDecision, calls);
arena!(DiscardCardDecision, discards);
arena!(Trick, tricks);
arena!(PlayCardDecision, plays);

impl Graph {
    pub fn new(game: Game) -> Self {
        Self {
            game,
            ..Self::default()
        }
    }

    // builders

    pub fn deal(&mut self, deal: Deal) -> Local<Deal> {
        self.deals.push(deal);
        Local::new(self.deals.len() - 1)
    }
    pub fn player(&mut self, player: DealPlayer) -> Local<DealPlayer> {
        self.players.push(player);
        Local::new(self.players.len() - 1)
    }
    pub fn call(&mut self, call: CallTrumpDecision) -> Local<CallTrumpDecision> {
        self.calls.push(call);
        Local::new(self.calls.len() - 1)
    }
    pub fn discard(&mut self, discard: DiscardCardDecision) -> Local<DiscardCardDecision> {
        self.discards.push(discard);
        Local::new(self.discards.len() - 1)
    }
    pub fn trick(&mut self, trick: Trick) -> Local<Trick> {
        self.tricks.push(trick);
        Local::new(self.tricks.len() - 1)
    }
    pub fn play(&mut self, play: PlayCardDecision) -> Local<PlayCardDecision> {
        self.plays.push(play);
        Local::new(self.plays.len() - 1)
    }

    // accessors

    pub fn game(&self) -> &Game {
        &self.game
    }
    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }
    pub fn deals(&self) -> &[Deal] {
        &self.deals
    }
    pub fn players(&self) -> &[DealPlayer] {
        &self.players
    }
    pub fn calls(&self) -> &[CallTrumpDecision] {
        &self.calls
    }
    pub fn discards(&self) -> &[DiscardCardDecision] {
        &self.discards
    }
    pub fn tricks(&self) -> &[Trick] {
        &self.tricks
    }
    pub fn plays(&self) -> &[PlayCardDecision] {
        &self.plays
    }
    pub fn deal_mut(&mut self, local: Local<Deal>) -> Option<&mut Deal> {
        self.get_mut(local)
    }
    pub fn player_mut(&mut self, local: Local<DealPlayer>) -> Option<&mut DealPlayer> {
        self.get_mut(local)
    }
    pub fn call_mut(&mut self, local: Local<CallTrumpDecision>) -> Option<&mut CallTrumpDecision> {
        self.get_mut(local)
    }
    pub fn discard_mut(&mut self, local: Local<DiscardCardDecision>) -> Option<&mut DiscardCardDecision> {
        self.get_mut(local)
    }
    pub fn trick_mut(&mut self, local: Local<Trick>) -> Option<&mut Trick> {
        self.get_mut(local)
    }
    pub fn play_mut(&mut self, local: Local<PlayCardDecision>) -> Option<&mut PlayCardDecision> {
        self.get_mut(local)
    }

    // generic arena access

    pub fn get<P>(&self, local: Local<P>) -> Option<&P>
    where
        Self: Owns<P>,
    {
        <Self as Owns<P>>::arena(self).get(local.index())
    }
    pub fn get_mut<P>(&mut self, local: Local<P>) -> Option<&mut P>
    where
        Self: Owns<P>,
    {
        <Self as Owns<P>>::arena_mut(self).get_mut(local.index())
    }
    /// Generated key of a parent, once it has been inserted.
    pub fn key<P>(&self, local: Local<P>) -> Option<Key<P>>
    where
        P: Parent,
        Self: Owns<P>,
    {
        self.get(local).and_then(Parent::key)
    }
    /// Copies the owner's generated key into the `index`th child's link and
    /// hands the child back, ready to insert.
    pub fn resolve<C>(&mut self, index: usize) -> Result<&mut C, Error>
    where
        C: Child,
        Self: Owns<C> + Owns<C::Owner>,
    {
        let unresolved = || Error::Unresolved {
            table: C::TABLE,
            parent: <C::Owner as Parent>::TABLE,
        };
        let owner = <Self as Owns<C>>::arena(self)
            .get(index)
            .map(|child| child.owner().local())
            .ok_or_else(unresolved)?;
        let key = self.key(owner).ok_or_else(unresolved)?;
        let child = <Self as Owns<C>>::arena_mut(self)
            .get_mut(index)
            .ok_or_else(unresolved)?;
        child.owner_mut().resolve(key);
        Ok(child)
    }

    /// Parent rows in the graph, the game included.
    pub fn parents(&self) -> usize {
        1 + self.deals.len()
            + self.players.len()
            + self.calls.len()
            + self.discards.len()
            + self.tricks.len()
            + self.plays.len()
    }
    /// Leaf rows still held by their parents.
    pub fn leaves(&self) -> usize {
        self.game.players.len()
            + self.deals.iter().map(|d| d.deck.len() + d.voids.len()).sum::<usize>()
            + self.players.iter().map(|p| p.hand.len()).sum::<usize>()
            + self
                .calls
                .iter()
                .map(|c| c.hand.len() + c.valid.len() + c.points.len())
                .sum::<usize>()
            + self
                .discards
                .iter()
                .map(|d| d.hand.len() + d.points.len())
                .sum::<usize>()
            + self.tricks.iter().map(|t| t.cards.len()).sum::<usize>()
            + self
                .plays
                .iter()
                .map(|p| {
                    p.hand.len()
                        + p.played.len()
                        + p.valid.len()
                        + p.voids.len()
                        + p.accounted.len()
                        + p.points.len()
                })
                .sum::<usize>()
    }
}
