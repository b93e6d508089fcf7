use super::*;
use crate::Error;
use crate::Local;
use crate::records::*;
use crate::schema::*;

/// Leaves of one type, detached from their parents.
///
/// `parents[i]` is the arena index of the record that owned `leaves[i]`.
/// Both lists grow together and are never reordered.
#[derive(Debug, Clone)]
pub struct Buffer<L>
where
    L: Leaf,
{
    leaves: Vec<L>,
    parents: Vec<Local<L::Parent>>,
}

impl<L> Default for Buffer<L>
where
    L: Leaf,
{
    fn default() -> Self {
        Self {
            leaves: Vec::new(),
            parents: Vec::new(),
        }
    }
}

impl<L> Buffer<L>
where
    L: Leaf,
{
    /// Appends every leaf in `children`, all owned by `parent`.
    pub fn extend(&mut self, parent: Local<L::Parent>, children: Vec<L>) {
        self.parents
            .extend(std::iter::repeat_n(parent, children.len()));
        self.leaves.extend(children);
    }
    pub fn leaves(&self) -> &[L] {
        &self.leaves
    }
    pub fn parents(&self) -> &[Local<L::Parent>] {
        &self.parents
    }
    pub fn len(&self) -> usize {
        self.leaves.len()
    }
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }
    /// Writes each owner's generated key into its leaves' foreign key.
    pub fn backpatch(&mut self, graph: &Graph) -> Result<(), Error>
    where
        Graph: Owns<L::Parent>,
    {
        for (leaf, parent) in self.leaves.iter_mut().zip(self.parents.iter()) {
            let key = graph.key(*parent).ok_or(Error::Unresolved {
                table: L::TABLE,
                parent: <L::Parent as Parent>::TABLE,
            })?;
            leaf.attach(key);
        }
        Ok(())
    }
}

/// Every leaf buffer produced by one [`Graph::flatten`].
#[derive(Debug, Clone, Default)]
pub struct Buffers {
    pub game_players: Buffer<GamePlayer>,
    pub deck_cards: Buffer<DealDeckCard>,
    pub known_voids: Buffer<DealKnownVoid>,
    pub starting_hands: Buffer<StartingHandCard>,
    pub call_hands: Buffer<CallHandCard>,
    pub call_valid: Buffer<CallValidDecision>,
    pub call_points: Buffer<CallPredictedPoints>,
    pub discard_hands: Buffer<DiscardHandCard>,
    pub discard_points: Buffer<DiscardPredictedPoints>,
    pub trick_cards: Buffer<TrickCardPlayed>,
    pub play_hands: Buffer<PlayHandCard>,
    pub play_played: Buffer<PlayPlayedCard>,
    pub play_valid: Buffer<PlayValidCard>,
    pub play_voids: Buffer<PlayKnownVoid>,
    pub play_accounted: Buffer<PlayAccountedCard>,
    pub play_points: Buffer<PlayPredictedPoints>,
}

impl Buffers {
    /// Row count per buffer, in load order.
    #[rustfmt::skip]
    pub fn lens(&self) -> [(&'static str, usize); 16] {
        [
            (GAME_PLAYER,         self.game_players.len()),
            (DEAL_DECK_CARD,      self.deck_cards.len()),
            (DEAL_KNOWN_VOID,     self.known_voids.len()),
            (STARTING_HAND_CARD,  self.starting_hands.len()),
            (CALL_TRUMP_HAND,     self.call_hands.len()),
            (CALL_TRUMP_VALID,    self.call_valid.len()),
            (CALL_TRUMP_POINTS,   self.call_points.len()),
            (DISCARD_HAND,        self.discard_hands.len()),
            (DISCARD_POINTS,      self.discard_points.len()),
            (TRICK_CARD_PLAYED,   self.trick_cards.len()),
            (PLAY_CARD_HAND,      self.play_hands.len()),
            (PLAY_CARD_PLAYED,    self.play_played.len()),
            (PLAY_CARD_VALID,     self.play_valid.len()),
            (PLAY_CARD_VOID,      self.play_voids.len()),
            (PLAY_CARD_ACCOUNTED, self.play_accounted.len()),
            (PLAY_CARD_POINTS,    self.play_points.len()),
        ]
    }
    pub fn len(&self) -> usize {
        self.lens().iter().map(|(_, n)| n).sum()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Backpatches every buffer against the now key-bearing graph.
    pub fn backpatch(&mut self, graph: &Graph) -> Result<(), Error> {
        self.game_players.backpatch(graph)?;
        self.deck_cards.backpatch(graph)?;
        self.known_voids.backpatch(graph)?;
        self.starting_hands.backpatch(graph)?;
        self.call_hands.backpatch(graph)?;
        self.call_valid.backpatch(graph)?;
        self.call_points.backpatch(graph)?;
        self.discard_hands.backpatch(graph)?;
        self.discard_points.backpatch(graph)?;
        self.trick_cards.backpatch(graph)?;
        self.play_hands.backpatch(graph)?;
        self.play_played.backpatch(graph)?;
        self.play_valid.backpatch(graph)?;
        self.play_voids.backpatch(graph)?;
        self.play_accounted.backpatch(graph)?;
        self.play_points.backpatch(graph)?;
        Ok(())
    }
}
