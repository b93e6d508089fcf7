use super::*;
use crate::Local;
use crate::schema::*;

/// Moves every leaf of every parent in `arena` into `buffer`, leaving the
/// parent's collection empty.
fn drain<L>(arena: &mut [L::Parent], buffer: &mut Buffer<L>, field: fn(&mut L::Parent) -> &mut Vec<L>)
where
    L: Leaf,
{
    for (index, parent) in arena.iter_mut().enumerate() {
        buffer.extend(Local::new(index), std::mem::take(field(parent)));
    }
}

impl Graph {
    /// Pulls every leaf out of the graph into per-type buffers.
    ///
    /// Afterwards no parent holds any leaf, so flattening again yields
    /// nothing. Within a buffer, leaves keep the order of their parent's
    /// collection.
    pub fn flatten(&mut self) -> Buffers {
        let mut buffers = Buffers::default();
        drain(Owns::arena_mut(self), &mut buffers.game_players, |g| &mut g.players);
        drain(Owns::arena_mut(self), &mut buffers.deck_cards, |d| &mut d.deck);
        drain(Owns::arena_mut(self), &mut buffers.known_voids, |d| &mut d.voids);
        drain(Owns::arena_mut(self), &mut buffers.starting_hands, |p| &mut p.hand);
        drain(Owns::arena_mut(self), &mut buffers.call_hands, |c| &mut c.hand);
        drain(Owns::arena_mut(self), &mut buffers.call_valid, |c| &mut c.valid);
        drain(Owns::arena_mut(self), &mut buffers.call_points, |c| &mut c.points);
        drain(Owns::arena_mut(self), &mut buffers.discard_hands, |d| &mut d.hand);
        drain(Owns::arena_mut(self), &mut buffers.discard_points, |d| &mut d.points);
        drain(Owns::arena_mut(self), &mut buffers.trick_cards, |t| &mut t.cards);
        drain(Owns::arena_mut(self), &mut buffers.play_hands, |p| &mut p.hand);
        drain(Owns::arena_mut(self), &mut buffers.play_played, |p| &mut p.played);
        drain(Owns::arena_mut(self), &mut buffers.play_valid, |p| &mut p.valid);
        drain(Owns::arena_mut(self), &mut buffers.play_voids, |p| &mut p.voids);
        drain(Owns::arena_mut(self), &mut buffers.play_accounted, |p| &mut p.accounted);
        drain(Owns::arena_mut(self), &mut buffers.play_points, |p| &mut p.points);
        buffers
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Key;
    use crate::cards::*;
    use crate::records::*;

    fn card(s: &str) -> Card {
        Card::try_from(s).unwrap()
    }

    /// One deal, one trick with four cards, one play decision holding a
    /// five card hand.
    fn scenario() -> Graph {
        let mut graph = Graph::new(Game::new(1, [4, 10]));
        let deal = graph.deal(Deal::new(0, 3, card("Jh")).called(Suit::Heart, 0, false));
        let trick = graph.trick(Trick::new(deal, 0, 0).won(2));
        let mut play = PlayCardDecision::new(trick, 0, 0, Suit::Heart, card("9h"));
        for (i, c) in ["9h", "Ah", "Kc", "Ts", "Qd"].iter().enumerate() {
            play.hand.push(PlayHandCard::new(i as i16, card(c)));
        }
        graph.play(play);
        let cards = graph.trick_mut(trick).unwrap();
        for (i, c) in ["9h", "Ah", "Jd", "Th"].iter().enumerate() {
            cards.cards.push(TrickCardPlayed::new(i as i16, i as u8, card(c)));
        }
        graph
    }

    #[test]
    fn moves_leaves_in_order() {
        let mut graph = scenario();
        let before = graph.leaves();
        let buffers = graph.flatten();
        assert_eq!(before, 9);
        assert_eq!(buffers.len(), 9);
        assert_eq!(graph.leaves(), 0);
        let played = buffers
            .trick_cards
            .leaves()
            .iter()
            .map(|c| c.card().to_string())
            .collect::<Vec<_>>();
        assert_eq!(played, vec!["9h", "Ah", "Jd", "Th"]);
        let hand = buffers
            .play_hands
            .leaves()
            .iter()
            .map(|c| c.card().to_string())
            .collect::<Vec<_>>();
        assert_eq!(hand, vec!["9h", "Ah", "Kc", "Ts", "Qd"]);
        assert!(buffers.trick_cards.parents().iter().all(|p| p.index() == 0));
    }

    #[test]
    fn flattening_twice_yields_nothing() {
        let mut graph = scenario();
        let _ = graph.flatten();
        let again = graph.flatten();
        assert!(again.is_empty());
        assert!(again.lens().iter().all(|(_, n)| *n == 0));
    }

    #[test]
    fn empty_collections_are_tolerated() {
        let mut graph = Graph::new(Game::new(0, [10, 0]));
        let deal = graph.deal(Deal::new(0, 0, card("As")));
        graph.trick(Trick::new(deal, 0, 1));
        graph.player(DealPlayer::new(deal, 2));
        assert!(graph.flatten().is_empty());
    }

    #[test]
    fn parent_indices_track_owners() {
        let mut graph = Graph::new(Game::default());
        let deal = graph.deal(Deal::new(0, 0, card("Ks")));
        let first = graph.player(DealPlayer::new(deal, 0));
        let second = graph.player(DealPlayer::new(deal, 1));
        graph.player_mut(second).unwrap().hand.push(StartingHandCard::new(0, card("9c")));
        graph.player_mut(first).unwrap().hand.push(StartingHandCard::new(0, card("Tc")));
        graph.player_mut(second).unwrap().hand.push(StartingHandCard::new(1, card("Jc")));
        let buffers = graph.flatten();
        let owners = buffers
            .starting_hands
            .parents()
            .iter()
            .map(|p| p.index())
            .collect::<Vec<_>>();
        assert_eq!(owners, vec![0, 1, 1]);
    }

    #[test]
    fn backpatch_writes_owner_keys() {
        let mut graph = scenario();
        let mut buffers = graph.flatten();
        assert!(matches!(
            buffers.backpatch(&graph),
            Err(crate::Error::Unresolved { .. })
        ));
        graph.game_mut().assign(Key::from(1));
        graph.deal_mut(Local::new(0)).unwrap().assign(Key::from(2));
        graph.trick_mut(Local::new(0)).unwrap().assign(Key::from(3));
        graph.play_mut(Local::new(0)).unwrap().assign(Key::from(4));
        buffers.backpatch(&graph).unwrap();
        fn foreign(buffer: &Buffer<TrickCardPlayed>) -> Vec<Value<'_>> {
            buffer
                .leaves()
                .iter()
                .map(|leaf| (TrickCardPlayed::COLUMNS[0].get)(leaf))
                .collect()
        }
        assert!(foreign(&buffers.trick_cards).iter().all(|v| *v == Value::Int8(3)));
        let hand = buffers
            .play_hands
            .leaves()
            .iter()
            .map(|leaf| (PlayHandCard::COLUMNS[0].get)(leaf))
            .collect::<Vec<_>>();
        assert!(hand.iter().all(|v| *v == Value::Int8(4)));
    }
}
