//! Seeded generation of complete, rule-abiding Euchre games.
//!
//! Players bid and play with a crude heuristic plus noise. The games are
//! not good Euchre, but every graph has the shape and key structure of a
//! real simulation: 24 deck cards per deal, a bidding round per seat, a
//! discard when the upcard is ordered, and five tricks of decision records.
use crate::Arbitrary;
use crate::Estimate;
use crate::Graph;
use crate::HAND;
use crate::Local;
use crate::N;
use crate::Points;
use crate::Position;
use crate::TRICKS;
use crate::cards::*;
use crate::records::*;
use rand::Rng;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// Points needed to win a game.
const TARGET: Points = 10;
/// Deals after which a game is cut off regardless of score.
const LIMIT: i16 = 64;
#[rustfmt::skip]
const ACTORS: [&str; N] = ["heuristic", "random", "heuristic", "random"];

/// Ranking of a card within a trick. Higher wins; zero never wins.
fn power(card: Card, trump: Suit, lead: Suit) -> u8 {
    let rank = u8::from(card.rank());
    match (card.rank(), card.effective(trump)) {
        (Rank::Jack, s) if s == trump && card.suit() == trump => 20,
        (Rank::Jack, s) if s == trump => 19,
        (_, s) if s == trump => 10 + rank,
        (_, s) if s == lead => 1 + rank,
        _ => 0,
    }
}

/// Cards in `hand` that may legally be played to a trick led with `lead`.
fn legal(hand: &[Card], trump: Suit, lead: Option<Suit>) -> Vec<Card> {
    let follow = hand
        .iter()
        .copied()
        .filter(|c| Some(c.effective(trump)) == lead)
        .collect::<Vec<_>>();
    match follow.is_empty() {
        true => hand.to_vec(),
        false => follow,
    }
}

/// Produces whole games from a seed.
pub struct Simulator {
    rng: SmallRng,
}

impl Simulator {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// One game, played until a team reaches ten points.
    pub fn game(&mut self) -> Graph {
        let mut graph = Graph::default();
        let mut scores = [0 as Points; 2];
        let mut dealer = self.rng.random_range(0..N) as Position;
        let mut number = 0;
        while scores.iter().all(|s| *s < TARGET) && number < LIMIT {
            let points = self.deal(&mut graph, number, dealer);
            scores[0] += points[0];
            scores[1] += points[1];
            dealer = (dealer + 1) % N as Position;
            number += 1;
        }
        let winner = if scores[0] >= scores[1] { 0 } else { 1 };
        let mut game = Game::new(winner, scores);
        game.players = ACTORS
            .iter()
            .enumerate()
            .map(|(seat, actor)| GamePlayer::new(seat as Position, *actor))
            .collect();
        *graph.game_mut() = game;
        graph
    }

    fn noise(&mut self) -> Estimate {
        self.rng.random_range(-0.5..0.5)
    }

    /// Plays one deal into `graph` and returns the points each team took.
    fn deal(&mut self, graph: &mut Graph, number: i16, dealer: Position) -> [Points; 2] {
        let mut deck = Card::deck();
        deck.shuffle(&mut self.rng);
        let upcard = deck[N * HAND];
        let mut hands: [Vec<Card>; N] = std::array::from_fn(|seat| {
            let mut hand = deck[seat * HAND..(seat + 1) * HAND].to_vec();
            hand.sort();
            hand
        });

        let (calls, trump, maker, alone, ordered) = self.bid(&hands, dealer, upcard);
        let mut deal = Deal::new(number, dealer, upcard);
        if let (Some(trump), Some(maker)) = (trump, maker) {
            deal = deal.called(trump, maker, alone);
        }
        deal.deck = deck
            .iter()
            .enumerate()
            .map(|(i, card)| DealDeckCard::new(i as i16, *card))
            .collect();
        let local = graph.deal(deal);

        for seat in 0..N {
            let mut player = DealPlayer::new(local, seat as Position);
            player.hand = hands[seat]
                .iter()
                .enumerate()
                .map(|(i, card)| StartingHandCard::new(i as i16, *card))
                .collect();
            graph.player(player);
        }
        for (ordinal, (seat, hand, valid, chosen)) in calls.into_iter().enumerate() {
            let mut call = CallTrumpDecision::new(local, seat, dealer, upcard, chosen, ordinal as i16);
            call.hand = hand
                .iter()
                .enumerate()
                .map(|(i, card)| CallHandCard::new(i as i16, *card))
                .collect();
            call.points = valid
                .iter()
                .map(|bid| CallPredictedPoints::new(*bid, self.value(*bid, &hand, upcard)))
                .collect();
            call.valid = valid.into_iter().map(CallValidDecision::new).collect();
            graph.call(call);
        }

        let (Some(trump), Some(maker)) = (trump, maker) else {
            return [0, 0];
        };
        if ordered {
            self.discard(graph, local, &mut hands[dealer as usize], dealer, upcard, trump);
        }
        let out = alone.then_some((maker + 2) % N as Position);
        let won = self.tricks(graph, local, &mut hands, dealer, trump, out);
        let team = (maker % 2) as usize;
        let mut points = [0 as Points; 2];
        match won[team] {
            5 if alone => points[team] = 4,
            5 => points[team] = 2,
            3 | 4 => points[team] = 1,
            _ => points[1 - team] = 2,
        }
        if let Some(deal) = graph.deal_mut(local) {
            deal.score(points);
        }
        points
    }

    /// Both bidding rounds. Returns each decision as (seat, hand, valid
    /// bids, chosen bid), then trump, maker, alone, and whether the upcard
    /// was ordered up.
    #[allow(clippy::type_complexity)]
    fn bid(
        &mut self,
        hands: &[Vec<Card>; N],
        dealer: Position,
        upcard: Card,
    ) -> (
        Vec<(Position, Vec<Card>, Vec<CallTrump>, CallTrump)>,
        Option<Suit>,
        Option<Position>,
        bool,
        bool,
    ) {
        let mut calls = Vec::new();
        let order = (1..=N).map(|i| ((dealer as usize + i) % N) as Position);
        for seat in order.clone() {
            let hand = &hands[seat as usize];
            let valid = CallTrump::first_round();
            let strength = self.strength(hand, upcard.suit()) + u8::from(seat == dealer);
            let chosen = match strength {
                5.. => CallTrump::OrderUpAlone,
                3 | 4 if self.rng.random_bool(0.8) => CallTrump::OrderUp,
                _ => CallTrump::Pass,
            };
            calls.push((seat, hand.clone(), valid, chosen));
            if chosen != CallTrump::Pass {
                return (calls, Some(upcard.suit()), Some(seat), chosen.alone(), true);
            }
        }
        for seat in order {
            let hand = &hands[seat as usize];
            let stuck = seat == dealer;
            let valid = CallTrump::second_round(upcard.suit(), stuck);
            let (best, strength) = Suit::all()
                .into_iter()
                .filter(|s| *s != upcard.suit())
                .map(|s| (s, self.strength(hand, s)))
                .max_by_key(|(_, n)| *n)
                .unwrap_or((upcard.suit().sibling(), 0));
            let chosen = match strength {
                5.. => CallTrump::CallAlone(best),
                3 | 4 => CallTrump::Call(best),
                _ if stuck => CallTrump::Call(best),
                _ => CallTrump::Pass,
            };
            calls.push((seat, hand.clone(), valid, chosen));
            if chosen != CallTrump::Pass {
                return (calls, Some(best), Some(seat), chosen.alone(), false);
            }
        }
        (calls, None, None, false, false)
    }

    /// Trump cards held, counting the left bower.
    fn strength(&self, hand: &[Card], trump: Suit) -> u8 {
        hand.iter().filter(|c| c.effective(trump) == trump).count() as u8
    }

    fn value(&mut self, bid: CallTrump, hand: &[Card], upcard: Card) -> Estimate {
        let trump = match bid {
            CallTrump::Pass => return self.noise(),
            CallTrump::OrderUp | CallTrump::OrderUpAlone => upcard.suit(),
            CallTrump::Call(s) | CallTrump::CallAlone(s) => s,
        };
        let held = self.strength(hand, trump) as Estimate;
        let scale = if bid.alone() { 1.0 } else { 0.5 };
        (held - 2.5) * scale + self.noise()
    }

    /// Dealer picks up the upcard and throws away the weakest card.
    fn discard(
        &mut self,
        graph: &mut Graph,
        deal: Local<Deal>,
        hand: &mut Vec<Card>,
        dealer: Position,
        upcard: Card,
        trump: Suit,
    ) {
        hand.push(upcard);
        hand.sort();
        let weakest = hand
            .iter()
            .copied()
            .min_by_key(|c| power(*c, trump, c.suit()))
            .unwrap_or(upcard);
        let mut decision = DiscardCardDecision::new(deal, dealer, upcard, trump, weakest);
        decision.hand = hand
            .iter()
            .enumerate()
            .map(|(i, card)| DiscardHandCard::new(i as i16, *card))
            .collect();
        decision.points = hand
            .iter()
            .map(|card| {
                let kept = power(*card, trump, card.suit()) as Estimate / 20.0;
                DiscardPredictedPoints::new(*card, 1.0 - kept + self.noise())
            })
            .collect();
        graph.discard(decision);
        hand.retain(|c| *c != weakest);
    }

    /// Plays out all five tricks. Returns tricks won per team.
    fn tricks(
        &mut self,
        graph: &mut Graph,
        deal: Local<Deal>,
        hands: &mut [Vec<Card>; N],
        dealer: Position,
        trump: Suit,
        out: Option<Position>,
    ) -> [u8; 2] {
        let mut won = [0u8; 2];
        let mut seen = Vec::<Card>::new();
        let mut voids = Vec::<(Position, Suit)>::new();
        let mut leader = (dealer + 1) % N as Position;
        if Some(leader) == out {
            leader = (leader + 1) % N as Position;
        }
        for number in 0..TRICKS {
            let trick = graph.trick(Trick::new(deal, number as i16, leader));
            let seats = (0..N as Position)
                .map(|i| (leader + i) % N as Position)
                .filter(|s| Some(*s) != out)
                .collect::<Vec<_>>();
            let mut played = Vec::<(Position, Card)>::new();
            let mut lead = None;
            for seat in seats {
                let hand = &mut hands[seat as usize];
                let valid = legal(hand, trump, lead);
                let chosen = valid[self.rng.random_range(0..valid.len())];
                let mut decision = PlayCardDecision::new(trick, seat, leader, trump, chosen);
                if let Some(lead) = lead {
                    decision = decision.following(lead);
                }
                decision.hand = hand
                    .iter()
                    .enumerate()
                    .map(|(i, card)| PlayHandCard::new(i as i16, *card))
                    .collect();
                decision.played = played
                    .iter()
                    .map(|(seat, card)| PlayPlayedCard::new(*seat, *card))
                    .collect();
                decision.voids = voids
                    .iter()
                    .map(|(seat, suit)| PlayKnownVoid::new(*seat, *suit))
                    .collect();
                decision.accounted = seen.iter().copied().map(PlayAccountedCard::new).collect();
                decision.points = valid
                    .iter()
                    .map(|card| {
                        let estimate = power(*card, trump, lead.unwrap_or(card.suit())) as Estimate / 10.0;
                        PlayPredictedPoints::new(*card, estimate + self.noise())
                    })
                    .collect();
                decision.valid = valid.into_iter().map(PlayValidCard::new).collect();
                graph.play(decision);

                let suit = chosen.effective(trump);
                match lead {
                    None => lead = Some(suit),
                    Some(led) if led != suit && !voids.contains(&(seat, led)) => voids.push((seat, led)),
                    Some(_) => {}
                }
                hand.retain(|c| *c != chosen);
                played.push((seat, chosen));
                seen.push(chosen);
            }
            let led = lead.unwrap_or(trump);
            let (winner, _) = played
                .iter()
                .copied()
                .max_by_key(|(_, card)| power(*card, trump, led))
                .unwrap_or((leader, Card::new(Rank::Nine, trump)));
            if let Some(trick) = graph.trick_mut(trick) {
                trick.cards = played
                    .iter()
                    .enumerate()
                    .map(|(i, (seat, card))| TrickCardPlayed::new(i as i16, *seat, *card))
                    .collect();
                trick.win(winner);
            }
            won[(winner % 2) as usize] += 1;
            leader = winner;
        }
        if let Some(deal) = graph.deal_mut(deal) {
            deal.voids = voids
                .iter()
                .map(|(seat, suit)| DealKnownVoid::new(*seat, *suit))
                .collect();
        }
        won
    }
}

impl Arbitrary for Graph {
    fn random() -> Self {
        Simulator::new(rand::random()).game()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_game() {
        let a = Simulator::new(7).game();
        let b = Simulator::new(7).game();
        assert_eq!(a.parents(), b.parents());
        assert_eq!(a.leaves(), b.leaves());
        assert_eq!(a.game().scores(), b.game().scores());
    }

    #[test]
    fn games_are_fully_shaped() {
        let graph = Simulator::new(42).game();
        let deals = graph.deals().len();
        assert!(deals > 0);
        assert!(graph.game().scores().iter().any(|s| *s >= TARGET) || deals == LIMIT as usize);
        assert_eq!(graph.game().players.len(), N);
        assert_eq!(graph.players().len(), deals * N);
        assert!(graph.deals().iter().all(|d| d.deck.len() == 24));
        assert!(graph.players().iter().all(|p| p.hand.len() == HAND));
        assert!(graph.calls().len() >= deals);
        for trick in graph.tricks() {
            assert!(trick.winner().is_some());
            assert!(matches!(trick.cards.len(), 3 | 4));
        }
    }

    #[test]
    fn plays_follow_suit() {
        let graph = Simulator::new(3).game();
        for play in graph.plays() {
            assert!(play.valid.iter().any(|v| v.card() == play.chosen()));
            assert_eq!(play.hand.len(), play.hand.iter().filter(|h| h.card() != play.chosen()).count() + 1);
        }
    }

    #[test]
    fn left_bower_outranks_trump_ace() {
        let left = Card::new(Rank::Jack, Suit::Diamond);
        let ace = Card::new(Rank::Ace, Suit::Heart);
        let right = Card::new(Rank::Jack, Suit::Heart);
        assert!(power(left, Suit::Heart, Suit::Club) > power(ace, Suit::Heart, Suit::Club));
        assert!(power(right, Suit::Heart, Suit::Club) > power(left, Suit::Heart, Suit::Club));
        assert_eq!(power(ace, Suit::Spade, Suit::Club), 0);
    }
}
