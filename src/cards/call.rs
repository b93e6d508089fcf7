use super::suit::Suit;

/// A bid during the trump-calling rounds of a deal.
///
/// The first round offers the upcard's suit (`OrderUp`); the second round
/// lets a seat name any other suit (`Call`).
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum CallTrump {
    Pass,
    OrderUp,
    OrderUpAlone,
    Call(Suit),
    CallAlone(Suit),
}

impl CallTrump {
    /// Persisted label.
    pub const fn label(&self) -> &'static str {
        match self {
            CallTrump::Pass => "pass",
            CallTrump::OrderUp => "order_up",
            CallTrump::OrderUpAlone => "order_up_alone",
            CallTrump::Call(Suit::Club) => "call_clubs",
            CallTrump::Call(Suit::Diamond) => "call_diamonds",
            CallTrump::Call(Suit::Heart) => "call_hearts",
            CallTrump::Call(Suit::Spade) => "call_spades",
            CallTrump::CallAlone(Suit::Club) => "call_clubs_alone",
            CallTrump::CallAlone(Suit::Diamond) => "call_diamonds_alone",
            CallTrump::CallAlone(Suit::Heart) => "call_hearts_alone",
            CallTrump::CallAlone(Suit::Spade) => "call_spades_alone",
        }
    }
    pub fn alone(&self) -> bool {
        matches!(self, CallTrump::OrderUpAlone | CallTrump::CallAlone(_))
    }
    /// Every bid legal in the first round.
    pub fn first_round() -> Vec<Self> {
        vec![CallTrump::Pass, CallTrump::OrderUp, CallTrump::OrderUpAlone]
    }
    /// Every bid legal in the second round, given the turned-down suit.
    /// The dealer may not pass once the table is stuck.
    pub fn second_round(turned: Suit, stuck: bool) -> Vec<Self> {
        let pass = (!stuck).then_some(CallTrump::Pass);
        pass.into_iter()
            .chain(
                Suit::all()
                    .into_iter()
                    .filter(|s| *s != turned)
                    .flat_map(|s| [CallTrump::Call(s), CallTrump::CallAlone(s)]),
            )
            .collect()
    }
}

impl std::fmt::Display for CallTrump {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_round_excludes_turned_suit() {
        let bids = CallTrump::second_round(Suit::Heart, false);
        assert_eq!(bids.len(), 7);
        assert!(!bids.contains(&CallTrump::Call(Suit::Heart)));
        assert!(bids.contains(&CallTrump::Pass));
    }

    #[test]
    fn stuck_dealer_cannot_pass() {
        let bids = CallTrump::second_round(Suit::Club, true);
        assert!(!bids.contains(&CallTrump::Pass));
        assert_eq!(bids.len(), 6);
    }

    #[test]
    fn labels_are_distinct() {
        let mut labels = CallTrump::first_round()
            .into_iter()
            .chain(CallTrump::second_round(Suit::Club, false))
            .chain([CallTrump::Call(Suit::Club)])
            .map(|c| c.label())
            .collect::<Vec<_>>();
        labels.sort();
        labels.dedup();
        assert_eq!(labels.len(), 10);
    }
}
