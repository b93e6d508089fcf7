/// Table for finished games.
#[rustfmt::skip]
pub const GAME:                     &str = "game";
/// Table for the four seats of a game and who sat in them.
#[rustfmt::skip]
pub const GAME_PLAYER:              &str = "game_player";
/// Table for deals within a game.
#[rustfmt::skip]
pub const DEAL:                     &str = "deal";
/// Table for the shuffled deck of a deal, in deal order.
#[rustfmt::skip]
pub const DEAL_DECK_CARD:           &str = "deal_deck_card";
/// Table for suits a seat was publicly void in by the end of a deal.
#[rustfmt::skip]
pub const DEAL_KNOWN_VOID:          &str = "deal_known_player_suit_void";
/// Table for each seat's participation in a deal.
#[rustfmt::skip]
pub const DEAL_PLAYER:              &str = "deal_player";
/// Table for the five cards a seat was dealt.
#[rustfmt::skip]
pub const STARTING_HAND_CARD:       &str = "starting_hand_card";
/// Table for tricks within a deal.
#[rustfmt::skip]
pub const TRICK:                    &str = "trick";
/// Table for cards played to a trick, in play order.
#[rustfmt::skip]
pub const TRICK_CARD_PLAYED:        &str = "trick_card_played";
/// Table for bids made while calling trump.
#[rustfmt::skip]
pub const CALL_TRUMP:               &str = "call_trump_decision";
/// Table for the bidder's hand at a trump decision.
#[rustfmt::skip]
pub const CALL_TRUMP_HAND:          &str = "call_trump_decision_cards_in_hand";
/// Table for the bids available at a trump decision.
#[rustfmt::skip]
pub const CALL_TRUMP_VALID:         &str = "call_trump_decision_valid_decision";
/// Table for predicted points per bid at a trump decision.
#[rustfmt::skip]
pub const CALL_TRUMP_POINTS:        &str = "call_trump_decision_predicted_points";
/// Table for the dealer's discard after picking up the upcard.
#[rustfmt::skip]
pub const DISCARD:                  &str = "discard_card_decision";
/// Table for the dealer's six cards at a discard decision.
#[rustfmt::skip]
pub const DISCARD_HAND:             &str = "discard_card_decision_cards_in_hand";
/// Table for predicted points per discard option.
#[rustfmt::skip]
pub const DISCARD_POINTS:           &str = "discard_card_decision_predicted_points";
/// Table for card plays within a trick.
#[rustfmt::skip]
pub const PLAY_CARD:                &str = "play_card_decision";
/// Table for the player's hand at a play decision.
#[rustfmt::skip]
pub const PLAY_CARD_HAND:           &str = "play_card_decision_cards_in_hand";
/// Table for cards already played, by seat, at a play decision.
#[rustfmt::skip]
pub const PLAY_CARD_PLAYED:         &str = "play_card_decision_played_card";
/// Table for the legal plays at a play decision.
#[rustfmt::skip]
pub const PLAY_CARD_VALID:          &str = "play_card_decision_valid_card";
/// Table for known suit voids at a play decision.
#[rustfmt::skip]
pub const PLAY_CARD_VOID:           &str = "play_card_decision_known_void";
/// Table for cards known to be out of play at a play decision.
#[rustfmt::skip]
pub const PLAY_CARD_ACCOUNTED:      &str = "play_card_decision_card_accounted_for";
/// Table for predicted points per legal play.
#[rustfmt::skip]
pub const PLAY_CARD_POINTS:         &str = "play_card_decision_predicted_points";
