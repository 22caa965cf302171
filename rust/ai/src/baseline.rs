//! Rule-based baseline agent.
//!
//! Plays on a 0-10 hand strength scale with pot odds for marginal calls.
//! Fully deterministic, so matches against it replay exactly.

use pokeremu_engine::cards::Card;
use pokeremu_engine::emulator::Agent;
use pokeremu_engine::game::Street;
use pokeremu_engine::hand::{evaluate_hand, Category};
use pokeremu_engine::player::Action;
use pokeremu_engine::round_state::RoundState;
use pokeremu_engine::rules::{RaiseRange, ValidAction};

use crate::{call_amount, raise_range};

/// Rule-based agent.
///
/// Before the flop it rates the two hole cards alone; afterwards it rates
/// the made hand on the board. Strong ratings raise toward half or two
/// thirds of the pot, middling ones call when the price is small against
/// the pot, and weak ones check when free and fold otherwise.
///
/// # Example
///
/// ```rust
/// use pokeremu_ai::baseline::BaselineAgent;
/// use pokeremu_engine::emulator::{Emulator, PlayerInfo};
/// use pokeremu_ai::CallMan;
///
/// let mut emulator = Emulator::new().with_seed(42);
/// emulator.set_game_rule(2, 2, 5, 0).unwrap();
/// emulator.register_player("base", BaselineAgent::new());
/// emulator.register_player("caller", CallMan);
///
/// let state = emulator
///     .generate_initial_game_state(&[
///         PlayerInfo::new("base", "base", 100),
///         PlayerInfo::new("caller", "caller", 100),
///     ])
///     .unwrap();
/// let (_, events) = emulator.run_until_game_finish(&state).unwrap();
/// assert!(events.last().is_some_and(|e| e.is_game_finish()));
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct BaselineAgent;

impl BaselineAgent {
    pub fn new() -> Self {
        Self
    }

    /// Hole-card rating from 0 (junk) to 10 (AA, KK, AKs).
    fn evaluate_preflop_strength(hole_cards: [Card; 2]) -> u8 {
        let c1 = hole_cards[0];
        let c2 = hole_cards[1];

        let r1 = c1.rank as u8;
        let r2 = c2.rank as u8;
        let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
        let suited = c1.suit == c2.suit;
        let pick = |s: u8, o: u8| if suited { s } else { o };

        if r1 == r2 {
            return match high {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }

        match (high, low) {
            (14, 13) => pick(10, 8),
            (14, 12) => pick(8, 7),
            (14, 11) => pick(7, 6),
            (14, 10) => pick(6, 5),
            (14, _) => pick(5, 4),
            (13, 12) => pick(7, 6),
            (13, 11) => pick(6, 5),
            (13, 10) => pick(5, 4),
            (12, 11) => pick(6, 5),
            (12, 10) => pick(5, 4),
            _ => {
                if suited && high - low <= 2 {
                    if high >= 9 { 5 } else { 4 }
                } else if high >= 11 && low >= 9 {
                    4 // broadway
                } else {
                    2
                }
            }
        }
    }

    /// Made-hand strength on the same scale, `None` before the flop.
    fn evaluate_postflop_strength(hole_cards: [Card; 2], board: &[Card]) -> Option<u8> {
        if board.len() < 3 {
            return None;
        }

        let mut cards = hole_cards.to_vec();
        cards.extend_from_slice(board);
        let strength = evaluate_hand(&cards);

        let base_strength = match strength.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush => 10,
        };
        let kicker_boost = u8::from(strength.kickers[0] >= 12);

        Some((base_strength + kicker_boost).min(10))
    }

    /// pot / (pot + call); 1.0 when the call is free.
    fn calculate_pot_odds(pot_size: u32, to_call: u32) -> f32 {
        if to_call == 0 {
            return 1.0;
        }
        pot_size as f32 / (pot_size + to_call) as f32
    }

    /// Raise to `call_level + pot * num / den`, clamped into the offered range.
    fn raise_to(range: RaiseRange, call_level: u32, pot: u32, num: u32, den: u32) -> (Action, u32) {
        let target = call_level + pot * num / den;
        (Action::Raise, target.clamp(range.min, range.max))
    }

    fn decide_action(
        hand_strength: u8,
        to_call: u32,
        call_level: u32,
        raise: Option<RaiseRange>,
        pot: u32,
    ) -> (Action, u32) {
        let call = (Action::Call, call_level);
        let fold = (Action::Fold, 0);

        if to_call == 0 {
            return match (hand_strength, raise) {
                (9..=10, Some(range)) => Self::raise_to(range, call_level, pot, 2, 3),
                (7..=8, Some(range)) => Self::raise_to(range, call_level, pot, 1, 2),
                _ => call,
            };
        }

        let pot_odds = Self::calculate_pot_odds(pot, to_call);
        match hand_strength {
            9..=10 => match raise {
                Some(range) => Self::raise_to(range, call_level, pot, 1, 2),
                None => call,
            },
            7..=8 => call,
            5..=6 if pot_odds >= 0.3 || to_call <= pot / 4 => call,
            3..=4 if pot_odds >= 0.4 || to_call <= pot / 6 => call,
            _ => fold,
        }
    }
}

impl Agent for BaselineAgent {
    fn declare_action(
        &mut self,
        valid_actions: &[ValidAction],
        hole_card: &[Card],
        round_state: &RoundState,
    ) -> (Action, u32) {
        let call_level = call_amount(valid_actions);
        let wagered = round_state
            .acting_seat()
            .map(|seat| round_state.street_wager(&seat.uuid))
            .unwrap_or(0);
        let to_call = call_level.saturating_sub(wagered);

        let hole_cards = match hole_card {
            [c1, c2] => [*c1, *c2],
            _ => {
                return if to_call == 0 {
                    (Action::Call, call_level)
                } else {
                    (Action::Fold, 0)
                };
            }
        };

        let hand_strength = if round_state.street == Street::Preflop {
            Self::evaluate_preflop_strength(hole_cards)
        } else {
            Self::evaluate_postflop_strength(hole_cards, &round_state.community_card)
                .unwrap_or_else(|| Self::evaluate_preflop_strength(hole_cards))
        };

        Self::decide_action(
            hand_strength,
            to_call,
            call_level,
            raise_range(valid_actions),
            round_state.pot_total(),
        )
    }
}
