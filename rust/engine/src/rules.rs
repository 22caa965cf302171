use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::game::GameState;
use crate::player::Action;

/// Match configuration fixed before the first round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRule {
    pub player_num: usize,
    pub max_round: u32,
    pub small_blind_amount: u32,
    pub ante: u32,
}

impl GameRule {
    pub fn new(
        player_num: usize,
        max_round: u32,
        small_blind_amount: u32,
        ante: u32,
    ) -> Result<Self, EngineError> {
        if player_num < 2 {
            return Err(EngineError::InvalidGameRule(format!(
                "player_num must be at least 2, got {player_num}"
            )));
        }
        if max_round == 0 {
            return Err(EngineError::InvalidGameRule(
                "max_round must be positive".into(),
            ));
        }
        if small_blind_amount == 0 {
            return Err(EngineError::InvalidGameRule(
                "small_blind_amount must be positive".into(),
            ));
        }
        Ok(Self {
            player_num,
            max_round,
            small_blind_amount,
            ante,
        })
    }

    pub fn big_blind_amount(&self) -> u32 {
        self.small_blind_amount * 2
    }
}

/// Inclusive bounds of the wager level a raise may reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaiseRange {
    pub min: u32,
    pub max: u32,
}

/// One entry of the valid-action set offered to the acting seat.
/// Amounts are street wager levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum ValidAction {
    Fold { amount: u32 },
    Call { amount: u32 },
    Raise { amount: RaiseRange },
}

impl ValidAction {
    pub fn action(&self) -> Action {
        match self {
            ValidAction::Fold { .. } => Action::Fold,
            ValidAction::Call { .. } => Action::Call,
            ValidAction::Raise { .. } => Action::Raise,
        }
    }
}

/// A declared action after it has been checked against the betting state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidatedAction {
    Fold,
    Call {
        amount: u32,
        paid: u32,
    },
    Raise {
        amount: u32,
        add_amount: u32,
        paid: u32,
        /// Reopens betting for seats that already acted on the street.
        full: bool,
    },
}

struct Limits {
    wager: u32,
    max_wager: u32,
    call_level: u32,
    min_increment: u32,
    raise: Option<RaiseRange>,
}

fn limits(state: &GameState, pos: usize) -> Limits {
    let street = state.street;
    let seat = &state.seats[pos];
    let wager = seat.street_wager(street);
    let own_cap = wager + seat.stack;
    let max_wager = state.max_wager();
    let min_increment = state
        .betting
        .last_increment
        .max(state.rule.big_blind_amount());

    let reopened = seat
        .raise_mark
        .map_or(true, |mark| mark < state.betting.full_raises);
    // smallest stack among opponents that could still answer a raise
    let responder_cap = state
        .seats
        .iter()
        .enumerate()
        .filter(|&(i, s)| i != pos && s.is_waiting_ask())
        .map(|(_, s)| s.street_wager(street) + s.stack)
        .filter(|&cap| cap > max_wager)
        .min();

    let raise = match responder_cap {
        Some(cap) if reopened && own_cap > max_wager => {
            let max = own_cap.min(cap);
            Some(RaiseRange {
                min: (max_wager + min_increment).min(max),
                max,
            })
        }
        _ => None,
    };

    Limits {
        wager,
        max_wager,
        call_level: max_wager.min(own_cap),
        min_increment,
        raise,
    }
}

/// Actions offered to the seat at `pos`.
///
/// FOLD is always offered, even when calling is free. RAISE is left out when
/// the seat cannot put in more than a call, when no opponent could answer,
/// or when only short all-in raises happened since the seat last acted.
pub fn legal_actions(state: &GameState, pos: usize) -> Vec<ValidAction> {
    let l = limits(state, pos);
    let mut actions = vec![
        ValidAction::Fold { amount: 0 },
        ValidAction::Call {
            amount: l.call_level,
        },
    ];
    if let Some(range) = l.raise {
        actions.push(ValidAction::Raise { amount: range });
    }
    actions
}

/// Checks a declared `(action, amount)` for the seat at `pos`.
///
/// Out-of-range amounts are rejected, never adjusted. The amount of a fold
/// is ignored.
///
/// # Errors
///
/// [`EngineError::IllegalAction`] when the call amount differs from the
/// level to match, when raising is not offered, or when the raise level is
/// outside the offered range.
pub fn validate_action(
    state: &GameState,
    pos: usize,
    action: Action,
    amount: u32,
) -> Result<ValidatedAction, EngineError> {
    let l = limits(state, pos);
    match action {
        Action::Fold => Ok(ValidatedAction::Fold),
        Action::Call => {
            if amount != l.call_level {
                return Err(EngineError::illegal(
                    action,
                    amount,
                    format!("call must match level {}", l.call_level),
                ));
            }
            Ok(ValidatedAction::Call {
                amount,
                paid: amount - l.wager,
            })
        }
        Action::Raise => {
            let Some(range) = l.raise else {
                return Err(EngineError::illegal(action, amount, "raise is not available"));
            };
            if amount < range.min || amount > range.max {
                return Err(EngineError::illegal(
                    action,
                    amount,
                    format!("raise must be within {}..={}", range.min, range.max),
                ));
            }
            let add_amount = amount - l.max_wager;
            Ok(ValidatedAction::Raise {
                amount,
                add_amount,
                paid: amount - l.wager,
                full: add_amount >= l.min_increment,
            })
        }
    }
}
