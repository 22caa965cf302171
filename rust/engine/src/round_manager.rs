//! Street-by-street progression of a single round.
//!
//! Every function here takes a snapshot and returns the next one together
//! with the [`Message`]s the transition produced. The input is never
//! modified.

use crate::errors::EngineError;
use crate::evaluator::judge;
use crate::events::Message;
use crate::game::{Betting, GameState, Street};
use crate::hand::HandRanker;
use crate::player::{Action, ActionRecord};
use crate::round_state::{histories, RoundState, SeatView};
use crate::rules::{legal_actions, validate_action, ValidatedAction};

pub type Transition = (GameState, Vec<Message>);

/// Applies the acting seat's declared action and advances the round until
/// the next decision or the end of the round.
///
/// # Errors
///
/// [`EngineError::RoundNotInProgress`] outside a betting street,
/// [`EngineError::NoPlayerToAct`] when nobody is being asked and
/// [`EngineError::IllegalAction`] when the action is not in the valid set.
pub fn apply_action(
    state: &GameState,
    action: Action,
    amount: u32,
    ranker: &dyn HandRanker,
) -> Result<Transition, EngineError> {
    if !state.street.is_betting() {
        return Err(EngineError::RoundNotInProgress);
    }
    let pos = state
        .next_player
        .filter(|&i| state.seats.get(i).is_some_and(|s| s.is_waiting_ask()))
        .ok_or(EngineError::NoPlayerToAct)?;

    let validated = match validate_action(state, pos, action, amount) {
        Ok(v) => v,
        Err(err) => {
            tracing::warn!(
                uuid = %state.seats[pos].uuid,
                %action,
                amount,
                error = %err,
                "rejected declared action"
            );
            return Err(err);
        }
    };

    let mut next = state.clone();
    let record = execute(&mut next, pos, validated)?;
    tracing::trace!(
        round = next.round_count,
        street = ?next.street,
        uuid = %next.seats[pos].uuid,
        record = ?record,
        "action applied"
    );

    let mut messages = vec![Message::GameUpdate {
        uuid: next.seats[pos].uuid.clone(),
        action: record,
        round_state: RoundState::from_state(&next),
    }];

    if street_closed(&next, pos) {
        next.street = next.street.next();
        let (next, more) = start_street(next, ranker)?;
        messages.extend(more);
        return Ok((next, messages));
    }

    let asked = next
        .next_waiting_after(pos)
        .ok_or(EngineError::NoPlayerToAct)?;
    next.next_player = Some(asked);
    messages.push(ask_message(&next, asked));
    Ok((next, messages))
}

fn execute(
    state: &mut GameState,
    pos: usize,
    action: ValidatedAction,
) -> Result<ActionRecord, EngineError> {
    let record = match action {
        ValidatedAction::Fold => {
            state.seats[pos].pay_info.update_to_fold();
            ActionRecord::Fold
        }
        ValidatedAction::Call { amount, paid } => {
            state.seats[pos].pay(paid)?;
            ActionRecord::Call { amount, paid }
        }
        ValidatedAction::Raise {
            amount,
            add_amount,
            paid,
            full,
        } => {
            state.seats[pos].pay(paid)?;
            if full {
                state.betting.full_raises += 1;
                state.betting.last_increment = add_amount;
            }
            ActionRecord::Raise {
                amount,
                add_amount,
                paid,
            }
        }
    };
    state.seats[pos].raise_mark = Some(state.betting.full_raises);
    state.log(pos, record);
    Ok(record)
}

/// True once nobody on the open street still owes a decision.
///
/// The street closes when at most one seat contends, or when every seat
/// that can still act has acted and matches the highest level. A lone seat
/// left to act that already matches the level is not asked either, since
/// nobody could answer a raise.
pub fn street_closed(state: &GameState, last_pos: usize) -> bool {
    if state.count_active() <= 1 {
        return true;
    }
    let street = state.street;
    let max = state.max_wager();
    let settled = state
        .seats
        .iter()
        .all(|s| !s.is_waiting_ask() || (s.has_acted() && s.street_wager(street) == max));
    if settled {
        return true;
    }
    state.count_waiting() == 1
        && state
            .next_waiting_after(last_pos)
            .is_some_and(|i| state.seats[i].street_wager(street) == max)
}

/// Opens preflop betting once blinds and antes are posted. The first seat
/// asked is the one after the big blind.
pub fn open_preflop(
    mut state: GameState,
    big_blind_pos: usize,
    ranker: &dyn HandRanker,
) -> Result<Transition, EngineError> {
    state.street = Street::Preflop;
    state.betting = Betting {
        last_increment: state.rule.big_blind_amount(),
        full_raises: 0,
    };
    let mut messages = vec![Message::StreetStart {
        street: Street::Preflop,
        round_state: RoundState::from_state(&state),
    }];

    if street_closed(&state, big_blind_pos) {
        let (state, more) = finish_betting(state, ranker)?;
        messages.extend(more);
        return Ok((state, messages));
    }

    let asked = state
        .next_waiting_after(big_blind_pos)
        .ok_or(EngineError::NoPlayerToAct)?;
    state.next_player = Some(asked);
    messages.push(ask_message(&state, asked));
    Ok((state, messages))
}

/// Enters `state.street`: deals its cards and asks the first seat, or
/// skips ahead to showdown when no more betting can happen.
pub(crate) fn start_street(
    mut state: GameState,
    ranker: &dyn HandRanker,
) -> Result<Transition, EngineError> {
    match state.street {
        Street::Flop | Street::Turn | Street::River => {}
        Street::Showdown => return showdown(state, ranker),
        Street::Preflop | Street::Finished => return Err(EngineError::RoundNotInProgress),
    }
    if state.count_active() <= 1 || state.count_waiting() <= 1 {
        return finish_betting(state, ranker);
    }

    let street = state.street;
    deal_board(&mut state, street.board_size())?;
    state.betting = Betting::default();
    for seat in &mut state.seats {
        seat.open_street(street);
    }
    let asked = state
        .next_waiting_after(state.dealer_btn)
        .ok_or(EngineError::NoPlayerToAct)?;
    state.next_player = Some(asked);
    tracing::debug!(
        round = state.round_count,
        street = ?street,
        board = ?state.community_card,
        "street started"
    );

    let messages = vec![
        Message::StreetStart {
            street,
            round_state: RoundState::from_state(&state),
        },
        ask_message(&state, asked),
    ];
    Ok((state, messages))
}

/// Ends betting for the round. With two or more seats still contending the
/// rest of the board is dealt first.
fn finish_betting(mut state: GameState, ranker: &dyn HandRanker) -> Result<Transition, EngineError> {
    if state.count_active() > 1 {
        deal_board(&mut state, Street::River.board_size())?;
    }
    state.street = Street::Showdown;
    showdown(state, ranker)
}

fn deal_board(state: &mut GameState, size: usize) -> Result<(), EngineError> {
    let missing = size.saturating_sub(state.community_card.len());
    let cards = state.deck.draw_n(missing)?;
    state.community_card.extend(cards);
    Ok(())
}

fn showdown(mut state: GameState, ranker: &dyn HandRanker) -> Result<Transition, EngineError> {
    let judgement = judge(&state, ranker)?;
    for (seat, &prize) in state.seats.iter_mut().zip(&judgement.prizes) {
        seat.add_chips(prize);
        seat.pay_info.amount = 0;
    }
    state.street = Street::Finished;
    state.next_player = None;

    let winners: Vec<SeatView> = judgement
        .winners
        .iter()
        .map(|&i| SeatView::from(&state.seats[i]))
        .collect();
    tracing::info!(
        round = state.round_count,
        winners = ?winners.iter().map(|w| w.uuid.as_str()).collect::<Vec<_>>(),
        showdown = !judgement.hand_info.is_empty(),
        "round finished"
    );

    // pots are reported as judged; the snapshot itself no longer holds chips
    let message = Message::RoundResult {
        round_count: state.round_count,
        winners,
        hand_info: judgement.hand_info,
        pots: judgement.awards,
        round_state: RoundState::from_state(&state),
    };
    Ok((state, vec![message]))
}

pub fn ask_message(state: &GameState, pos: usize) -> Message {
    Message::Ask {
        hole_card: state.seats[pos].hole_card.clone(),
        valid_actions: legal_actions(state, pos),
        round_state: RoundState::from_state(state),
        action_histories: histories(state),
    }
}
