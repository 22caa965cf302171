//! Rebuilding a [`GameState`] from a [`RoundState`].
//!
//! A round state is what players see, so it lacks hole cards, the deck and
//! the betting bookkeeping. The missing pieces are reconstructed here: the
//! deck becomes every card not on the board, shuffled with the given seed,
//! and the betting position of the open street is replayed from its
//! history. Hole cards must be attached separately before a showdown can
//! be judged.

use crate::cards::Card;
use crate::deck::{Deck, DEFAULT_SEED};
use crate::errors::EngineError;
use crate::game::{Betting, GameState, HistoryEntry, Street};
use crate::player::{ActionRecord, Seat};
use crate::round_state::RoundState;
use crate::rules::GameRule;

pub fn restore_game_state(
    round_state: &RoundState,
    rule: &GameRule,
    seed: Option<u64>,
) -> Result<GameState, EngineError> {
    if round_state.seats.is_empty() {
        return Err(EngineError::InvalidSnapshot("no seats".into()));
    }
    if round_state.dealer_btn >= round_state.seats.len() {
        return Err(EngineError::InvalidSnapshot(format!(
            "dealer_btn {} out of range",
            round_state.dealer_btn
        )));
    }
    if round_state
        .next_player
        .is_some_and(|i| i >= round_state.seats.len())
    {
        return Err(EngineError::InvalidSnapshot("next_player out of range".into()));
    }
    if round_state.community_card.len() > Street::River.board_size() {
        return Err(EngineError::InvalidSnapshot("too many community cards".into()));
    }

    let seats = round_state
        .seats
        .iter()
        .map(|view| {
            let mut seat = Seat::new(view.uuid.clone(), view.name.clone(), view.stack);
            seat.pay_info.status = view.state;
            seat
        })
        .collect();

    let mut deck = Deck::new_with_seed(seed.unwrap_or(DEFAULT_SEED));
    deck.shuffle();
    deck.remove(&round_state.community_card);

    let mut state = GameState::new(seats, deck, rule.clone());
    state.round_count = round_state.round_count;
    state.street = round_state.street;
    state.dealer_btn = round_state.dealer_btn;
    state.next_player = round_state.next_player;
    state.community_card = round_state.community_card.clone();

    for street in Street::BETTING {
        let reached = round_state.action_histories.contains_key(&street)
            || (state.street.is_betting() && street <= state.street);
        if reached {
            for seat in &mut state.seats {
                seat.open_street(street);
            }
        }
    }

    for (&street, entries) in &round_state.action_histories {
        if !street.is_betting() {
            return Err(EngineError::InvalidSnapshot(format!(
                "history recorded for {street:?}"
            )));
        }
        for entry in entries {
            let pos = state.seat_index(&entry.uuid).ok_or_else(|| {
                EngineError::InvalidSnapshot(format!("unknown seat {}", entry.uuid))
            })?;
            let seat = &mut state.seats[pos];
            seat.record(street, entry.record);
            seat.pay_info.amount += entry.record.chips();
            state.history.push(HistoryEntry {
                street,
                uuid: entry.uuid.clone(),
                record: entry.record,
            });
        }
    }

    if state.street.is_betting() {
        replay_betting(&mut state, round_state);
    }
    Ok(state)
}

/// Recomputes the raise bookkeeping of the open street from its records.
fn replay_betting(state: &mut GameState, round_state: &RoundState) {
    let big_blind = state.rule.big_blind_amount();
    let mut betting = Betting {
        last_increment: if state.street == Street::Preflop {
            big_blind
        } else {
            0
        },
        full_raises: 0,
    };
    let entries = round_state
        .action_histories
        .get(&state.street)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    for entry in entries {
        if let ActionRecord::Raise { add_amount, .. } = entry.record {
            if add_amount >= betting.last_increment.max(big_blind) {
                betting.full_raises += 1;
                betting.last_increment = add_amount;
            }
        }
        if entry.record.is_decision() {
            if let Some(pos) = state.seat_index(&entry.uuid) {
                state.seats[pos].raise_mark = Some(betting.full_raises);
            }
        }
    }
    state.betting = betting;
}

/// Gives `uuid` the listed hole cards and takes them out of the deck.
pub fn attach_hole_card(
    state: &GameState,
    uuid: &str,
    cards: &[Card],
) -> Result<GameState, EngineError> {
    if cards.len() != 2 {
        return Err(EngineError::InvalidSnapshot(format!(
            "expected 2 hole cards, got {}",
            cards.len()
        )));
    }
    let pos = state
        .seat_index(uuid)
        .ok_or_else(|| EngineError::UnknownPlayer(uuid.to_string()))?;
    let mut next = state.clone();
    next.deck.remove(cards);
    next.seats[pos].hole_card = cards.to_vec();
    Ok(next)
}

/// Deals two cards from the deck to `uuid`.
pub fn attach_hole_card_from_deck(state: &GameState, uuid: &str) -> Result<GameState, EngineError> {
    let pos = state
        .seat_index(uuid)
        .ok_or_else(|| EngineError::UnknownPlayer(uuid.to_string()))?;
    let mut next = state.clone();
    next.seats[pos].hole_card = next.deck.draw_n(2)?;
    Ok(next)
}
