//! Showdown judgement: who wins each pot tier and how many chips each seat
//! takes home.

use serde::{Deserialize, Serialize};

use crate::errors::EngineError;
use crate::game::GameState;
use crate::hand::{HandRanker, HandStrength};
use crate::pot::create_pot;

/// Hand shown by a seat that reached showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandInfo {
    pub uuid: String,
    pub strength: HandStrength,
}

/// How one pot tier was split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotAward {
    pub amount: u32,
    pub eligibles: Vec<String>,
    pub winners: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Judgement {
    /// Chips won, indexed by seat.
    pub prizes: Vec<u32>,
    pub awards: Vec<PotAward>,
    /// Empty when the round ended without a showdown.
    pub hand_info: Vec<HandInfo>,
    /// Seats that won chips from a tier they contested, or the last seat
    /// standing, in seat order. Taking back an uncalled bet does not count.
    pub winners: Vec<usize>,
}

/// Decides every pot tier of a round whose betting is over.
///
/// With a single seat left contending, that seat takes every tier and no
/// hand is evaluated. Otherwise each tier goes to the best hand among its
/// eligible seats. A tier that does not divide evenly among tied winners
/// hands its odd chips out one at a time, starting with the first winner
/// clockwise from the button.
///
/// # Errors
///
/// [`EngineError::MissingHoleCards`] when a contending seat has no hole
/// cards to show.
pub fn judge(state: &GameState, ranker: &dyn HandRanker) -> Result<Judgement, EngineError> {
    let n = state.seats.len();
    let pots = create_pot(&state.seats);
    let walkover = state.count_active() <= 1;

    let mut strengths: Vec<Option<HandStrength>> = vec![None; n];
    let mut hand_info = Vec::new();
    if !walkover {
        for (i, seat) in state.seats.iter().enumerate() {
            if !seat.is_active() {
                continue;
            }
            if seat.hole_card.len() != 2 {
                return Err(EngineError::MissingHoleCards(seat.uuid.clone()));
            }
            let mut cards = seat.hole_card.clone();
            cards.extend_from_slice(&state.community_card);
            let strength = ranker.evaluate(&cards);
            hand_info.push(HandInfo {
                uuid: seat.uuid.clone(),
                strength: strength.clone(),
            });
            strengths[i] = Some(strength);
        }
    }

    let order: Vec<usize> = state.order_from_button().collect();
    let mut prizes = vec![0u32; n];
    let mut won = vec![false; n];
    let mut awards = Vec::with_capacity(pots.len());
    for pot in pots {
        let best = pot.eligibles.iter().filter_map(|&i| strengths[i].as_ref()).max();
        let winners: Vec<usize> = order
            .iter()
            .copied()
            .filter(|i| pot.eligibles.contains(i))
            .filter(|&i| walkover || strengths[i].as_ref() == best)
            .collect();

        if let Some(count) = u32::try_from(winners.len()).ok().filter(|&c| c > 0) {
            let share = pot.amount / count;
            let odd = (pot.amount % count) as usize;
            for (k, &i) in winners.iter().enumerate() {
                prizes[i] += share + u32::from(k < odd);
            }
        }
        if pot.amount > 0 && (walkover || pot.eligibles.len() >= 2) {
            for &i in &winners {
                won[i] = true;
            }
        }

        awards.push(PotAward {
            amount: pot.amount,
            eligibles: pot
                .eligibles
                .iter()
                .map(|&i| state.seats[i].uuid.clone())
                .collect(),
            winners: winners.iter().map(|&i| state.seats[i].uuid.clone()).collect(),
        });
    }

    let winners = (0..n).filter(|&i| won[i]).collect();
    Ok(Judgement {
        prizes,
        awards,
        hand_info,
        winners,
    })
}
