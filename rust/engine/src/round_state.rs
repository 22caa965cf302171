//! Public view of a round, handed to players and carried by events.
//!
//! Hole cards never appear here; an asked player receives its own cards
//! separately.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::game::{GameState, Street};
use crate::player::{ActionRecord, PayStatus, Seat};
use crate::pot::create_pot;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatView {
    pub stack: u32,
    pub state: PayStatus,
    pub name: String,
    pub uuid: String,
}

impl From<&Seat> for SeatView {
    fn from(seat: &Seat) -> Self {
        Self {
            stack: seat.stack,
            state: seat.status(),
            name: seat.name.clone(),
            uuid: seat.uuid.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MainPot {
    pub amount: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SidePot {
    pub amount: u32,
    pub eligibles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotView {
    pub main: MainPot,
    pub side: Vec<SidePot>,
}

/// A history record tagged with the seat that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEntry {
    #[serde(flatten)]
    pub record: ActionRecord,
    pub uuid: String,
}

/// Records of the round grouped by street, in the order they happened.
pub type ActionHistories = BTreeMap<Street, Vec<ActionEntry>>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    pub dealer_btn: usize,
    pub round_count: u32,
    pub small_blind_amount: u32,
    pub street: Street,
    pub next_player: Option<usize>,
    pub community_card: Vec<Card>,
    pub pot: PotView,
    pub seats: Vec<SeatView>,
    pub action_histories: ActionHistories,
}

impl RoundState {
    pub fn from_state(state: &GameState) -> Self {
        let mut tiers = create_pot(&state.seats).into_iter();
        let main = MainPot {
            amount: tiers.next().map_or(0, |p| p.amount),
        };
        let side = tiers
            .map(|p| SidePot {
                amount: p.amount,
                eligibles: p
                    .eligibles
                    .iter()
                    .map(|&i| state.seats[i].uuid.clone())
                    .collect(),
            })
            .collect();

        Self {
            dealer_btn: state.dealer_btn,
            round_count: state.round_count,
            small_blind_amount: state.rule.small_blind_amount,
            street: state.street,
            next_player: state.next_player,
            community_card: state.community_card.clone(),
            pot: PotView { main, side },
            seats: state.seats.iter().map(SeatView::from).collect(),
            action_histories: histories(state),
        }
    }

    pub fn acting_seat(&self) -> Option<&SeatView> {
        self.next_player.and_then(|i| self.seats.get(i))
    }

    /// Wager level `uuid` has reached on the current street.
    pub fn street_wager(&self, uuid: &str) -> u32 {
        self.action_histories
            .get(&self.street)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|e| e.uuid == uuid)
                    .map(|e| e.record.wager())
                    .sum()
            })
            .unwrap_or(0)
    }

    pub fn pot_total(&self) -> u32 {
        self.pot.main.amount + self.pot.side.iter().map(|p| p.amount).sum::<u32>()
    }
}

/// Groups the round log by street. Every street the round has reached gets
/// an entry, possibly empty.
pub fn histories(state: &GameState) -> ActionHistories {
    let mut grouped = ActionHistories::new();
    for street in Street::BETTING {
        let Some(i) = street.betting_index() else {
            continue;
        };
        if state.seats.iter().any(|s| s.round_action_histories[i].is_some()) {
            grouped.insert(street, Vec::new());
        }
    }
    for entry in &state.history {
        grouped.entry(entry.street).or_default().push(ActionEntry {
            record: entry.record,
            uuid: entry.uuid.clone(),
        });
    }
    grouped
}
