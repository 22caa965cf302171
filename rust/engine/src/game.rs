use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::player::{ActionRecord, Seat};
use crate::rules::GameRule;

/// Phase of a round. The four betting streets come first, then the
/// terminal phases.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
    Finished,
}

impl Street {
    pub const BETTING: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    pub fn betting_index(self) -> Option<usize> {
        match self {
            Street::Preflop => Some(0),
            Street::Flop => Some(1),
            Street::Turn => Some(2),
            Street::River => Some(3),
            Street::Showdown | Street::Finished => None,
        }
    }

    pub fn is_betting(self) -> bool {
        self.betting_index().is_some()
    }

    pub fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River => Street::Showdown,
            Street::Showdown | Street::Finished => Street::Finished,
        }
    }

    /// Community cards on the board once this street is open.
    pub fn board_size(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River | Street::Showdown | Street::Finished => 5,
        }
    }
}

/// One record of the round's ordered action log.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct HistoryEntry {
    pub street: Street,
    pub uuid: String,
    pub record: ActionRecord,
}

/// Betting position of the open street that the seats alone cannot tell.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
pub(crate) struct Betting {
    /// Increment of the last full raise (the big blind preflop).
    pub last_increment: u32,
    /// Full raises made on this street so far.
    pub full_raises: u32,
}

/// Snapshot of a match at one decision point.
///
/// Every engine transition takes a `&GameState` and returns a new value;
/// a snapshot is never edited once a newer one exists.
#[derive(Debug, Clone)]
pub struct GameState {
    pub round_count: u32,
    pub street: Street,
    pub dealer_btn: usize,
    /// Seat that must act next; `None` when nobody is being asked.
    pub next_player: Option<usize>,
    pub community_card: Vec<Card>,
    pub seats: Vec<Seat>,
    pub deck: Deck,
    pub rule: GameRule,
    /// Ordered log of the current round.
    pub history: Vec<HistoryEntry>,
    pub(crate) betting: Betting,
}

impl GameState {
    /// Round-zero state: nothing dealt, button on seat 0, ready for the
    /// first `start_new_round`.
    pub fn new(seats: Vec<Seat>, deck: Deck, rule: GameRule) -> Self {
        Self {
            round_count: 0,
            street: Street::Finished,
            dealer_btn: 0,
            next_player: None,
            community_card: Vec::new(),
            seats,
            deck,
            rule,
            history: Vec::new(),
            betting: Betting::default(),
        }
    }

    pub fn seat_index(&self, uuid: &str) -> Option<usize> {
        self.seats.iter().position(|s| s.uuid == uuid)
    }

    pub fn acting_seat(&self) -> Option<&Seat> {
        self.next_player.and_then(|i| self.seats.get(i))
    }

    /// Highest wager level on the open street.
    pub fn max_wager(&self) -> u32 {
        self.seats
            .iter()
            .map(|s| s.street_wager(self.street))
            .max()
            .unwrap_or(0)
    }

    pub fn count_active(&self) -> usize {
        self.seats.iter().filter(|s| s.is_active()).count()
    }

    pub fn count_waiting(&self) -> usize {
        self.seats.iter().filter(|s| s.is_waiting_ask()).count()
    }

    /// First seat after `pos` in table order that can still be asked.
    pub fn next_waiting_after(&self, pos: usize) -> Option<usize> {
        let n = self.seats.len();
        (1..=n)
            .map(|offset| (pos + offset) % n)
            .find(|&i| self.seats[i].is_waiting_ask())
    }

    /// Stacks plus chips committed this round. Constant over a match.
    pub fn total_chips(&self) -> u64 {
        self.seats
            .iter()
            .map(|s| u64::from(s.stack) + u64::from(s.pay_info.amount))
            .sum()
    }

    pub fn pot_total(&self) -> u32 {
        self.seats.iter().map(|s| s.pay_info.amount).sum()
    }

    /// Seat indices clockwise starting with the first seat after the button.
    pub fn order_from_button(&self) -> impl Iterator<Item = usize> + '_ {
        let n = self.seats.len();
        (1..=n).map(move |offset| (self.dealer_btn + offset) % n)
    }

    pub(crate) fn log(&mut self, pos: usize, record: ActionRecord) {
        let street = self.street;
        self.seats[pos].record(street, record);
        self.history.push(HistoryEntry {
            street,
            uuid: self.seats[pos].uuid.clone(),
            record,
        });
    }
}
