//! Messages produced while a round advances and the events exposed to
//! callers.
//!
//! The round manager emits a [`Message`] for everything that happens,
//! including each applied action. Callers only see the subset that needs
//! their attention; [`create_event`] performs that filtering.

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::evaluator::{HandInfo, PotAward};
use crate::game::Street;
use crate::player::ActionRecord;
use crate::round_state::{ActionHistories, RoundState, SeatView};
use crate::rules::{GameRule, ValidAction};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    StreetStart {
        street: Street,
        round_state: RoundState,
    },
    Ask {
        hole_card: Vec<Card>,
        valid_actions: Vec<ValidAction>,
        round_state: RoundState,
        action_histories: ActionHistories,
    },
    GameUpdate {
        uuid: String,
        action: ActionRecord,
        round_state: RoundState,
    },
    RoundResult {
        round_count: u32,
        winners: Vec<SeatView>,
        hand_info: Vec<HandInfo>,
        pots: Vec<PotAward>,
        round_state: RoundState,
    },
    GameResult {
        rule: GameRule,
        seats: Vec<SeatView>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    #[serde(rename = "event_new_street")]
    NewStreet {
        street: Street,
        round_state: RoundState,
    },
    #[serde(rename = "event_ask_player")]
    AskPlayer {
        uuid: String,
        hole_card: Vec<Card>,
        valid_actions: Vec<ValidAction>,
        round_state: RoundState,
        action_histories: ActionHistories,
    },
    #[serde(rename = "event_round_finish")]
    RoundFinish {
        round_count: u32,
        winners: Vec<SeatView>,
        hand_info: Vec<HandInfo>,
        pots: Vec<PotAward>,
        round_state: RoundState,
    },
    #[serde(rename = "event_game_finish")]
    GameFinish {
        rule: GameRule,
        players: Vec<SeatView>,
    },
}

impl Event {
    pub fn is_game_finish(&self) -> bool {
        matches!(self, Event::GameFinish { .. })
    }

    pub fn is_round_finish(&self) -> bool {
        matches!(self, Event::RoundFinish { .. })
    }

    pub fn round_state(&self) -> Option<&RoundState> {
        match self {
            Event::NewStreet { round_state, .. }
            | Event::AskPlayer { round_state, .. }
            | Event::RoundFinish { round_state, .. } => Some(round_state),
            Event::GameFinish { .. } => None,
        }
    }
}

/// Converts a message into the event callers see. Per-action updates yield
/// `None`; the acting player is read from the round state's `next_player`.
pub fn create_event(message: &Message) -> Option<Event> {
    match message {
        Message::StreetStart {
            street,
            round_state,
        } => Some(Event::NewStreet {
            street: *street,
            round_state: round_state.clone(),
        }),
        Message::Ask {
            hole_card,
            valid_actions,
            round_state,
            action_histories,
        } => round_state.acting_seat().map(|seat| Event::AskPlayer {
            uuid: seat.uuid.clone(),
            hole_card: hole_card.clone(),
            valid_actions: valid_actions.clone(),
            round_state: round_state.clone(),
            action_histories: action_histories.clone(),
        }),
        Message::GameUpdate { .. } => None,
        Message::RoundResult {
            round_count,
            winners,
            hand_info,
            pots,
            round_state,
        } => Some(Event::RoundFinish {
            round_count: *round_count,
            winners: winners.clone(),
            hand_info: hand_info.clone(),
            pots: pots.clone(),
            round_state: round_state.clone(),
        }),
        Message::GameResult { rule, seats } => Some(Event::GameFinish {
            rule: rule.clone(),
            players: seats.clone(),
        }),
    }
}

pub fn create_events<'a>(messages: impl IntoIterator<Item = &'a Message>) -> Vec<Event> {
    messages.into_iter().filter_map(create_event).collect()
}
