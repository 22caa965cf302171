#![allow(dead_code)]

use std::collections::VecDeque;

use pokeremu_engine::cards::{parse_cards, Card};
use pokeremu_engine::emulator::{Agent, Emulator, PlayerInfo};
use pokeremu_engine::game::GameState;
use pokeremu_engine::player::Action;
use pokeremu_engine::round_state::RoundState;
use pokeremu_engine::rules::{GameRule, ValidAction};
use serde_json::json;

pub const TWO_P1: &str = "tojrbxmkuzrarnniosuhct";
pub const TWO_P2: &str = "pwtwlmfciymjdoljkhagxa";

pub const THREE_P1: &str = "ruypwwoqwuwdnauiwpefsw";
pub const THREE_P2: &str = "sqmfwdkpcoagzqxpxnmxwm";
pub const THREE_P3: &str = "uxrdiwvctvilasinweqven";

pub fn cards(list: &[&str]) -> Vec<Card> {
    parse_cards(list).unwrap()
}

pub fn call_amount(valid: &[ValidAction]) -> u32 {
    valid
        .iter()
        .find_map(|v| match v {
            ValidAction::Call { amount } => Some(*amount),
            _ => None,
        })
        .unwrap()
}

/// Plays the queued decisions in order, then keeps calling.
#[derive(Debug, Default)]
pub struct ScriptedAgent {
    script: VecDeque<(Action, u32)>,
}

impl ScriptedAgent {
    pub fn new(script: &[(Action, u32)]) -> Self {
        Self {
            script: script.iter().copied().collect(),
        }
    }
}

impl Agent for ScriptedAgent {
    fn declare_action(
        &mut self,
        valid_actions: &[ValidAction],
        _hole_card: &[Card],
        _round_state: &RoundState,
    ) -> (Action, u32) {
        self.script
            .pop_front()
            .unwrap_or_else(|| (Action::Call, call_amount(valid_actions)))
    }
}

pub struct FoldAgent;

impl Agent for FoldAgent {
    fn declare_action(&mut self, _: &[ValidAction], _: &[Card], _: &RoundState) -> (Action, u32) {
        (Action::Fold, 0)
    }
}

pub fn emulator(player_num: usize, max_round: u32, sb: u32, ante: u32) -> Emulator {
    let mut emu = Emulator::new().with_seed(2024);
    emu.set_game_rule(player_num, max_round, sb, ante).unwrap();
    emu
}

pub fn initial_state(emu: &Emulator, stacks: &[u32]) -> GameState {
    let players: Vec<PlayerInfo> = stacks
        .iter()
        .enumerate()
        .map(|(i, &stack)| PlayerInfo::new(format!("p{i}"), format!("player{i}"), stack))
        .collect();
    emu.generate_initial_game_state(&players).unwrap()
}

pub fn rule(player_num: usize, max_round: u32) -> GameRule {
    GameRule::new(player_num, max_round, 5, 0).unwrap()
}

/// Heads-up hand on the turn: p1 raised to 15, p2 to act.
pub fn two_player_round_state() -> RoundState {
    serde_json::from_value(json!({
        "dealer_btn": 0,
        "round_count": 3,
        "small_blind_amount": 5,
        "street": "turn",
        "next_player": 1,
        "community_card": ["D5", "D9", "H6", "CK"],
        "pot": {"main": {"amount": 55}, "side": []},
        "seats": [
            {"stack": 65, "state": "participating", "name": "p1", "uuid": TWO_P1},
            {"stack": 80, "state": "participating", "name": "p2", "uuid": TWO_P2}
        ],
        "action_histories": {
            "preflop": [
                {"action": "SMALLBLIND", "amount": 5, "add_amount": 5, "uuid": TWO_P1},
                {"action": "BIGBLIND", "amount": 10, "add_amount": 5, "uuid": TWO_P2},
                {"action": "CALL", "amount": 10, "paid": 5, "uuid": TWO_P1}
            ],
            "flop": [
                {"action": "RAISE", "amount": 5, "add_amount": 5, "paid": 5, "uuid": TWO_P1},
                {"action": "RAISE", "amount": 10, "add_amount": 5, "paid": 10, "uuid": TWO_P2},
                {"action": "CALL", "amount": 10, "paid": 5, "uuid": TWO_P1}
            ],
            "turn": [
                {"action": "RAISE", "amount": 15, "add_amount": 15, "paid": 15, "uuid": TWO_P1}
            ]
        }
    }))
    .unwrap()
}

/// Three-handed turn with p2 already all-in; p3 bet 10, p1 to act.
pub fn three_player_round_state() -> RoundState {
    serde_json::from_value(json!({
        "dealer_btn": 1,
        "round_count": 2,
        "small_blind_amount": 5,
        "street": "turn",
        "next_player": 0,
        "community_card": ["HJ", "C8", "D2", "H4"],
        "pot": {"main": {"amount": 150}, "side": [{"amount": 30, "eligibles": [THREE_P1, THREE_P3]}]},
        "seats": [
            {"stack": 35, "state": "participating", "name": "p1", "uuid": THREE_P1},
            {"stack": 0, "state": "allin", "name": "p2", "uuid": THREE_P2},
            {"stack": 85, "state": "participating", "name": "p3", "uuid": THREE_P3}
        ],
        "action_histories": {
            "preflop": [
                {"action": "SMALLBLIND", "amount": 5, "add_amount": 5, "uuid": THREE_P2},
                {"action": "BIGBLIND", "amount": 10, "add_amount": 5, "uuid": THREE_P3},
                {"action": "CALL", "amount": 10, "paid": 10, "uuid": THREE_P1},
                {"action": "CALL", "amount": 10, "paid": 5, "uuid": THREE_P2}
            ],
            "flop": [
                {"action": "CALL", "amount": 0, "paid": 0, "uuid": THREE_P2},
                {"action": "CALL", "amount": 0, "paid": 0, "uuid": THREE_P3},
                {"action": "RAISE", "amount": 50, "add_amount": 50, "paid": 50, "uuid": THREE_P1},
                {"action": "CALL", "amount": 40, "paid": 40, "uuid": THREE_P2},
                {"action": "CALL", "amount": 50, "paid": 50, "uuid": THREE_P3}
            ],
            "turn": [
                {"action": "RAISE", "amount": 10, "add_amount": 10, "paid": 10, "uuid": THREE_P3}
            ]
        }
    }))
    .unwrap()
}
