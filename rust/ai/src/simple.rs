//! Fixed-policy agents used as opponents and in tests.

use std::collections::VecDeque;

use pokeremu_engine::cards::Card;
use pokeremu_engine::emulator::Agent;
use pokeremu_engine::player::Action;
use pokeremu_engine::round_state::RoundState;
use pokeremu_engine::rules::ValidAction;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{call_amount, raise_range};

/// Folds every decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct FoldMan;

impl Agent for FoldMan {
    fn declare_action(&mut self, _: &[ValidAction], _: &[Card], _: &RoundState) -> (Action, u32) {
        (Action::Fold, 0)
    }
}

/// Checks when free, calls otherwise. Never raises.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallMan;

impl Agent for CallMan {
    fn declare_action(
        &mut self,
        valid_actions: &[ValidAction],
        _: &[Card],
        _: &RoundState,
    ) -> (Action, u32) {
        (Action::Call, call_amount(valid_actions))
    }
}

/// Picks uniformly among the offered actions; raises pick a uniform level
/// inside the offered range. Same seed, same declarations.
#[derive(Debug, Clone)]
pub struct RandomAgent {
    rng: StdRng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn declare_action(
        &mut self,
        valid_actions: &[ValidAction],
        _: &[Card],
        _: &RoundState,
    ) -> (Action, u32) {
        let mut choices = vec![
            (Action::Fold, 0),
            (Action::Call, call_amount(valid_actions)),
        ];
        if let Some(range) = raise_range(valid_actions) {
            choices.push((Action::Raise, self.rng.random_range(range.min..=range.max)));
        }
        choices[self.rng.random_range(0..choices.len())]
    }
}

/// Replays declarations in order, then keeps calling.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAgent {
    script: VecDeque<(Action, u32)>,
}

impl ScriptedAgent {
    pub fn new(script: &[(Action, u32)]) -> Self {
        Self {
            script: script.iter().copied().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl Agent for ScriptedAgent {
    fn declare_action(
        &mut self,
        valid_actions: &[ValidAction],
        _: &[Card],
        _: &RoundState,
    ) -> (Action, u32) {
        self.script
            .pop_front()
            .unwrap_or_else(|| (Action::Call, call_amount(valid_actions)))
    }
}
