//! # pokeremu-ai: Agents for the Poker Match Emulator
//!
//! Concrete implementations of the engine's [`Agent`] capability, usable
//! directly with [`Emulator::register_player`](pokeremu_engine::emulator::Emulator::register_player).
//!
//! ## Agents
//!
//! - [`simple::FoldMan`] - folds whenever asked
//! - [`simple::CallMan`] - checks or calls every decision
//! - [`simple::RandomAgent`] - seeded uniform choice among the valid actions
//! - [`simple::ScriptedAgent`] - replays a fixed list of declarations
//! - [`baseline::BaselineAgent`] - rule-based play on hand strength and pot odds
//!
//! ## Quick Start
//!
//! ```rust
//! use pokeremu_ai::create_agent;
//! use pokeremu_engine::emulator::{Emulator, PlayerInfo};
//!
//! let mut emulator = Emulator::new().with_seed(7);
//! emulator.set_game_rule(2, 3, 5, 0).unwrap();
//! emulator.register_boxed_player("bot", create_agent("baseline", 0).unwrap());
//! emulator.register_boxed_player("rng", create_agent("random", 11).unwrap());
//!
//! let state = emulator
//!     .generate_initial_game_state(&[
//!         PlayerInfo::new("bot", "baseline", 100),
//!         PlayerInfo::new("rng", "random", 100),
//!     ])
//!     .unwrap();
//! let (state, _) = emulator.run_until_game_finish(&state).unwrap();
//! assert_eq!(state.seats.iter().map(|s| s.stack).sum::<u32>(), 200);
//! ```

use pokeremu_engine::emulator::Agent;
use pokeremu_engine::rules::{RaiseRange, ValidAction};

pub mod baseline;
pub mod simple;

pub use baseline::BaselineAgent;
pub use simple::{CallMan, FoldMan, RandomAgent, ScriptedAgent};

/// Names accepted by [`create_agent`].
pub const AGENT_KINDS: [&str; 4] = ["fold", "call", "random", "baseline"];

/// Builds an agent by name. `seed` only matters for `"random"`.
///
/// ```rust
/// use pokeremu_ai::create_agent;
///
/// assert!(create_agent("call", 0).is_some());
/// assert!(create_agent("psychic", 0).is_none());
/// ```
pub fn create_agent(kind: &str, seed: u64) -> Option<Box<dyn Agent>> {
    match kind {
        "fold" => Some(Box::new(FoldMan)),
        "call" => Some(Box::new(CallMan)),
        "random" => Some(Box::new(RandomAgent::new(seed))),
        "baseline" => Some(Box::new(BaselineAgent::new())),
        _ => None,
    }
}

/// Wager level of the offered call, 0 if none is offered.
pub fn call_amount(valid_actions: &[ValidAction]) -> u32 {
    valid_actions
        .iter()
        .find_map(|v| match v {
            ValidAction::Call { amount } => Some(*amount),
            _ => None,
        })
        .unwrap_or(0)
}

/// Raise bounds, if raising is open to the acting seat.
pub fn raise_range(valid_actions: &[ValidAction]) -> Option<RaiseRange> {
    valid_actions.iter().find_map(|v| match v {
        ValidAction::Raise { amount } if amount.min <= amount.max => Some(*amount),
        _ => None,
    })
}
