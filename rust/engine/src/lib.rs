//! # pokeremu-engine: Poker Match Emulator Core
//!
//! A deterministic No-Limit Texas Hold'em engine for two to ten seats.
//! Game states are immutable snapshots: every step takes a state and
//! returns the next one together with the events a caller must react to,
//! so a match can be paused, branched and replayed from any point.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and deck construction
//! - [`deck`] - Deterministic deck shuffling with ChaCha20 RNG
//! - [`hand`] - Hand evaluation and the [`hand::HandRanker`] seam
//! - [`player`] - Seats, payment status and action records
//! - [`game`] - Game state snapshot and streets
//! - [`rules`] - Game rule, valid actions and action validation
//! - [`pot`] - Main pot and side pot construction
//! - [`evaluator`] - Showdown judgement and payout
//! - [`round_manager`] - Street-by-street progression of a round
//! - [`round_state`] - Public round view handed to players
//! - [`events`] - Internal messages and caller-facing events
//! - [`emulator`] - Round setup and the run-until drivers
//! - [`state_builder`] - Rebuilding a game state from a round view
//! - [`config`] - Match configuration from TOML and environment
//! - [`logging`] - Tracing subscriber setup
//! - [`errors`] - Error types for engine operations
//!
//! ## Quick Start
//!
//! ```rust
//! use pokeremu_engine::cards::Card;
//! use pokeremu_engine::emulator::{Emulator, PlayerInfo};
//! use pokeremu_engine::player::Action;
//! use pokeremu_engine::round_state::RoundState;
//! use pokeremu_engine::rules::ValidAction;
//!
//! let mut emulator = Emulator::new().with_seed(42);
//! emulator.set_game_rule(3, 5, 5, 0).unwrap();
//! for uuid in ["a", "b", "c"] {
//!     // always call
//!     emulator.register_player(uuid, |valid: &[ValidAction], _: &[Card], _: &RoundState| {
//!         let amount = valid
//!             .iter()
//!             .find_map(|v| match v {
//!                 ValidAction::Call { amount } => Some(*amount),
//!                 _ => None,
//!             })
//!             .unwrap_or(0);
//!         (Action::Call, amount)
//!     });
//! }
//!
//! let state = emulator
//!     .generate_initial_game_state(&[
//!         PlayerInfo::new("a", "a", 100),
//!         PlayerInfo::new("b", "b", 100),
//!         PlayerInfo::new("c", "c", 100),
//!     ])
//!     .unwrap();
//! let (state, events) = emulator.run_until_game_finish(&state).unwrap();
//!
//! assert!(events.last().is_some_and(|e| e.is_game_finish()));
//! assert_eq!(state.seats.iter().map(|s| s.stack).sum::<u32>(), 300);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! All deals are reproducible using seeded RNG:
//!
//! ```rust
//! use pokeremu_engine::deck::Deck;
//!
//! let mut deck1 = Deck::new_with_seed(42);
//! let mut deck2 = Deck::new_with_seed(42);
//! deck1.shuffle();
//! deck2.shuffle();
//! assert_eq!(deck1.cards(), deck2.cards());
//! ```

pub mod cards;
pub mod config;
pub mod deck;
pub mod emulator;
pub mod errors;
pub mod evaluator;
pub mod events;
pub mod game;
pub mod hand;
pub mod logging;
pub mod player;
pub mod pot;
pub mod round_manager;
pub mod round_state;
pub mod rules;
pub mod state_builder;

pub use emulator::{Agent, Emulator, PlayerInfo};
pub use errors::EngineError;
pub use events::Event;
