use thiserror::Error;

use crate::player::Action;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Game rule has not been set")]
    MissingGameRule,
    #[error("Invalid game rule: {0}")]
    InvalidGameRule(String),
    #[error("No agent registered for player {0}")]
    UnknownPlayer(String),
    #[error("Illegal action {action:?} with amount {amount}: {reason}")]
    IllegalAction {
        action: Action,
        amount: u32,
        reason: String,
    },
    #[error("No player is waiting to act")]
    NoPlayerToAct,
    #[error("Round is not in a betting street")]
    RoundNotInProgress,
    #[error("A round is still being played")]
    RoundInProgress,
    #[error("Game already finished")]
    GameFinished,
    #[error("Insufficient chips for action")]
    InsufficientChips,
    #[error("Deck has no cards left")]
    DeckExhausted,
    #[error("Hole cards missing for player {0}")]
    MissingHoleCards(String),
    #[error("Invalid card: {0}")]
    InvalidCard(String),
    #[error("Invalid round state: {0}")]
    InvalidSnapshot(String),
}

impl EngineError {
    pub(crate) fn illegal(action: Action, amount: u32, reason: impl Into<String>) -> Self {
        EngineError::IllegalAction {
            action,
            amount,
            reason: reason.into(),
        }
    }
}
