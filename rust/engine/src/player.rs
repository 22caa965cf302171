use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::errors::EngineError;
use crate::game::Street;

/// A decision a player can declare when asked.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Forfeit the round
    Fold,
    /// Match the current wager level (a free call is a check)
    Call,
    /// Raise the wager level
    Raise,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Fold => "fold",
            Action::Call => "call",
            Action::Raise => "raise",
        };
        f.write_str(s)
    }
}

impl FromStr for Action {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fold" => Ok(Action::Fold),
            "call" => Ok(Action::Call),
            "raise" => Ok(Action::Raise),
            other => Err(EngineError::illegal(
                Action::Fold,
                0,
                format!("unknown action name {other:?}"),
            )),
        }
    }
}

/// Payment status of a seat within the current round.
///
/// `PayTillEnd` may move to `AllIn` or `Folded`; both are terminal until the
/// next round resets the seat.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum PayStatus {
    #[serde(rename = "participating")]
    PayTillEnd,
    #[serde(rename = "allin")]
    AllIn,
    #[serde(rename = "folded")]
    Folded,
}

impl PayStatus {
    /// Name used for the seat `state` in round-state snapshots.
    pub fn label(self) -> &'static str {
        match self {
            PayStatus::PayTillEnd => "participating",
            PayStatus::AllIn => "allin",
            PayStatus::Folded => "folded",
        }
    }
}

/// Chips a seat has committed during the current round and its status.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct PayInfo {
    pub status: PayStatus,
    pub amount: u32,
}

impl Default for PayInfo {
    fn default() -> Self {
        Self {
            status: PayStatus::PayTillEnd,
            amount: 0,
        }
    }
}

impl PayInfo {
    pub fn update_by_pay(&mut self, amount: u32) {
        self.amount += amount;
    }

    pub fn update_to_fold(&mut self) {
        self.status = PayStatus::Folded;
    }

    pub fn update_to_allin(&mut self) {
        if self.status == PayStatus::PayTillEnd {
            self.status = PayStatus::AllIn;
        }
    }

    pub fn reset(&mut self) {
        *self = PayInfo::default();
    }
}

/// One entry of a seat's per-street action history.
///
/// `amount` is the street wager level reached, `paid` the chips moved from
/// the stack by this action and `add_amount` the increase of the level.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "UPPERCASE")]
pub enum ActionRecord {
    Ante {
        amount: u32,
    },
    #[serde(rename = "SMALLBLIND")]
    SmallBlind { amount: u32, add_amount: u32 },
    #[serde(rename = "BIGBLIND")]
    BigBlind { amount: u32, add_amount: u32 },
    Call {
        amount: u32,
        paid: u32,
    },
    Raise {
        amount: u32,
        add_amount: u32,
        paid: u32,
    },
    Fold,
}

impl ActionRecord {
    /// Contribution to the street wager level (antes do not count).
    pub fn wager(&self) -> u32 {
        match *self {
            ActionRecord::SmallBlind { amount, .. } | ActionRecord::BigBlind { amount, .. } => {
                amount
            }
            ActionRecord::Call { paid, .. } | ActionRecord::Raise { paid, .. } => paid,
            ActionRecord::Ante { .. } | ActionRecord::Fold => 0,
        }
    }

    /// All chips this record moved from the stack into the pot.
    pub fn chips(&self) -> u32 {
        match *self {
            ActionRecord::Ante { amount } => amount,
            other => other.wager(),
        }
    }

    /// True for decisions the player declared (blinds and antes are forced).
    pub fn is_decision(&self) -> bool {
        matches!(
            self,
            ActionRecord::Call { .. } | ActionRecord::Raise { .. } | ActionRecord::Fold
        )
    }
}

/// A table position: identity, stack, hole cards and this round's betting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub uuid: String,
    pub name: String,
    pub stack: u32,
    pub hole_card: Vec<Card>,
    /// Indexed by betting street; `None` until the street is reached.
    pub round_action_histories: [Option<Vec<ActionRecord>>; 4],
    pub pay_info: PayInfo,
    /// Full-raise count of the street when this seat last declared an
    /// action; `None` while it has not acted on the street.
    pub(crate) raise_mark: Option<u32>,
}

impl Seat {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>, stack: u32) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            stack,
            hole_card: Vec::new(),
            round_action_histories: Default::default(),
            pay_info: PayInfo::default(),
            raise_mark: None,
        }
    }

    pub fn status(&self) -> PayStatus {
        self.pay_info.status
    }

    /// Still contending for the pot.
    pub fn is_active(&self) -> bool {
        self.pay_info.status != PayStatus::Folded
    }

    /// Can still be asked for a decision this round.
    pub fn is_waiting_ask(&self) -> bool {
        self.pay_info.status == PayStatus::PayTillEnd
    }

    pub fn has_acted(&self) -> bool {
        self.raise_mark.is_some()
    }

    pub fn street_history(&self, street: Street) -> &[ActionRecord] {
        street
            .betting_index()
            .and_then(|i| self.round_action_histories[i].as_deref())
            .unwrap_or(&[])
    }

    /// Wager level this seat has reached on `street`.
    pub fn street_wager(&self, street: Street) -> u32 {
        self.street_history(street).iter().map(|r| r.wager()).sum()
    }

    /// Moves `amount` from the stack into the round contribution.
    pub fn pay(&mut self, amount: u32) -> Result<(), EngineError> {
        if amount > self.stack {
            return Err(EngineError::InsufficientChips);
        }
        self.stack -= amount;
        self.pay_info.update_by_pay(amount);
        if self.stack == 0 {
            self.pay_info.update_to_allin();
        }
        Ok(())
    }

    pub fn add_chips(&mut self, amount: u32) {
        self.stack += amount;
    }

    pub(crate) fn record(&mut self, street: Street, record: ActionRecord) {
        if let Some(i) = street.betting_index() {
            self.round_action_histories[i]
                .get_or_insert_with(Vec::new)
                .push(record);
        }
    }

    pub(crate) fn open_street(&mut self, street: Street) {
        if let Some(i) = street.betting_index() {
            self.round_action_histories[i].get_or_insert_with(Vec::new);
        }
        self.raise_mark = None;
    }

    /// Clears everything that belongs to the previous round. A seat without
    /// chips sits the new round out.
    pub(crate) fn reset_for_round(&mut self) {
        self.hole_card.clear();
        self.round_action_histories = Default::default();
        self.pay_info.reset();
        self.raise_mark = None;
        if self.stack == 0 {
            self.pay_info.update_to_fold();
        }
    }
}
