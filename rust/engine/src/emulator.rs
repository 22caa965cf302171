use std::collections::HashMap;

use crate::cards::Card;
use crate::config::MatchConfig;
use crate::deck::{Deck, DEFAULT_SEED};
use crate::errors::EngineError;
use crate::events::{create_event, create_events, Event, Message};
use crate::game::{Betting, GameState, Street};
use crate::hand::{HandRanker, StandardRanker};
use crate::player::{Action, ActionRecord, Seat};
use crate::round_manager::{apply_action, open_preflop};
use crate::round_state::{RoundState, SeatView};
use crate::rules::{legal_actions, GameRule, ValidAction};

/// A decision maker bound to one seat.
///
/// The amount is a street wager level: the level to match for a call, the
/// level raised to for a raise. It is ignored for a fold.
pub trait Agent {
    fn declare_action(
        &mut self,
        valid_actions: &[ValidAction],
        hole_card: &[Card],
        round_state: &RoundState,
    ) -> (Action, u32);
}

impl<F> Agent for F
where
    F: FnMut(&[ValidAction], &[Card], &RoundState) -> (Action, u32),
{
    fn declare_action(
        &mut self,
        valid_actions: &[ValidAction],
        hole_card: &[Card],
        round_state: &RoundState,
    ) -> (Action, u32) {
        self(valid_actions, hole_card, round_state)
    }
}

/// Seat description used to build the initial state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInfo {
    pub uuid: String,
    pub name: String,
    pub stack: u32,
}

impl PlayerInfo {
    pub fn new(uuid: impl Into<String>, name: impl Into<String>, stack: u32) -> Self {
        Self {
            uuid: uuid.into(),
            name: name.into(),
            stack,
        }
    }
}

/// Drives matches one decision, round or whole game at a time.
///
/// The emulator itself holds only configuration: the game rule, the agents
/// and the hand ranker. Every step takes a [`GameState`] and returns a new
/// one along with the [`Event`]s produced, so any earlier snapshot can be
/// replayed from.
///
/// # Examples
///
/// ```
/// use pokeremu_engine::emulator::{Emulator, PlayerInfo};
/// use pokeremu_engine::events::Event;
/// use pokeremu_engine::player::Action;
///
/// let mut emulator = Emulator::new().with_seed(7);
/// emulator.set_game_rule(2, 1, 5, 0).unwrap();
/// let state = emulator
///     .generate_initial_game_state(&[
///         PlayerInfo::new("a", "alice", 100),
///         PlayerInfo::new("b", "bob", 100),
///     ])
///     .unwrap();
///
/// let (state, events) = emulator.start_new_round(&state).unwrap();
/// assert!(matches!(events.last(), Some(Event::AskPlayer { uuid, .. }) if uuid == "b"));
///
/// let (state, events) = emulator.run_until_next_event(&state, Action::Fold, 0).unwrap();
/// assert_eq!(state.seats[0].stack, 105);
/// assert_eq!(state.seats[1].stack, 95);
/// assert!(events.last().is_some_and(|e| e.is_game_finish()));
/// ```
pub struct Emulator {
    rule: Option<GameRule>,
    players: HashMap<String, Box<dyn Agent>>,
    ranker: Box<dyn HandRanker>,
    seed: u64,
}

impl Default for Emulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Emulator {
    pub fn new() -> Self {
        Self {
            rule: None,
            players: HashMap::new(),
            ranker: Box::new(StandardRanker),
            seed: DEFAULT_SEED,
        }
    }

    pub fn from_config(config: &MatchConfig) -> Result<Self, EngineError> {
        let mut emulator = Self::new().with_seed(config.seed.unwrap_or(DEFAULT_SEED));
        emulator.set_game_rule(
            config.player_num,
            config.max_round,
            config.small_blind_amount,
            config.ante,
        )?;
        Ok(emulator)
    }

    /// Seed for decks created by [`Emulator::generate_initial_game_state`].
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_ranker(mut self, ranker: impl HandRanker + 'static) -> Self {
        self.ranker = Box::new(ranker);
        self
    }

    pub fn set_game_rule(
        &mut self,
        player_num: usize,
        max_round: u32,
        small_blind_amount: u32,
        ante: u32,
    ) -> Result<(), EngineError> {
        self.rule = Some(GameRule::new(
            player_num,
            max_round,
            small_blind_amount,
            ante,
        )?);
        Ok(())
    }

    pub fn game_rule(&self) -> Option<&GameRule> {
        self.rule.as_ref()
    }

    /// Binds an agent to a seat uuid, replacing any previous binding.
    pub fn register_player(&mut self, uuid: impl Into<String>, agent: impl Agent + 'static) {
        self.register_boxed_player(uuid, Box::new(agent));
    }

    /// Same as [`Emulator::register_player`] for an already boxed agent.
    pub fn register_boxed_player(&mut self, uuid: impl Into<String>, agent: Box<dyn Agent>) {
        self.players.insert(uuid.into(), agent);
    }

    pub fn fetch_player(&self, uuid: &str) -> Option<&dyn Agent> {
        self.players.get(uuid).map(|agent| agent.as_ref())
    }

    fn rule(&self) -> Result<&GameRule, EngineError> {
        self.rule.as_ref().ok_or(EngineError::MissingGameRule)
    }

    /// Round-zero state for the given seats, in table order.
    pub fn generate_initial_game_state(
        &self,
        players: &[PlayerInfo],
    ) -> Result<GameState, EngineError> {
        let rule = self.rule()?;
        if players.len() != rule.player_num {
            return Err(EngineError::InvalidGameRule(format!(
                "expected {} players, got {}",
                rule.player_num,
                players.len()
            )));
        }
        let seats = players
            .iter()
            .map(|p| Seat::new(p.uuid.clone(), p.name.clone(), p.stack))
            .collect();
        Ok(GameState::new(
            seats,
            Deck::new_with_seed(self.seed),
            rule.clone(),
        ))
    }

    /// True when no further round may start.
    pub fn is_last_round(&self, state: &GameState) -> Result<bool, EngineError> {
        Ok(is_last_round(state, self.rule()?))
    }

    /// Deals the next round: moves the button, assigns and posts blinds and
    /// antes, deals hole cards and opens preflop.
    ///
    /// Returns `GameFinish` instead when the match is over or fewer than two
    /// seats can cover the blinds.
    ///
    /// # Errors
    ///
    /// [`EngineError::RoundInProgress`] unless `state` is between rounds.
    pub fn start_new_round(&self, state: &GameState) -> Result<(GameState, Vec<Event>), EngineError> {
        let rule = self.rule()?;
        if state.street != Street::Finished {
            return Err(EngineError::RoundInProgress);
        }
        if is_last_round(state, rule) {
            let events = create_event(&game_result(state, rule)).into_iter().collect();
            return Ok((state.clone(), events));
        }
        let Some((next, big_blind_pos)) = deal_round(state, rule)? else {
            tracing::info!(
                round = state.round_count,
                "fewer than two seats can post blinds"
            );
            let events = create_event(&game_result(state, rule)).into_iter().collect();
            return Ok((state.clone(), events));
        };

        let (next, messages) = open_preflop(next, big_blind_pos, self.ranker.as_ref())?;
        let mut events = create_events(&messages);
        if next.street == Street::Finished && is_last_round(&next, rule) {
            events.extend(create_event(&game_result(&next, rule)));
        }
        Ok((next, events))
    }

    /// Applies one action and advances to the next event that needs the
    /// caller: the next decision or the end of the match.
    ///
    /// On a state between rounds the next round is dealt first. When the
    /// action finishes a round, following rounds are dealt until a player
    /// must act again.
    ///
    /// # Errors
    ///
    /// [`EngineError::MissingGameRule`] before [`Emulator::set_game_rule`],
    /// [`EngineError::GameFinished`] when the match is already over, and
    /// the errors of [`apply_action`] for an illegal action.
    pub fn run_until_next_event(
        &self,
        state: &GameState,
        action: Action,
        amount: u32,
    ) -> Result<(GameState, Vec<Event>), EngineError> {
        let mut events = Vec::new();
        let current = match self.resume(state, &mut events)? {
            Resumed::Playing(current) => current,
            Resumed::Ended(last) => return Ok((last, events)),
        };
        let (next, messages) = apply_action(&current, action, amount, self.ranker.as_ref())?;
        events.extend(create_events(&messages));
        if next.street != Street::Finished {
            return Ok((next, events));
        }
        let (next, _) = self.advance_to_decision(next, &mut events)?;
        Ok((next, events))
    }

    /// Asks the registered agents until the current round finishes.
    /// `GameFinish` follows the `RoundFinish` event when it was the last round.
    pub fn run_until_round_finish(
        &mut self,
        state: &GameState,
    ) -> Result<(GameState, Vec<Event>), EngineError> {
        let mut events = Vec::new();
        let current = match self.resume(state, &mut events)? {
            Resumed::Playing(current) => current,
            Resumed::Ended(last) => return Ok((last, events)),
        };
        let next = self.play_round(current, &mut events)?;
        Ok((next, events))
    }

    /// Plays rounds until the match is over.
    pub fn run_until_game_finish(
        &mut self,
        state: &GameState,
    ) -> Result<(GameState, Vec<Event>), EngineError> {
        let mut events = Vec::new();
        let mut current = match self.resume(state, &mut events)? {
            Resumed::Playing(current) => current,
            Resumed::Ended(last) => return Ok((last, events)),
        };
        loop {
            current = self.play_round(current, &mut events)?;
            if events.last().is_some_and(Event::is_game_finish) {
                break;
            }
            let (next, finished) = self.advance_to_decision(current, &mut events)?;
            current = next;
            if finished {
                break;
            }
        }
        tracing::info!(
            rounds = current.round_count,
            stacks = ?current.seats.iter().map(|s| s.stack).collect::<Vec<_>>(),
            "match finished"
        );
        Ok((current, events))
    }

    pub fn create_event(message: &Message) -> Option<Event> {
        create_event(message)
    }

    /// Makes sure a round is being played, dealing new rounds as needed.
    /// Fails without a game rule even when the snapshot carries one.
    ///
    /// Rounds that resolve without a decision may end the match while
    /// dealing; asking to continue a match that had already ended is an
    /// error.
    fn resume(&self, state: &GameState, events: &mut Vec<Event>) -> Result<Resumed, EngineError> {
        self.rule()?;
        if state.street != Street::Finished {
            return Ok(Resumed::Playing(state.clone()));
        }
        let (next, finished) = self.advance_to_decision(state.clone(), events)?;
        if !finished {
            return Ok(Resumed::Playing(next));
        }
        if events.iter().any(Event::is_round_finish) {
            return Ok(Resumed::Ended(next));
        }
        Err(EngineError::GameFinished)
    }

    /// Deals rounds until a seat must act. Returns `true` with a trailing
    /// `GameFinish` event when the match ends first.
    fn advance_to_decision(
        &self,
        mut state: GameState,
        events: &mut Vec<Event>,
    ) -> Result<(GameState, bool), EngineError> {
        loop {
            if state.street != Street::Finished {
                return Ok((state, false));
            }
            let (next, new_events) = self.start_new_round(&state)?;
            let finished = new_events.last().is_some_and(Event::is_game_finish);
            events.extend(new_events);
            state = next;
            if finished {
                return Ok((state, true));
            }
        }
    }

    fn play_round(
        &mut self,
        mut state: GameState,
        events: &mut Vec<Event>,
    ) -> Result<GameState, EngineError> {
        let rule = self.rule()?.clone();
        while state.street != Street::Finished {
            let pos = state.next_player.ok_or(EngineError::NoPlayerToAct)?;
            let seat = &state.seats[pos];
            let valid_actions = legal_actions(&state, pos);
            let round_state = RoundState::from_state(&state);
            let agent = self
                .players
                .get_mut(&seat.uuid)
                .ok_or_else(|| EngineError::UnknownPlayer(seat.uuid.clone()))?;
            let (action, amount) = agent.declare_action(&valid_actions, &seat.hole_card, &round_state);
            let (next, messages) = apply_action(&state, action, amount, self.ranker.as_ref())?;
            events.extend(create_events(&messages));
            state = next;
        }
        if is_last_round(&state, &rule) {
            events.extend(create_event(&game_result(&state, &rule)));
        }
        Ok(state)
    }
}

/// True once the last round was played or at most one seat has chips.
///
/// Only meaningful between rounds: mid-round an all-in seat has an empty
/// stack too.
pub fn is_last_round(state: &GameState, rule: &GameRule) -> bool {
    let busted = state.seats.iter().filter(|s| s.stack == 0).count();
    (state.street == Street::Finished && state.round_count >= rule.max_round)
        || busted + 1 >= rule.player_num
}

enum Resumed {
    Playing(GameState),
    Ended(GameState),
}

fn game_result(state: &GameState, rule: &GameRule) -> Message {
    tracing::info!(round = state.round_count, "game finished");
    Message::GameResult {
        rule: rule.clone(),
        seats: state.seats.iter().map(SeatView::from).collect(),
    }
}

/// Resets the seats, moves the button and posts the forced bets of the next
/// round. Returns the big blind position, or `None` when fewer than two
/// seats can take a blind.
fn deal_round(
    state: &GameState,
    rule: &GameRule,
) -> Result<Option<(GameState, usize)>, EngineError> {
    let mut next = state.clone();
    next.rule = rule.clone();
    for seat in &mut next.seats {
        seat.reset_for_round();
    }
    next.history.clear();
    next.community_card.clear();
    next.next_player = None;
    next.betting = Betting::default();

    let n = next.seats.len();
    let Some(button) = (1..=n)
        .map(|offset| (state.dealer_btn + offset) % n)
        .find(|&i| next.seats[i].stack > 0)
    else {
        return Ok(None);
    };
    next.dealer_btn = button;

    let order: Vec<usize> = next.order_from_button().collect();
    let required = rule.ante + rule.small_blind_amount;
    let mut blinds = Vec::with_capacity(2);
    for &i in &order {
        if blinds.len() == 2 {
            break;
        }
        let seat = &mut next.seats[i];
        if !seat.is_active() {
            continue;
        }
        if seat.stack >= required {
            blinds.push(i);
        } else {
            tracing::debug!(uuid = %seat.uuid, stack = seat.stack, "seat sits out, cannot cover blind");
            seat.pay_info.update_to_fold();
        }
    }
    let &[mut small_blind_pos, mut big_blind_pos] = blinds.as_slice() else {
        return Ok(None);
    };
    // heads-up: the button posts the small blind and acts first preflop
    let dealt_in = next.seats.iter().filter(|s| s.is_active()).count();
    if dealt_in == 2 && big_blind_pos == button {
        std::mem::swap(&mut small_blind_pos, &mut big_blind_pos);
    }

    next.round_count += 1;
    next.street = Street::Preflop;
    for seat in &mut next.seats {
        seat.open_street(Street::Preflop);
    }

    next.deck.shuffle();
    let dealt: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&i| next.seats[i].is_active())
        .collect();
    for _ in 0..2 {
        for &i in &dealt {
            let card = next.deck.draw()?;
            next.seats[i].hole_card.push(card);
        }
    }

    if rule.ante > 0 {
        for &i in &dealt {
            let ante = rule.ante.min(next.seats[i].stack);
            if ante > 0 {
                next.seats[i].pay(ante)?;
                next.log(i, ActionRecord::Ante { amount: ante });
            }
        }
    }

    let sb = rule.small_blind_amount;
    next.seats[small_blind_pos].pay(sb)?;
    next.log(
        small_blind_pos,
        ActionRecord::SmallBlind {
            amount: sb,
            add_amount: sb,
        },
    );
    let bb = rule.big_blind_amount().min(next.seats[big_blind_pos].stack);
    next.seats[big_blind_pos].pay(bb)?;
    next.log(
        big_blind_pos,
        ActionRecord::BigBlind {
            amount: bb,
            add_amount: bb.saturating_sub(sb),
        },
    );

    tracing::debug!(
        round = next.round_count,
        dealer = button,
        small_blind = %next.seats[small_blind_pos].uuid,
        big_blind = %next.seats[big_blind_pos].uuid,
        "round started"
    );
    Ok(Some((next, big_blind_pos)))
}
