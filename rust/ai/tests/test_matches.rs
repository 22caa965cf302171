use std::collections::HashMap;

use pokeremu_ai::{create_agent, AGENT_KINDS};
use pokeremu_ai::{BaselineAgent, CallMan, FoldMan, RandomAgent};
use pokeremu_engine::emulator::{Agent, Emulator, PlayerInfo};
use pokeremu_engine::events::Event;
use pokeremu_engine::game::GameState;
use pokeremu_engine::round_state::RoundState;
use pokeremu_engine::rules::legal_actions;

fn table(emulator: &Emulator, uuids: &[&str], stack: u32) -> GameState {
    let players: Vec<PlayerInfo> = uuids
        .iter()
        .map(|uuid| PlayerInfo::new(*uuid, *uuid, stack))
        .collect();
    emulator.generate_initial_game_state(&players).unwrap()
}

fn mixed_match(seed: u64) -> (GameState, Vec<Event>) {
    let mut emulator = Emulator::new().with_seed(seed);
    emulator.set_game_rule(4, 20, 5, 1).unwrap();
    for (i, kind) in AGENT_KINDS.iter().enumerate() {
        let agent = create_agent(kind, seed + i as u64).unwrap();
        emulator.register_boxed_player(*kind, agent);
    }
    let state = table(&emulator, &AGENT_KINDS, 200);
    emulator.run_until_game_finish(&state).unwrap()
}

#[test]
fn mixed_table_conserves_chips() {
    let (state, events) = mixed_match(17);
    assert_eq!(state.seats.iter().map(|s| s.stack).sum::<u32>(), 800);
    assert!(events.last().is_some_and(|e| e.is_game_finish()));
    assert_eq!(events.iter().filter(|e| e.is_game_finish()).count(), 1);
}

#[test]
fn every_step_conserves_chips_and_closes_streets_level() {
    let uuids = ["r0", "r1", "r2", "r3"];
    let mut emulator = Emulator::new().with_seed(21);
    emulator.set_game_rule(4, 15, 5, 1).unwrap();
    let mut agents: HashMap<&str, RandomAgent> = uuids
        .iter()
        .enumerate()
        .map(|(i, uuid)| (*uuid, RandomAgent::new(100 + i as u64)))
        .collect();
    let initial = 4 * 150;

    let state = table(&emulator, &uuids, 150);
    let (mut state, mut events) = emulator.start_new_round(&state).unwrap();
    let mut steps = 0;
    while !events.last().is_some_and(|e| e.is_game_finish()) {
        assert_eq!(state.total_chips(), initial);
        let pos = state.next_player.expect("a seat to act");
        let seat = &state.seats[pos];
        let agent = agents.get_mut(seat.uuid.as_str()).unwrap();
        let (action, amount) = agent.declare_action(
            &legal_actions(&state, pos),
            &seat.hole_card,
            &RoundState::from_state(&state),
        );

        let (next, more) = emulator.run_until_next_event(&state, action, amount).unwrap();
        assert_eq!(next.total_chips(), initial, "step {steps}: {action:?} {amount}");
        if next.round_count == state.round_count && next.street != state.street {
            // every seat still betting matched the closed street's top wager
            let closed = state.street;
            let top = next.seats.iter().map(|s| s.street_wager(closed)).max().unwrap_or(0);
            for s in next.seats.iter().filter(|s| s.is_waiting_ask()) {
                assert_eq!(s.street_wager(closed), top, "{} left {closed:?} short", s.uuid);
            }
        }
        state = next;
        events = more;
        steps += 1;
    }
    assert!(steps > 0);
    assert_eq!(state.total_chips(), initial);
}

#[test]
fn same_seed_replays_the_same_match() {
    let (a, events_a) = mixed_match(5);
    let (b, events_b) = mixed_match(5);
    assert_eq!(events_a, events_b);
    let stacks = |s: &GameState| s.seats.iter().map(|seat| seat.stack).collect::<Vec<_>>();
    assert_eq!(stacks(&a), stacks(&b));
}

#[test]
fn folder_loses_blinds_to_caller() {
    let mut emulator = Emulator::new().with_seed(1);
    emulator.set_game_rule(2, 4, 5, 0).unwrap();
    emulator.register_player("folder", FoldMan);
    emulator.register_player("caller", CallMan);
    let state = table(&emulator, &["folder", "caller"], 100);

    let (state, events) = emulator.run_until_game_finish(&state).unwrap();
    let rounds = events.iter().filter(|e| e.is_round_finish()).count();
    assert_eq!(rounds, 4);
    // folder posts the small blind twice and folds the big blind twice
    assert!(state.seats[0].stack < 100);
    assert_eq!(state.seats[0].stack + state.seats[1].stack, 200);
}

#[test]
fn baseline_against_random_finishes() {
    let mut emulator = Emulator::new().with_seed(33);
    emulator.set_game_rule(3, 30, 10, 0).unwrap();
    emulator.register_player("base", BaselineAgent::new());
    emulator.register_player("r1", RandomAgent::new(1));
    emulator.register_player("r2", RandomAgent::new(2));
    let state = table(&emulator, &["base", "r1", "r2"], 300);

    let (state, events) = emulator.run_until_game_finish(&state).unwrap();
    assert_eq!(state.seats.iter().map(|s| s.stack).sum::<u32>(), 900);
    assert!(events.last().is_some_and(|e| e.is_game_finish()));
}

#[test]
fn unknown_kind_builds_nothing() {
    assert!(create_agent("shark", 0).is_none());
}
