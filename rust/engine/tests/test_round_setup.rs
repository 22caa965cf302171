mod common;

use common::*;
use pokeremu_engine::events::Event;
use pokeremu_engine::game::Street;
use pokeremu_engine::player::{Action, ActionRecord, PayStatus};

#[test]
fn first_round_posts_blinds_after_the_button() {
    let emu = emulator(3, 10, 5, 0);
    let state = initial_state(&emu, &[100, 100, 100]);
    let (state, events) = emu.start_new_round(&state).unwrap();

    assert_eq!(state.round_count, 1);
    assert_eq!(state.street, Street::Preflop);
    assert_eq!(state.dealer_btn, 1);
    assert_eq!(
        state.seats[2].street_history(Street::Preflop),
        &[ActionRecord::SmallBlind {
            amount: 5,
            add_amount: 5
        }]
    );
    assert_eq!(
        state.seats[0].street_history(Street::Preflop),
        &[ActionRecord::BigBlind {
            amount: 10,
            add_amount: 5
        }]
    );
    assert_eq!(state.next_player, Some(1));
    assert!(state.seats.iter().all(|s| s.hole_card.len() == 2));
    assert_eq!(state.deck.remaining(), 52 - 6);
    assert!(matches!(
        events.as_slice(),
        [Event::NewStreet { street: Street::Preflop, .. }, Event::AskPlayer { uuid, .. }] if uuid == "p1"
    ));
}

#[test]
fn button_moves_one_seat_per_round() {
    let emu = emulator(3, 10, 5, 0);
    let state = initial_state(&emu, &[100, 100, 100]);
    let (state, _) = emu.start_new_round(&state).unwrap();
    let (state, _) = emu.run_until_next_event(&state, Action::Fold, 0).unwrap();
    let (state, _) = emu.run_until_next_event(&state, Action::Fold, 0).unwrap();
    assert_eq!(state.round_count, 2);
    assert_eq!(state.dealer_btn, 2);
}

#[test]
fn antes_are_posted_before_blinds() {
    let emu = emulator(3, 10, 5, 2);
    let state = initial_state(&emu, &[100, 100, 100]);
    let (state, _) = emu.start_new_round(&state).unwrap();

    assert_eq!(
        state.seats[2].street_history(Street::Preflop),
        &[
            ActionRecord::Ante { amount: 2 },
            ActionRecord::SmallBlind {
                amount: 5,
                add_amount: 5
            }
        ]
    );
    assert_eq!(state.seats[1].street_history(Street::Preflop), &[ActionRecord::Ante { amount: 2 }]);
    assert_eq!(state.pot_total(), 6 + 5 + 10);
    // antes do not count toward the wager level
    assert_eq!(state.max_wager(), 10);
}

#[test]
fn partial_ante_puts_a_seat_all_in() {
    let emu = emulator(3, 10, 5, 4);
    let state = initial_state(&emu, &[100, 3, 100]);
    let (state, _) = emu.start_new_round(&state).unwrap();
    // seat 2 small blind, seat 0 big blind, seat 1 only covers part of the ante
    assert_eq!(state.seats[1].street_history(Street::Preflop), &[ActionRecord::Ante { amount: 3 }]);
    assert_eq!(state.seats[1].status(), PayStatus::AllIn);
    assert_eq!(state.seats[1].stack, 0);
}

#[test]
fn seat_that_cannot_cover_the_small_blind_sits_out() {
    let emu = emulator(3, 10, 5, 0);
    let state = initial_state(&emu, &[100, 100, 4]);
    let (state, _) = emu.start_new_round(&state).unwrap();
    // seat 2 would be small blind but holds 4 chips, leaving two seats dealt
    // in: the button takes the small blind and acts first
    assert_eq!(state.seats[2].status(), PayStatus::Folded);
    assert_eq!(state.seats[2].stack, 4);
    assert!(state.seats[2].hole_card.is_empty());
    assert_eq!(state.dealer_btn, 1);
    assert_eq!(
        state.seats[1].street_history(Street::Preflop),
        &[ActionRecord::SmallBlind {
            amount: 5,
            add_amount: 5
        }]
    );
    assert_eq!(
        state.seats[0].street_history(Street::Preflop),
        &[ActionRecord::BigBlind {
            amount: 10,
            add_amount: 5
        }]
    );
    assert_eq!(state.next_player, Some(1));
    assert_eq!(state.total_chips(), 204);
}

#[test]
fn short_big_blind_posts_what_it_has() {
    let emu = emulator(2, 10, 5, 0);
    let state = initial_state(&emu, &[7, 100]);
    let (state, events) = emu.start_new_round(&state).unwrap();
    assert_eq!(
        state.seats[0].street_history(Street::Preflop),
        &[ActionRecord::BigBlind {
            amount: 7,
            add_amount: 2
        }]
    );
    assert_eq!(state.seats[0].status(), PayStatus::AllIn);
    // the button posted the small blind and still owes 2
    assert!(matches!(events.last(), Some(Event::AskPlayer { uuid, .. }) if uuid == "p1"));
    assert_eq!(call_amount(&pokeremu_engine::rules::legal_actions(&state, 1)), 7);
}

#[test]
fn heads_up_button_posts_the_small_blind() {
    let emu = emulator(2, 10, 5, 0);
    let state = initial_state(&emu, &[100, 100]);
    let (state, events) = emu.start_new_round(&state).unwrap();
    assert_eq!(state.dealer_btn, 1);
    assert_eq!(state.seats[1].street_history(Street::Preflop)[0].wager(), 5);
    assert_eq!(state.seats[0].street_history(Street::Preflop)[0].wager(), 10);
    assert!(matches!(events.last(), Some(Event::AskPlayer { uuid, .. }) if uuid == "p1"));

    // after the flop the big blind acts first
    let (state, _) = emu.run_until_next_event(&state, Action::Call, 10).unwrap();
    let (state, events) = emu.run_until_next_event(&state, Action::Call, 10).unwrap();
    assert_eq!(state.street, Street::Flop);
    assert!(matches!(events.last(), Some(Event::AskPlayer { uuid, .. }) if uuid == "p0"));
}

#[test]
fn busted_seats_are_skipped_for_button_and_blinds() {
    let emu = emulator(4, 10, 5, 0);
    let state = initial_state(&emu, &[100, 0, 100, 100]);
    let (state, _) = emu.start_new_round(&state).unwrap();
    assert_eq!(state.dealer_btn, 2);
    assert_eq!(state.seats[1].status(), PayStatus::Folded);
    assert_eq!(state.seats[3].street_history(Street::Preflop)[0].wager(), 5);
    assert_eq!(state.seats[0].street_history(Street::Preflop)[0].wager(), 10);
    assert_eq!(state.next_player, Some(2));
}

#[test]
fn blinds_all_in_run_straight_to_showdown() {
    let emu = emulator(2, 10, 5, 0);
    let state = initial_state(&emu, &[5, 10]);
    let (state, events) = emu.start_new_round(&state).unwrap();
    assert_eq!(state.street, Street::Finished);
    assert_eq!(state.community_card.len(), 5);
    assert!(matches!(
        events.as_slice(),
        [Event::NewStreet { .. }, Event::RoundFinish { .. }, ..]
    ));
    assert_eq!(state.total_chips(), 15);
}

#[test]
fn too_few_seats_for_blinds_finishes_the_game() {
    let emu = emulator(3, 10, 5, 0);
    let state = initial_state(&emu, &[100, 3, 4]);
    let (state, events) = emu.start_new_round(&state).unwrap();
    assert_eq!(state.round_count, 0);
    assert!(matches!(events.as_slice(), [Event::GameFinish { .. }]));
}
