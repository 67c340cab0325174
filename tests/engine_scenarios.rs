use noughts::{
    Error,
    search::{Minimax, best_action, optimal_actions},
    tictactoe::{Action, Board, Outcome, Player, initial_state},
};

mod common;

use common::board;

#[test]
fn immediate_win_is_taken() {
    let position = board("XX./OO./...");
    let mut minimax = Minimax::new();
    let decision = minimax.search(&position).unwrap();

    assert_eq!(decision.action, Action::new(0, 2));
    assert_eq!(decision.value, 1);

    let after = position.apply(decision.action).unwrap();
    assert!(after.is_terminal());
    assert_eq!(after.utility(), 1);
}

#[test]
fn winning_beats_blocking() {
    let position = board("XX./OO./X..");
    assert_eq!(position.current_player(), Player::O);

    let decision = Minimax::new().search(&position).unwrap();
    // O completes the middle row rather than blocking the top one
    assert_eq!(decision.action, Action::new(1, 2));
    assert_eq!(decision.value, -1);
}

#[test]
fn defender_blocks_the_only_threat() {
    let position = board("XX./.O./...");
    assert_eq!(position.current_player(), Player::O);

    let decision = Minimax::new().search(&position).unwrap();
    assert_eq!(decision.action, Action::new(0, 2));
    assert_eq!(decision.value, 0);
}

#[test]
fn first_winning_line_in_row_major_order_is_chosen() {
    let position = board("XOX/XOO/...");
    assert_eq!(best_action(&position).unwrap(), Action::new(2, 0));
}

#[test]
fn opening_position_is_a_draw() {
    let mut minimax = Minimax::new();
    let decision = minimax.search(&initial_state()).unwrap();

    assert_eq!(decision.value, 0);
    assert!(decision.action.is_corner() || decision.action.is_center());
    assert_eq!(decision.action, Action::new(0, 0));
    assert!(minimax.stats().nodes > 1_000);
}

#[test]
fn every_opening_move_draws() {
    let mut minimax = Minimax::new();
    let ranked = minimax.ranked_actions(&initial_state()).unwrap();
    assert_eq!(ranked.len(), 9);
    assert!(ranked.iter().all(|&(_, value)| value == 0));
}

#[test]
fn only_the_centre_answers_a_corner_opening() {
    let position = board("X........");
    assert_eq!(optimal_actions(&position).unwrap(), vec![Action::new(1, 1)]);
}

#[test]
fn self_play_from_the_start_is_a_draw() {
    let mut minimax = Minimax::new();
    let mut position = initial_state();
    let mut plies = 0;

    while !position.is_terminal() {
        let action = minimax.best_action(&position).unwrap();
        position = position.apply(action).unwrap();
        plies += 1;
    }

    assert_eq!(plies, 9);
    assert_eq!(position.outcome(), Outcome::Draw);
    assert_eq!(position.utility(), 0);
}

#[test]
fn finished_positions_have_no_best_action() {
    for finished in ["XXX/OO./...", "XOX/XOO/OXX", "OOO/XX./X.."] {
        assert!(matches!(
            best_action(&board(finished)),
            Err(Error::TerminalBoard)
        ));
    }
}

#[test]
fn search_does_not_touch_its_input() {
    let position: Board = "X.O/.X./...".parse().unwrap();
    let copy = position;
    let _ = best_action(&position).unwrap();
    assert_eq!(position, copy);
}
