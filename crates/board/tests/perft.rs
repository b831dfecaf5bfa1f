//! Perft (move-path enumeration) for validating move generation.
//!
//! Counts leaf nodes at a given depth from the initial position. The counts
//! exercise the forced sub-board rule: after the first move the opponent
//! has 9 replies, or 8 when sent back into the sub-board just played in.

use uttt_board::Position;

/// Count all leaf nodes at a given depth
fn perft(pos: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = pos.legal_moves();

    if depth == 1 {
        return moves.len() as u64;
    }

    let mut nodes = 0;
    for mv in moves {
        let next = pos.with_move(mv).expect("legal move must play");
        nodes += perft(&next, depth - 1);
    }
    nodes
}

#[test]
fn test_perft_initial_depth_1() {
    assert_eq!(perft(&Position::initial(), 1), 81);
}

#[test]
fn test_perft_initial_depth_2() {
    assert_eq!(perft(&Position::initial(), 2), 720);
}

#[test]
fn test_perft_initial_depth_3() {
    assert_eq!(perft(&Position::initial(), 3), 6336);
}

#[test]
fn test_perft_initial_depth_4() {
    assert_eq!(perft(&Position::initial(), 4), 55080);
}

#[test]
fn test_perft_after_center() {
    // X in the very center forces O into the center sub-board
    let mut pos = Position::initial();
    pos.play_at(4, 4).unwrap();
    assert_eq!(perft(&pos, 1), 8);
    // each reply (local k != 4) sends X to an empty sub-board
    assert_eq!(perft(&pos, 2), 8 * 9);
}
