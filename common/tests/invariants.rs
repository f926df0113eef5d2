use common::solver::{SolveResult, find_move_sequence};
use common::{Board, Peg};

use proptest::prelude::*;

fn peg(i: u8) -> Peg {
    Peg::new(i).unwrap()
}

/// Check the two board invariants from the outside, using only read
/// accessors: strictly shrinking disk sizes towards the top of every peg,
/// and the disks across all pegs being exactly {1..=nr_disks}.
fn assert_board_valid(board: &Board) {
    let mut seen = vec![false; board.nr_disks() as usize + 1];

    for p in Peg::all() {
        let mut prev: Option<u8> = None;
        for disk in board.disks_on(p) {
            assert!((1..=board.nr_disks()).contains(&disk.0));
            if let Some(below) = prev {
                assert!(disk.0 < below, "peg {p} is not ordered");
            }
            assert!(!seen[disk.0 as usize], "disk {disk} appears twice");
            seen[disk.0 as usize] = true;
            prev = Some(disk.0);
        }
    }

    assert!(
        seen[1..].iter().all(|&s| s),
        "some disk went missing from the board"
    );
}

proptest! {
    /// Any sequence of move attempts, legal or not, keeps the board valid,
    /// and the configuration it ends up in is solvable by the search.
    #[test]
    fn random_play_stays_valid_and_solvable(
        attempts in proptest::collection::vec((0u8..3, 0u8..3), 0..120),
    ) {
        let mut board = Board::new(5);

        for (src, dst) in attempts {
            board.attempt_move(peg(src), peg(dst));
            assert_board_valid(&board);
        }

        let SolveResult::Solved(moves) = find_move_sequence(&board) else {
            panic!("every reachable configuration is solvable");
        };
        // the graph diameter bounds any shortest solution
        prop_assert!(moves.len() <= (1 << 5) - 1);

        for mv in moves {
            prop_assert!(board.attempt_move(mv.src, mv.dst));
            assert_board_valid(&board);
        }
        prop_assert!(board.is_solved());
    }

    /// A failed attempt is a strict no-op, bit for bit, move counter
    /// included.
    #[test]
    fn failed_attempts_never_mutate(
        setup in proptest::collection::vec((0u8..3, 0u8..3), 0..60),
        src in 0u8..3,
        dst in 0u8..3,
    ) {
        let mut board = Board::new(4);
        for (s, d) in setup {
            board.attempt_move(peg(s), peg(d));
        }

        let before = board.clone();
        if !board.attempt_move(peg(src), peg(dst)) {
            prop_assert_eq!(&board, &before);
            // idempotence of failure
            prop_assert!(!board.attempt_move(peg(src), peg(dst)));
            prop_assert_eq!(&board, &before);
        }
    }
}

#[test]
fn random_walk_then_solve_with_rand() {
    use rand::Rng;

    let mut rng = rand::rng();
    for _ in 0..20 {
        let mut board = Board::new(6);
        for _ in 0..200 {
            let src = peg(rng.random_range(0..3));
            let dst = peg(rng.random_range(0..3));
            board.attempt_move(src, dst);
        }
        assert_board_valid(&board);

        let SolveResult::Solved(moves) = find_move_sequence(&board) else {
            panic!("random walk left the board unsolvable?");
        };
        for mv in moves {
            assert!(board.attempt_move(mv.src, mv.dst));
        }
        assert!(board.is_solved());
    }
}
