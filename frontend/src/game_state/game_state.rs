use std::rc::Rc;

use common::solver::{SolveResult, find_move_sequence};
use common::{Board, DEFAULT_NR_DISKS, Move, Peg};
use yew::Reducible;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameAction {
    ClickPeg { peg: Peg },
    DragMove { src: Peg, dst: Peg },
    Reset,
    Undo,
    Redo,
    ToggleSolve,
    ReplayTick { epoch: u32 },
}

/// An auto-solve replay in progress: the solver's move list and how far
/// into it we are.
#[derive(Debug, Clone, PartialEq)]
struct Replay {
    moves: Vec<Move>,
    next: usize,
}

/// Game state as seen from the user interface. All interaction goes through
/// [GameAction]s sent to Yew's
/// [`use_reducer`](https://docs.rs/yew/0.21.0/yew/functional/fn.use_reducer.html).
///
/// While a replay is active the player input paths (click, drag, undo,
/// redo) are inert, so only one actor ever mutates the board at a time.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    selection: Option<Peg>,
    history: Vec<Move>,
    redo: Vec<Move>,
    replay: Option<Replay>,
    /// Bumped whenever a replay starts or the game resets. Ticks carry the
    /// epoch they were scheduled under; a tick from an older epoch is
    /// ignored, which keeps timers that were already in flight during a
    /// cancel from acting on the new game.
    epoch: u32,
    solve_failed: bool,
}

impl GameState {
    pub fn new() -> GameState {
        Self::with_disks(DEFAULT_NR_DISKS)
    }

    pub fn with_disks(nr_disks: u8) -> GameState {
        Self {
            board: Board::new(nr_disks),
            selection: None,
            history: vec![],
            redo: vec![],
            replay: None,
            epoch: 0,
            solve_failed: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selection(&self) -> Option<Peg> {
        self.selection
    }

    pub fn is_solving(&self) -> bool {
        self.replay.is_some()
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    /// Index of the next replay move to apply, while a replay is active.
    /// Changes on every applied move, which is what schedules the next tick.
    pub fn replay_progress(&self) -> Option<usize> {
        self.replay.as_ref().map(|r| r.next)
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty() && !self.is_solving()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty() && !self.is_solving()
    }

    pub fn solve_failed(&self) -> bool {
        self.solve_failed
    }

    /// Apply a player move. Illegal attempts are logged and ignored, the
    /// click selection is dropped either way.
    fn player_move(&mut self, src: Peg, dst: Peg) {
        self.selection = None;
        if self.board.attempt_move(src, dst) {
            self.history.push(Move { src, dst });
            self.redo.clear();
            self.solve_failed = false;
        } else {
            log::info!("illegal move {src} -> {dst}, ignoring");
        }
    }
}

impl Reducible for GameState {
    type Action = GameAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        log::debug!("reducing with action {action:?}");

        match action {
            GameAction::ClickPeg { peg } => {
                if self.is_solving() {
                    return self;
                }

                match self.selection {
                    None => {
                        // nothing selected yet, pick up the top disk
                        if self.board.is_empty(peg) {
                            return self;
                        }
                        let mut state = (*self).clone();
                        state.selection = Some(peg);
                        state.into()
                    }
                    Some(selected) if selected == peg => {
                        // same peg clicked again, put the disk back down
                        let mut state = (*self).clone();
                        state.selection = None;
                        state.into()
                    }
                    Some(selected) => {
                        let mut state = (*self).clone();
                        state.player_move(selected, peg);
                        state.into()
                    }
                }
            }
            GameAction::DragMove { src, dst } => {
                if self.is_solving() || src == dst {
                    return self;
                }
                let mut state = (*self).clone();
                state.player_move(src, dst);
                state.into()
            }
            GameAction::Undo => {
                if !self.can_undo() {
                    return self;
                }

                let mut state = (*self).clone();
                let mv = state.history.pop().unwrap();
                let undone = state.board.undo_move(mv);
                debug_assert!(undone, "history moves must stay reversible");
                state.redo.push(mv);
                state.selection = None;
                state.into()
            }
            GameAction::Redo => {
                if !self.can_redo() {
                    return self;
                }

                let mut state = (*self).clone();
                let mv = state.redo.pop().unwrap();
                let applied = state.board.attempt_move(mv.src, mv.dst);
                debug_assert!(applied, "redo moves must stay applicable");
                state.history.push(mv);
                state.selection = None;
                state.into()
            }
            GameAction::Reset => {
                // also cancels a running replay; in-flight timers end up in
                // a stale epoch
                let mut state = GameState::with_disks(self.board.nr_disks());
                state.epoch = self.epoch + 1;
                state.into()
            }
            GameAction::ToggleSolve => {
                let mut state = (*self).clone();

                if state.replay.take().is_some() {
                    // stop was requested; applied moves stay applied
                    return state.into();
                }
                if state.board.is_solved() {
                    return self;
                }

                log::info!("running solver from the current configuration");
                match find_move_sequence(&state.board) {
                    SolveResult::Solved(moves) => {
                        state.replay = Some(Replay { moves, next: 0 });
                        state.epoch += 1;
                        state.selection = None;
                        state.solve_failed = false;
                    }
                    SolveResult::Unsolvable => {
                        log::warn!("no solution found from the current configuration");
                        state.solve_failed = true;
                    }
                }
                state.into()
            }
            GameAction::ReplayTick { epoch } => {
                if epoch != self.epoch || self.replay.is_none() {
                    // stale timer, or the replay was cancelled in between
                    return self;
                }

                let mut state = (*self).clone();
                let Some(mut replay) = state.replay.take() else {
                    return self;
                };
                let mv = replay.moves[replay.next];

                if !state.board.attempt_move(mv.src, mv.dst) {
                    log::warn!("replay move {mv} no longer applies, aborting");
                    return state.into();
                }
                replay.next += 1;

                state.history.push(mv);
                state.redo.clear();
                if replay.next < replay.moves.len() && !state.board.is_solved() {
                    state.replay = Some(replay);
                }
                state.into()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn peg(i: u8) -> Peg {
        Peg::new(i).unwrap()
    }

    fn game_state() -> Rc<GameState> {
        Rc::new(GameState::with_disks(3))
    }

    fn click(peg_idx: u8) -> GameAction {
        GameAction::ClickPeg { peg: peg(peg_idx) }
    }

    fn game_state_after_one_move() -> Rc<GameState> {
        game_state().reduce(click(0)).reduce(click(2))
    }

    /// Drive the replay to completion the way the tick effect would.
    fn run_replay(mut gs: Rc<GameState>) -> Rc<GameState> {
        while gs.is_solving() {
            let epoch = gs.epoch();
            gs = gs.reduce(GameAction::ReplayTick { epoch });
        }
        gs
    }

    #[test]
    fn test_select_deselect() {
        let gs = game_state();

        let gs = gs.reduce(click(0));
        assert_eq!(gs.selection(), Some(peg(0)));

        let gs = gs.reduce(click(0));
        assert_eq!(
            gs.selection(),
            None,
            "clicking the same peg again should deselect"
        );
    }

    #[test]
    fn test_cannot_select_empty_peg() {
        let gs = game_state();

        let gs = gs.reduce(click(1));
        assert_eq!(gs.selection(), None);
    }

    #[test]
    fn test_click_move() {
        let gs = game_state_after_one_move();

        assert_eq!(gs.board().top_disk(peg(2)).unwrap().0, 1);
        assert_eq!(gs.board().move_count(), 1);
        assert_eq!(gs.selection(), None);
        assert!(gs.can_undo());
    }

    #[test]
    fn test_illegal_click_move_is_ignored() {
        // disk 1 sits on peg 2; moving disk 2 from peg 0 onto it is illegal
        let gs = game_state_after_one_move();
        let board_before = gs.board().clone();

        let gs = gs.reduce(click(0)).reduce(click(2));

        assert_eq!(gs.board(), &board_before);
        assert_eq!(gs.selection(), None);
    }

    #[test]
    fn test_drag_move() {
        let gs = game_state().reduce(GameAction::DragMove {
            src: peg(0),
            dst: peg(1),
        });

        assert_eq!(gs.board().top_disk(peg(1)).unwrap().0, 1);
        assert_eq!(gs.board().move_count(), 1);
    }

    #[test]
    fn test_undo_redo_roundtrip() {
        let gs = game_state_after_one_move();
        let moved = gs.board().clone();

        let gs = gs.reduce(GameAction::Undo);
        assert_eq!(gs.board(), GameState::with_disks(3).board());
        assert!(!gs.can_undo());
        assert!(gs.can_redo());

        let gs = gs.reduce(GameAction::Redo);
        assert_eq!(gs.board(), &moved);
        assert!(!gs.can_redo());
    }

    #[test]
    fn test_new_move_clears_redo() {
        let gs = game_state_after_one_move().reduce(GameAction::Undo);
        assert!(gs.can_redo());

        let gs = gs.reduce(click(0)).reduce(click(1));
        assert!(!gs.can_redo());
    }

    #[test]
    fn test_undo_resets_selection() {
        let gs = game_state_after_one_move().reduce(click(0));
        assert!(gs.selection().is_some());

        let gs = gs.reduce(GameAction::Undo);
        assert_eq!(gs.selection(), None);
    }

    #[test]
    fn test_reset() {
        let gs = game_state_after_one_move().reduce(click(0));

        let gs = gs.reduce(GameAction::Reset);

        assert_eq!(gs.board(), GameState::with_disks(3).board());
        assert_eq!(gs.selection(), None);
        assert!(!gs.can_undo());
    }

    #[test]
    fn test_toggle_solve_replays_to_the_end() {
        let gs = game_state().reduce(GameAction::ToggleSolve);
        assert!(gs.is_solving());

        let gs = run_replay(gs);

        assert!(gs.board().is_solved());
        assert_eq!(gs.board().move_count(), 7);
    }

    #[test]
    fn test_solve_from_mid_game_continues_from_there() {
        let gs = game_state_after_one_move().reduce(GameAction::ToggleSolve);

        let gs = run_replay(gs);

        assert!(gs.board().is_solved());
        // one player move plus whatever remained from there
        assert!(gs.board().move_count() <= 8);
    }

    #[test]
    fn test_cancel_keeps_partial_progress() {
        let gs = game_state().reduce(GameAction::ToggleSolve);
        let epoch = gs.epoch();

        let gs = gs
            .reduce(GameAction::ReplayTick { epoch })
            .reduce(GameAction::ReplayTick { epoch });
        assert_eq!(gs.board().move_count(), 2);

        let gs = gs.reduce(GameAction::ToggleSolve);
        assert!(!gs.is_solving());
        assert_eq!(
            gs.board().move_count(),
            2,
            "cancel must not rewind applied moves"
        );
    }

    #[test]
    fn test_stale_tick_is_ignored() {
        let gs = game_state().reduce(GameAction::ToggleSolve);
        let stale = gs.epoch() - 1;

        let before = gs.board().clone();
        let gs = gs.reduce(GameAction::ReplayTick { epoch: stale });

        assert_eq!(gs.board(), &before);
        assert!(gs.is_solving());
    }

    #[test]
    fn test_player_input_ignored_while_solving() {
        let gs = game_state().reduce(GameAction::ToggleSolve);
        let before = gs.board().clone();

        let gs = gs
            .reduce(click(0))
            .reduce(GameAction::DragMove {
                src: peg(0),
                dst: peg(1),
            })
            .reduce(GameAction::Undo);

        assert_eq!(gs.board(), &before);
        assert_eq!(gs.selection(), None);
        assert!(gs.is_solving());
    }

    #[test]
    fn test_reset_cancels_replay() {
        let gs = game_state().reduce(GameAction::ToggleSolve);
        let old_epoch = gs.epoch();

        let gs = gs.reduce(GameAction::Reset);

        assert!(!gs.is_solving());
        assert!(gs.epoch() > old_epoch);
        // a timer still in flight from the old replay does nothing
        let gs = gs.reduce(GameAction::ReplayTick { epoch: old_epoch });
        assert_eq!(gs.board(), GameState::with_disks(3).board());
    }

    #[test]
    fn test_toggle_solve_on_solved_board_does_nothing() {
        let gs = run_replay(game_state().reduce(GameAction::ToggleSolve));

        let gs = gs.reduce(GameAction::ToggleSolve);
        assert!(!gs.is_solving());
    }

    #[test]
    fn test_replayed_moves_are_undoable_afterwards() {
        let gs = run_replay(game_state().reduce(GameAction::ToggleSolve));
        assert!(gs.can_undo());

        let gs = gs.reduce(GameAction::Undo);
        assert!(!gs.board().is_solved());
        assert_eq!(gs.board().move_count(), 6);
    }
}
