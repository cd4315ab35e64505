use super::board::{Board, Cell, COLS};
use super::player::Player;

/// Where the game stands. `Won` and `Draw` are terminal: no further moves
/// are accepted until [`GameEngine::new_game`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Playing,
    Draw,
    Won(Player),
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        self != GameState::Playing
    }
}

/// A rejected move. Every variant leaves board, turn, and state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    /// Column index outside the board; a caller bug.
    #[error("column {column} does not exist")]
    InvalidColumn { column: usize },
    /// The chosen column has no empty cell; pick another one.
    #[error("column {column} is full")]
    ColumnFull { column: usize },
    /// The game already ended; start a new game first.
    #[error("the game is over")]
    GameOver,
}

/// Outcome of an accepted move: where the marker landed and the state the
/// game is in afterwards, so the caller can render without rescanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveResult {
    pub row: usize,
    pub state: GameState,
}

/// Sole authority over the board, the turn order, and win/draw detection.
///
/// Strictly serial: every call completes synchronously, and a rejected move
/// is a no-op. External code reads the board through [`GameEngine::board`]
/// or [`GameEngine::cell`] and never mutates it directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameEngine {
    board: Board,
    turn: Player,
    state: GameState,
}

impl GameEngine {
    /// A fresh engine, ready for Red's first move.
    pub fn new() -> Self {
        GameEngine {
            board: Board::new(),
            turn: Player::Red,
            state: GameState::Playing,
        }
    }

    /// Reset the board, the turn, and the state together. Always succeeds,
    /// from any state.
    pub fn new_game(&mut self) {
        *self = GameEngine::new();
    }

    /// Drop the current player's marker into `column`.
    ///
    /// The marker lands in the lowest empty row. A move that completes a run
    /// of four or more through its landing cell wins; a move that fills the
    /// last empty cell without winning draws. The turn passes to the other
    /// player only when the game stays in progress.
    pub fn apply_move(&mut self, column: usize) -> Result<MoveResult, MoveError> {
        if self.state.is_terminal() {
            return Err(MoveError::GameOver);
        }
        if column >= COLS {
            return Err(MoveError::InvalidColumn { column });
        }
        let row = self
            .board
            .landing_row(column)
            .ok_or(MoveError::ColumnFull { column })?;

        self.board.place(row, column, self.turn.cell());

        if self.board.completes_four(row, column) {
            self.state = GameState::Won(self.turn);
        } else if self.board.is_full() {
            self.state = GameState::Draw;
        } else {
            self.turn = self.turn.other();
        }

        Ok(MoveResult {
            row,
            state: self.state,
        })
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// The player who moves next. Once the game is over this freezes on the
    /// player who made the final move.
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Read-only view of the grid, for rendering.
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.board.get(row, col)
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }
}

impl Default for GameEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::ROWS;

    /// A 42-move filling sequence that never produces four in a row: columns
    /// are paired (0/2, 1/3, 4/6) so every line on the finished board holds
    /// runs of at most two, then column 5 fills last.
    const DRAWN_GAME: [usize; 42] = [
        0, 2, 2, 0, 0, 2, 2, 0, 0, 2, 2, 0, //
        1, 3, 3, 1, 1, 3, 3, 1, 1, 3, 3, 1, //
        4, 6, 6, 4, 4, 6, 6, 4, 4, 6, 6, 4, //
        5, 5, 5, 5, 5, 5,
    ];

    #[test]
    fn starts_empty_with_red_to_move() {
        let engine = GameEngine::new();
        assert_eq!(engine.state(), GameState::Playing);
        assert_eq!(engine.turn(), Player::Red);
        for row in 0..ROWS {
            for col in 0..COLS {
                assert_eq!(engine.cell(row, col), Cell::Empty);
            }
        }
    }

    #[test]
    fn moves_land_in_the_lowest_empty_row() {
        let mut engine = GameEngine::new();
        let first = engine.apply_move(4).unwrap();
        assert_eq!(first.row, 5);
        assert_eq!(engine.cell(5, 4), Cell::Red);

        let second = engine.apply_move(4).unwrap();
        assert_eq!(second.row, 4);
        assert_eq!(engine.cell(4, 4), Cell::Yellow);
    }

    #[test]
    fn turn_alternates_while_playing() {
        let mut engine = GameEngine::new();
        assert_eq!(engine.turn(), Player::Red);
        engine.apply_move(0).unwrap();
        assert_eq!(engine.turn(), Player::Yellow);
        engine.apply_move(1).unwrap();
        assert_eq!(engine.turn(), Player::Red);
    }

    #[test]
    fn out_of_range_column_is_rejected_without_mutation() {
        let mut engine = GameEngine::new();
        let before = engine;
        assert_eq!(
            engine.apply_move(COLS),
            Err(MoveError::InvalidColumn { column: COLS })
        );
        assert_eq!(engine, before);
    }

    #[test]
    fn full_column_is_rejected_without_mutation() {
        let mut engine = GameEngine::new();
        for _ in 0..3 {
            engine.apply_move(2).unwrap();
            engine.apply_move(2).unwrap();
        }
        let before = engine;
        assert_eq!(engine.apply_move(2), Err(MoveError::ColumnFull { column: 2 }));
        assert_eq!(engine, before);
        assert_eq!(engine.turn(), before.turn());
    }

    #[test]
    fn stacking_one_column_wins_vertically() {
        let mut engine = GameEngine::new();
        // Red on column 0, yellow answering on column 1.
        for _ in 0..3 {
            engine.apply_move(0).unwrap();
            engine.apply_move(1).unwrap();
        }
        let result = engine.apply_move(0).unwrap();

        assert_eq!(result.row, 2);
        assert_eq!(result.state, GameState::Won(Player::Red));
        assert_eq!(engine.state(), GameState::Won(Player::Red));
        // The winner stays on turn; it is moot but must not flip.
        assert_eq!(engine.turn(), Player::Red);
    }

    #[test]
    fn moves_after_a_win_are_rejected() {
        let mut engine = GameEngine::new();
        for _ in 0..3 {
            engine.apply_move(0).unwrap();
            engine.apply_move(1).unwrap();
        }
        engine.apply_move(0).unwrap();

        let before = engine;
        assert_eq!(engine.apply_move(3), Err(MoveError::GameOver));
        assert_eq!(engine, before);
    }

    #[test]
    fn filling_the_board_without_a_run_draws_on_the_last_move() {
        let mut engine = GameEngine::new();
        for (i, &col) in DRAWN_GAME.iter().enumerate() {
            let result = engine.apply_move(col).unwrap();
            if i < DRAWN_GAME.len() - 1 {
                assert_eq!(result.state, GameState::Playing, "move {i} ended the game");
            } else {
                assert_eq!(result.state, GameState::Draw);
            }
        }
        assert_eq!(engine.state(), GameState::Draw);
        assert_eq!(engine.apply_move(0), Err(MoveError::GameOver));
    }

    #[test]
    fn diagonal_win_found_when_the_last_cell_lands() {
        // Yellow collects (5,0), (4,1), (3,2); the drop into column 3 lands
        // at (2,3) and closes the diagonal.
        let mut engine = GameEngine::new();
        for col in [5, 0, 1, 1, 2, 2, 6, 2, 3, 3, 3] {
            assert_eq!(engine.apply_move(col).unwrap().state, GameState::Playing);
        }
        let result = engine.apply_move(3).unwrap();

        assert_eq!(result.row, 2);
        assert_eq!(result.state, GameState::Won(Player::Yellow));
        assert_eq!(engine.turn(), Player::Yellow);
    }

    #[test]
    fn a_win_through_the_middle_of_a_long_run_is_detected() {
        let mut engine = GameEngine::new();
        // Red builds 0,1,_,3,4 on the bottom row, yellow keeps out of the
        // way, then red closes the gap for a run of five.
        for col in [0, 6, 1, 6, 3, 6, 4, 5] {
            engine.apply_move(col).unwrap();
        }
        let result = engine.apply_move(2).unwrap();
        assert_eq!(result.state, GameState::Won(Player::Red));
    }

    #[test]
    fn new_game_resets_from_any_state() {
        let mut engine = GameEngine::new();
        for _ in 0..3 {
            engine.apply_move(0).unwrap();
            engine.apply_move(1).unwrap();
        }
        engine.apply_move(0).unwrap();
        assert!(engine.is_terminal());

        engine.new_game();
        assert_eq!(engine, GameEngine::new());
        assert_eq!(engine.turn(), Player::Red);
        assert_eq!(engine.state(), GameState::Playing);
    }

    #[test]
    fn mid_game_reset_clears_the_board() {
        let mut engine = GameEngine::new();
        engine.apply_move(3).unwrap();
        engine.apply_move(3).unwrap();
        engine.new_game();
        assert_eq!(engine.cell(5, 3), Cell::Empty);
        assert_eq!(engine.cell(4, 3), Cell::Empty);
    }
}
