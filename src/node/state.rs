use crate::board::{board::Board, token::Player};
use serde::{Deserialize, Serialize};

pub const WIN_VALUE: f64 = 1.0;
pub const LOSE_VALUE: f64 = -1.0;
pub const NEUTRAL_VALUE: f64 = 0.0;

/// One ply of the game. `utility` stays at `NEUTRAL_VALUE` until resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub remaining_depth: u8,
    pub last_move_column: u8,
    pub last_move_player: Player,
    pub utility: f64,
}

impl GameState {
    pub fn new(
        board: Board,
        remaining_depth: u8,
        last_move_column: u8,
        last_move_player: Player,
    ) -> GameState {
        return Self {
            board,
            remaining_depth,
            last_move_column,
            last_move_player,
            utility: NEUTRAL_VALUE,
        };
    }

    /// Position read from outside the search: the human is treated as the
    /// last mover so the computer moves next.
    pub fn root(board: Board, max_depth: u8) -> GameState {
        return Self::new(board, max_depth, 0, Player::Human);
    }

    pub fn next_player(self: &Self) -> Player {
        return self.last_move_player.invert();
    }

    pub fn is_computer_win(self: &Self) -> bool {
        return self.utility == WIN_VALUE;
    }

    pub fn is_human_win(self: &Self) -> bool {
        return self.utility == LOSE_VALUE;
    }

    pub fn is_terminal(self: &Self) -> bool {
        return self.is_computer_win() || self.is_human_win();
    }

    /// Applies the next player's token in `column` to a copy of the board.
    /// The child's utility is set when the move completes four in a row.
    pub fn play(self: &Self, column: usize) -> GameState {
        assert!(
            self.remaining_depth > 0,
            "cannot expand a state with no remaining depth"
        );

        let player = self.next_player();
        let mut board = self.board.clone();
        let row = match board.place(column, player) {
            Ok(row) => row,
            Err(e) => panic!("illegal move during expansion: {}", e),
        };
        let winning = board.check_four_in_a_row(column, row);

        let mut child = GameState::new(board, self.remaining_depth - 1, column as u8, player);

        if winning {
            child.utility = match player {
                Player::Computer => WIN_VALUE,
                Player::Human => LOSE_VALUE,
            };
        }

        return child;
    }

    /// Child states for every legal column, left to right.
    pub fn successors(self: &Self) -> impl Iterator<Item = GameState> + '_ {
        return self.board.legal_columns().map(move |column| self.play(column));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::board::Cell;

    #[test]
    fn test_root_expects_computer_move() {
        let state = GameState::root(Board::new(4, 4), 3);
        assert_eq!(state.next_player(), Player::Computer);
        assert_eq!(state.remaining_depth, 3);
        assert_eq!(state.utility, NEUTRAL_VALUE);
    }

    #[test]
    fn test_play_does_not_touch_parent() {
        let state = GameState::root(Board::new(4, 4), 3);
        let child = state.play(2);

        assert_eq!(state.board.get(2, 0), Cell::Empty);
        assert_eq!(child.board.get(2, 0), Cell::Token(Player::Computer));
        assert_eq!(child.remaining_depth, 2);
        assert_eq!(child.last_move_column, 2);
        assert_eq!(child.last_move_player, Player::Computer);
        assert_eq!(child.next_player(), Player::Human);
    }

    #[test]
    fn test_play_marks_wins() {
        let mut board = Board::new(4, 4);
        for column in 0..3 {
            board.place(column, Player::Computer).unwrap();
        }
        let state = GameState::root(board.clone(), 2);
        let child = state.play(3);
        assert!(child.is_computer_win());

        let human = GameState::new(board, 2, 0, Player::Computer);
        let child = human.play(3);
        assert!(!child.is_terminal());
    }

    #[test]
    fn test_successors_skip_full_columns() {
        let mut board = Board::new(3, 1);
        board.place(1, Player::Human).unwrap();
        let state = GameState::root(board, 2);
        let columns: Vec<u8> = state.successors().map(|s| s.last_move_column).collect();
        assert_eq!(columns, vec![0, 2]);
    }
}
