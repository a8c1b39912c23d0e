//! Fixed-layout binary codec for task and utility messages.
//!
//! Task payload, in order:
//! `[width:u8][height:u8][cell:u8; width*height][remaining_depth:u8][last_move_column:u8][last_move_player:u8][utility:f64]`
//!
//! Cells are column-major with row 0 at the bottom. Scalars are little-endian.
//! A utility reply is a bare `f64`; the end signal carries no bytes.

use crate::board::board::{Board, Cell, LayoutError};
use crate::board::token::Player;
use crate::node::state::GameState;
use thiserror::Error;

pub const UTILITY_LEN: usize = 8;
const HEADER_LEN: usize = 2;
const TRAILER_LEN: usize = 3 + UTILITY_LEN;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("payload truncated: needed {needed} bytes, got {available}")]
    Truncated { needed: usize, available: usize },
    #[error("invalid cell byte {byte} at index {index}")]
    InvalidCell { index: usize, byte: u8 },
    #[error("invalid player byte {0}")]
    InvalidPlayer(u8),
    #[error("last move column {column} outside of board width {width}")]
    InvalidColumn { column: u8, width: usize },
    #[error("invalid board: {0}")]
    Layout(#[from] LayoutError),
    #[error("expected {expected} bytes, got {got}")]
    Length { expected: usize, got: usize },
}

pub fn encoded_len(state: &GameState) -> usize {
    return HEADER_LEN + state.board.cells().len() + TRAILER_LEN;
}

pub fn encode_state(state: &GameState) -> Vec<u8> {
    let mut out = Vec::with_capacity(encoded_len(state));
    encode_state_into(&mut out, state);

    return out;
}

pub fn encode_state_into(out: &mut Vec<u8>, state: &GameState) {
    out.clear();
    out.reserve(encoded_len(state));

    // Board dimensions are bounded to a byte at construction.
    out.push(state.board.width() as u8);
    out.push(state.board.height() as u8);
    out.extend(state.board.cells().iter().map(|cell| cell.to_byte()));

    out.push(state.remaining_depth);
    out.push(state.last_move_column);
    out.push(state.last_move_player.to_byte());
    out.extend_from_slice(&state.utility.to_le_bytes());
}

/// Decodes one state from the front of `bytes`, returning it together with
/// the number of bytes consumed.
pub fn decode_state(bytes: &[u8]) -> Result<(GameState, usize), DecodeError> {
    let mut c = Cursor::new(bytes);

    let width = c.read_u8()? as usize;
    let height = c.read_u8()? as usize;

    let raw = c.read_bytes(width * height)?;
    let mut cells: Vec<Cell> = Vec::with_capacity(raw.len());
    for (index, byte) in raw.iter().enumerate() {
        let Some(cell) = Cell::from_byte(*byte) else {
            return Err(DecodeError::InvalidCell { index, byte: *byte });
        };
        cells.push(cell);
    }

    let remaining_depth = c.read_u8()?;
    let last_move_column = c.read_u8()?;
    let player_byte = c.read_u8()?;
    let utility = c.read_f64()?;

    let board = Board::from_cells(width, height, cells)?;

    if last_move_column as usize >= width {
        return Err(DecodeError::InvalidColumn {
            column: last_move_column,
            width,
        });
    }

    let Some(last_move_player) = Player::from_byte(player_byte) else {
        return Err(DecodeError::InvalidPlayer(player_byte));
    };

    let mut state = GameState::new(board, remaining_depth, last_move_column, last_move_player);
    state.utility = utility;

    return Ok((state, c.position()));
}

pub fn encode_utility(utility: f64) -> [u8; UTILITY_LEN] {
    return utility.to_le_bytes();
}

pub fn decode_utility(bytes: &[u8]) -> Result<f64, DecodeError> {
    if bytes.len() != UTILITY_LEN {
        return Err(DecodeError::Length {
            expected: UTILITY_LEN,
            got: bytes.len(),
        });
    }

    return Cursor::new(bytes).read_f64();
}

struct Cursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        return Self { bytes, pos: 0 };
    }

    fn position(&self) -> usize {
        return self.pos;
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], DecodeError> {
        let end = self.pos + len;
        if end > self.bytes.len() {
            return Err(DecodeError::Truncated {
                needed: end,
                available: self.bytes.len(),
            });
        }

        let out = &self.bytes[self.pos..end];
        self.pos = end;

        return Ok(out);
    }

    fn read_u8(&mut self) -> Result<u8, DecodeError> {
        return Ok(self.read_bytes(1)?[0]);
    }

    fn read_f64(&mut self) -> Result<f64, DecodeError> {
        let mut raw = [0u8; UTILITY_LEN];
        raw.copy_from_slice(self.read_bytes(UTILITY_LEN)?);

        return Ok(f64::from_le_bytes(raw));
    }
}
