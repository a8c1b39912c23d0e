use super::token::Player;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

const CONNECT_COUNT: isize = 4;
const DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Token(Player),
}

impl Cell {
    pub fn to_byte(self: &Self) -> u8 {
        return match self {
            Cell::Empty => 0,
            Cell::Token(player) => player.to_byte(),
        };
    }

    pub fn from_byte(byte: u8) -> Option<Cell> {
        if byte == 0 {
            return Some(Cell::Empty);
        }

        return Player::from_byte(byte).map(Cell::Token);
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match self {
            Cell::Empty => write!(f, "⚪"),
            Cell::Token(player) => match player {
                Player::Computer => write!(f, "🔴"),
                Player::Human => write!(f, "🟡"),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("column {column} is out of range for a board of width {width}")]
    OutOfRange { column: usize, width: usize },
    #[error("column {0} is full")]
    ColumnFull(usize),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("board dimensions {width}x{height} must be between 1 and 255")]
    Dimensions { width: usize, height: usize },
    #[error("expected {expected} cells, got {got}")]
    CellCount { expected: usize, got: usize },
    #[error("column {0} has an empty cell below an occupied one")]
    Floating(usize),
}

/// Column-major grid, row 0 at the bottom. Every column is filled bottom-up
/// without gaps.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Board {
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            check_dimensions(width, height).is_ok(),
            "invalid board dimensions {}x{}",
            width,
            height
        );

        return Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
        };
    }

    /// Builds a board from column-major cells, rejecting layouts where a piece
    /// floats above an empty cell.
    pub fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Result<Self, LayoutError> {
        check_dimensions(width, height)?;

        if cells.len() != width * height {
            return Err(LayoutError::CellCount {
                expected: width * height,
                got: cells.len(),
            });
        }

        for column in 0..width {
            let run = &cells[column * height..(column + 1) * height];
            let filled = run.iter().take_while(|cell| **cell != Cell::Empty).count();

            if run[filled..].iter().any(|cell| *cell != Cell::Empty) {
                return Err(LayoutError::Floating(column));
            }
        }

        return Ok(Self {
            width,
            height,
            cells,
        });
    }

    pub fn width(self: &Self) -> usize {
        return self.width;
    }

    pub fn height(self: &Self) -> usize {
        return self.height;
    }

    pub fn cells(self: &Self) -> &[Cell] {
        return &self.cells;
    }

    pub fn get(self: &Self, column: usize, row: usize) -> Cell {
        assert!(
            column < self.width && row < self.height,
            "cell ({}, {}) outside of {}x{} board",
            column,
            row,
            self.width,
            self.height
        );

        return self.cells[self.index(column, row)];
    }

    pub fn first_empty_row(self: &Self, column: usize) -> Option<usize> {
        return (0..self.height).find(|row| self.get(column, *row) == Cell::Empty);
    }

    pub fn is_move_legal(self: &Self, column: usize) -> bool {
        return column < self.width && self.first_empty_row(column).is_some();
    }

    pub fn legal_columns(self: &Self) -> impl Iterator<Item = usize> + '_ {
        return (0..self.width).filter(|column| self.is_move_legal(*column));
    }

    pub fn is_full(self: &Self) -> bool {
        return self.legal_columns().next().is_none();
    }

    /// Drops a token into the first empty row of `column` and returns that row.
    pub fn place(self: &mut Self, column: usize, player: Player) -> Result<usize, MoveError> {
        if column >= self.width {
            return Err(MoveError::OutOfRange {
                column,
                width: self.width,
            });
        }

        let Some(row) = self.first_empty_row(column) else {
            return Err(MoveError::ColumnFull(column));
        };

        let index = self.index(column, row);
        self.cells[index] = Cell::Token(player);

        return Ok(row);
    }

    /// True if the token at (`column`, `row`) is part of four equal tokens
    /// along any of the four axes.
    pub fn check_four_in_a_row(self: &Self, column: usize, row: usize) -> bool {
        let piece = self.get(column, row);
        if piece == Cell::Empty {
            return false;
        }

        for (dc, dr) in DIRECTIONS {
            for offset in 0..CONNECT_COUNT {
                let start_column = column as isize - offset * dc;
                let start_row = row as isize - offset * dr;

                let aligned = (0..CONNECT_COUNT).all(|step| {
                    self.cell_at(start_column + step * dc, start_row + step * dr) == Some(piece)
                });

                if aligned {
                    return true;
                }
            }
        }

        return false;
    }

    fn cell_at(self: &Self, column: isize, row: isize) -> Option<Cell> {
        if column < 0 || row < 0 || column as usize >= self.width || row as usize >= self.height {
            return None;
        }

        return Some(self.cells[self.index(column as usize, row as usize)]);
    }

    fn index(self: &Self, column: usize, row: usize) -> usize {
        return row + column * self.height;
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), LayoutError> {
    let limit = u8::MAX as usize;
    if width == 0 || height == 0 || width > limit || height > limit {
        return Err(LayoutError::Dimensions { width, height });
    }

    return Ok(());
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        for row in (0..self.height).rev() {
            for column in 0..self.width {
                write!(f, "{} ", self.get(column, row))?;
            }
            writeln!(f)?;
        }

        return Ok(());
    }
}
