use crate::board::board::{Board, Cell};
use crate::error::{Error, Result};
use std::fs;
use std::path::Path;

pub fn read_board(path: &Path) -> Result<Board> {
    let text = fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    return parse_board(&text);
}

/// Parses `height width` followed by `height` rows of `width` cells, top row
/// first. Cells are 0 (empty), 1 (computer) or 2 (human).
pub fn parse_board(text: &str) -> Result<Board> {
    let mut tokens = text.split_ascii_whitespace();

    let height = parse_dimension(tokens.next(), "height")?;
    let width = parse_dimension(tokens.next(), "width")?;

    let mut cells: Vec<Cell> = vec![Cell::Empty; width * height];

    for file_row in 0..height {
        let row = height - 1 - file_row;

        for column in 0..width {
            let Some(token) = tokens.next() else {
                return Err(Error::Input(format!(
                    "expected {} cells, found {}",
                    width * height,
                    file_row * width + column
                )));
            };

            let cell = token
                .parse::<u8>()
                .ok()
                .and_then(Cell::from_byte)
                .ok_or_else(|| {
                    Error::Input(format!(
                        "invalid cell '{}' in row {}, column {}",
                        token,
                        file_row + 1,
                        column + 1
                    ))
                })?;

            cells[row + column * height] = cell;
        }
    }

    if let Some(extra) = tokens.next() {
        return Err(Error::Input(format!("unexpected trailing token '{}'", extra)));
    }

    return Ok(Board::from_cells(width, height, cells)?);
}

fn parse_dimension(token: Option<&str>, name: &str) -> Result<usize> {
    let Some(token) = token else {
        return Err(Error::Input(format!("missing board {}", name)));
    };

    return match token.parse::<usize>() {
        Ok(value) if value >= 1 && value <= u8::MAX as usize => Ok(value),
        _ => Err(Error::Input(format!("invalid board {} '{}'", name, token))),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::board::LayoutError;
    use crate::board::token::Player;

    #[test]
    fn test_rows_are_reindexed_bottom_up() {
        let board = parse_board("3 4\n0 0 0 0\n0 2 0 0\n1 2 0 1\n").unwrap();

        assert_eq!(board.width(), 4);
        assert_eq!(board.height(), 3);
        assert_eq!(board.get(0, 0), Cell::Token(Player::Computer));
        assert_eq!(board.get(1, 0), Cell::Token(Player::Human));
        assert_eq!(board.get(1, 1), Cell::Token(Player::Human));
        assert_eq!(board.get(3, 0), Cell::Token(Player::Computer));
        assert_eq!(board.get(1, 2), Cell::Empty);
    }

    #[test]
    fn test_missing_cells() {
        assert!(matches!(parse_board("2 2\n0 0\n0"), Err(Error::Input(_))));
    }

    #[test]
    fn test_invalid_cell_value() {
        assert!(matches!(parse_board("1 2\n0 3"), Err(Error::Input(_))));
        assert!(matches!(parse_board("1 2\n0 x"), Err(Error::Input(_))));
    }

    #[test]
    fn test_invalid_dimensions() {
        assert!(matches!(parse_board(""), Err(Error::Input(_))));
        assert!(matches!(parse_board("0 4"), Err(Error::Input(_))));
        assert!(matches!(parse_board("4 256"), Err(Error::Input(_))));
    }

    #[test]
    fn test_trailing_tokens() {
        assert!(matches!(parse_board("1 1\n0 0"), Err(Error::Input(_))));
    }

    #[test]
    fn test_floating_piece() {
        assert!(matches!(
            parse_board("2 1\n1\n0"),
            Err(Error::Layout(LayoutError::Floating(0)))
        ));
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            read_board(Path::new("/nonexistent/board.txt")),
            Err(Error::Io { .. })
        ));
    }
}
