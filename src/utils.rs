use crate::engine::Board;
use crate::error::ParseError;

/// Parses a puzzle description of the form `(rows, cols) [v v v ...]` into a `Board`.
///
/// The values inside the brackets are the tiles in row-major order, separated by
/// whitespace, with `0` for the blank.
///
/// # Arguments
/// * `description`: The puzzle description.
///
/// # Returns
/// * `Ok(Board)` if the description is well formed and describes a valid board.
/// * `Err(ParseError)` if:
///     - The parentheses or brackets are missing.
///     - The dimensions are not two comma-separated numbers.
///     - A tile value is not a number.
///     - The number of values does not equal `rows * cols`.
///     - The values do not form a valid board (see [`Board::new`]).
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::parse_puzzle;
///
/// let board = parse_puzzle("(3, 3) [3 8 6 5 0 2 7 4 1]").unwrap();
/// assert_eq!(board.rows(), 3);
/// assert_eq!(board.get(0, 1), 8);
/// assert_eq!(board.blank_position(), (1, 1));
///
/// assert!(parse_puzzle("(2, 2) [1 2 3]").is_err());
/// assert!(parse_puzzle("2, 2 [1 2 3 0]").is_err());
/// ```
pub fn parse_puzzle(description: &str) -> Result<Board, ParseError> {
    let description = description.trim();
    if description.is_empty() {
        return Err(ParseError::Empty);
    }

    let open_paren = description.find('(').ok_or(ParseError::MissingDelimiter('('))?;
    let close_paren = description.find(')').ok_or(ParseError::MissingDelimiter(')'))?;
    let dims = description
        .get(open_paren + 1..close_paren)
        .ok_or_else(|| ParseError::BadDimensions(description.to_string()))?;

    let parts: Vec<&str> = dims.split(',').map(str::trim).collect();
    let (rows, cols) = match parts.as_slice() {
        [r, c] => match (r.parse::<usize>(), c.parse::<usize>()) {
            (Ok(r), Ok(c)) => (r, c),
            _ => return Err(ParseError::BadDimensions(dims.to_string())),
        },
        _ => return Err(ParseError::BadDimensions(dims.to_string())),
    };

    let open_bracket = description.find('[').ok_or(ParseError::MissingDelimiter('['))?;
    let close_bracket = description.rfind(']').ok_or(ParseError::MissingDelimiter(']'))?;
    let body = description
        .get(open_bracket + 1..close_bracket)
        .ok_or(ParseError::MissingDelimiter(']'))?;

    let expected = rows
        .checked_mul(cols)
        .ok_or_else(|| ParseError::BadDimensions(dims.to_string()))?;
    let values = parse_values(body, 1)?;
    if values.len() != expected {
        return Err(ParseError::CountMismatch {
            expected,
            found: values.len(),
        });
    }

    let grid = if cols == 0 {
        Vec::new()
    } else {
        values.chunks(cols).map(<[u32]>::to_vec).collect()
    };
    Ok(Board::new(grid)?)
}

/// Parses one row per string slice, values separated by whitespace.
///
/// # Examples
/// ```
/// use npuzzle_solver::utils::board_from_rows;
///
/// let board = board_from_rows(&["1 2 3", "4 5 6", "7 8 0"]).unwrap();
/// assert!(board.is_goal());
/// assert!(board_from_rows(&["1 2", "3"]).is_err());
/// ```
pub fn board_from_rows(rows: &[&str]) -> Result<Board, ParseError> {
    let grid = rows
        .iter()
        .enumerate()
        .map(|(idx, row)| parse_values(row, idx + 1))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Board::new(grid)?)
}

/// Parses a whole board file: either a single `(rows, cols) [...]` description or one
/// row per line. Blank lines are ignored.
pub fn parse_board_text(text: &str) -> Result<Board, ParseError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();

    match lines.first() {
        None => Err(ParseError::Empty),
        Some(first) if first.starts_with('(') => parse_puzzle(&lines.join(" ")),
        Some(_) => board_from_rows(&lines),
    }
}

fn parse_values(text: &str, line: usize) -> Result<Vec<u32>, ParseError> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse::<u32>().map_err(|_| ParseError::InvalidNumber {
                token: token.to_string(),
                line,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BoardError;

    #[test]
    fn test_parse_puzzle_valid() {
        let board = parse_puzzle("(3, 5) [1 2 3 4 5 0 6 7 8 9 11 12 13 14 10]").unwrap();
        assert_eq!(board.rows(), 3);
        assert_eq!(board.cols(), 5);
        assert_eq!(board.get(2, 4), 10);
        assert_eq!(board.blank_position(), (1, 0));
    }

    #[test]
    fn test_parse_puzzle_tolerates_spacing() {
        let a = parse_puzzle("  (2,2)   [ 1  2\t3 0 ] ").unwrap();
        assert!(a.is_goal());
    }

    #[test]
    fn test_parse_puzzle_errors() {
        assert_eq!(parse_puzzle("   "), Err(ParseError::Empty));
        assert_eq!(
            parse_puzzle("3, 3) [1 2 3]"),
            Err(ParseError::MissingDelimiter('('))
        );
        assert_eq!(
            parse_puzzle("(3; 3) [1 2 3]"),
            Err(ParseError::BadDimensions("3; 3".to_string()))
        );
        assert_eq!(
            parse_puzzle("(2, 2) 1 2 3 0"),
            Err(ParseError::MissingDelimiter('['))
        );
        assert_eq!(
            parse_puzzle("(2, 2) [1 2 x 0]"),
            Err(ParseError::InvalidNumber {
                token: "x".to_string(),
                line: 1
            })
        );
        assert_eq!(
            parse_puzzle("(2, 2) [1 2 3]"),
            Err(ParseError::CountMismatch {
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            parse_puzzle("(2, 2) [1 2 2 0]"),
            Err(ParseError::Board(BoardError::DuplicateValue(2)))
        );
    }

    #[test]
    fn test_parse_puzzle_rejects_overflowing_dimensions() {
        assert_eq!(
            parse_puzzle("(18446744073709551615, 2) [1 2 3 0]"),
            Err(ParseError::BadDimensions(
                "18446744073709551615, 2".to_string()
            ))
        );
        assert!(matches!(
            parse_puzzle("(4294967296, 4294967296) [1 2 3 0]"),
            Err(ParseError::BadDimensions(_))
        ));
    }

    #[test]
    fn test_board_from_rows_reports_line() {
        let err = board_from_rows(&["1 2 3", "4 five 6", "7 8 0"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidNumber {
                token: "five".to_string(),
                line: 2
            }
        );
    }

    #[test]
    fn test_parse_board_text_both_formats() {
        let rows = "\n1 2 3\n4 5 6\n\n7 8 0\n";
        assert!(parse_board_text(rows).unwrap().is_goal());

        let described = "(2, 3)\n[1 2 3\n 4 5 0]\n";
        assert!(parse_board_text(described).unwrap().is_goal());

        assert_eq!(parse_board_text("\n \n"), Err(ParseError::Empty));
    }

    #[test]
    fn test_error_messages() {
        let err = parse_puzzle("(2, 2) [1 2 3]").unwrap_err();
        assert_eq!(err.to_string(), "expected 4 tile values, found 3");
        let err = parse_puzzle("(2, 2) [1 2 2 0]").unwrap_err();
        assert_eq!(err.to_string(), "value 2 appears more than once");
    }
}
