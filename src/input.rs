use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit step in cell units; y grows downwards.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Rejected character in a scripted move string.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Error)]
#[error("unrecognised move {found:?} at position {index}")]
pub struct ParseDirectionError {
    pub found: char,
    pub index: usize,
}

impl TryFrom<char> for Direction {
    type Error = ParseDirectionError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value.to_ascii_lowercase() {
            'u' => Ok(Self::Up),
            'd' => Ok(Self::Down),
            'l' => Ok(Self::Left),
            'r' => Ok(Self::Right),
            _ => Err(ParseDirectionError {
                found: value,
                index: 0,
            }),
        }
    }
}

/// Parses a scripted input string, one entry per tick.
///
/// `U`/`D`/`L`/`R` (any case) request a direction; `.` requests no change,
/// which the caller resolves to the snake's current direction. Whitespace is
/// ignored.
pub fn parse_moves(script: &str) -> Result<Vec<Option<Direction>>, ParseDirectionError> {
    script
        .chars()
        .enumerate()
        .filter(|(_, c)| !c.is_whitespace())
        .map(|(index, c)| match c {
            '.' => Ok(None),
            _ => Direction::try_from(c)
                .map(Some)
                .map_err(|error| ParseDirectionError { index, ..error }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{Direction, ParseDirectionError, direction_change_is_valid, parse_moves};

    #[test]
    fn opposite_direction_is_correct() {
        assert_eq!(Direction::Up.opposite(), Direction::Down);
        assert_eq!(Direction::Down.opposite(), Direction::Up);
        assert_eq!(Direction::Left.opposite(), Direction::Right);
        assert_eq!(Direction::Right.opposite(), Direction::Left);
    }

    #[test]
    fn opposite_deltas_cancel_out() {
        for direction in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            let (dx, dy) = direction.delta();
            let (ox, oy) = direction.opposite().delta();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn reversal_is_not_a_valid_change() {
        assert!(!direction_change_is_valid(Direction::Up, Direction::Down));
        assert!(!direction_change_is_valid(
            Direction::Right,
            Direction::Left
        ));

        assert!(direction_change_is_valid(Direction::Up, Direction::Left));
        assert!(direction_change_is_valid(Direction::Up, Direction::Up));
    }

    #[test]
    fn move_script_parses_letters_and_holds() {
        let moves = parse_moves("RR. u d\tL").expect("script is valid");

        assert_eq!(
            moves,
            vec![
                Some(Direction::Right),
                Some(Direction::Right),
                None,
                Some(Direction::Up),
                Some(Direction::Down),
                Some(Direction::Left),
            ]
        );
    }

    #[test]
    fn move_script_reports_bad_character_position() {
        assert_eq!(
            parse_moves("RRx"),
            Err(ParseDirectionError {
                found: 'x',
                index: 2
            })
        );
    }

    #[test]
    fn single_letters_convert_case_insensitively() {
        assert_eq!(Direction::try_from('L'), Ok(Direction::Left));
        assert_eq!(Direction::try_from('u'), Ok(Direction::Up));
        assert!(Direction::try_from('w').is_err());
    }
}
