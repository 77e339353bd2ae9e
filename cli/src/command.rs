use sweeper_core::{Coord, Coord2, GameError};

pub const USAGE: &str =
    "Unknown command. Commands: r x y (reveal), f x y (flag), p (print), q (quit), n [w h] (new)";

/// How the two numeric arguments of a command map onto `(x, y)`.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum CoordinateOrder {
    /// `row column`, the default.
    #[default]
    RowFirst,
    /// `x y`, enabled with `--cartesian`.
    ColumnFirst,
}

impl CoordinateOrder {
    /// Orders the two command arguments as `(x, y)`.
    pub fn apply(self, first: i64, second: i64) -> (i64, i64) {
        match self {
            Self::RowFirst => (second, first),
            Self::ColumnFirst => (first, second),
        }
    }
}

/// One parsed input line. Coordinates are kept raw and only range-checked when
/// the command is executed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Reveal { x: i64, y: i64 },
    Flag { x: i64, y: i64 },
    New { size: Option<(i64, i64)> },
    Print { reveal_all: bool },
    Quit,
    Empty,
    Unknown,
}

impl Command {
    pub fn parse(line: &str, order: CoordinateOrder, width: Coord) -> Self {
        let mut tokens = line.split_whitespace();
        let Some(verb) = tokens.next() else {
            return Self::Empty;
        };
        let first = atoi(tokens.next());
        let second = atoi(tokens.next());

        match verb {
            "r" => {
                let (x, y) = order.apply(first, second);
                Self::Reveal { x, y }
            }
            "f" | "m" => {
                let (x, y) = order.apply(first, second);
                Self::Flag { x, y }
            }
            "n" => Self::New {
                size: (first > 0 && second > 0).then_some((first, second)),
            },
            "q" => Self::Quit,
            "p" => Self::Print { reveal_all: false },
            "P" => Self::Print { reveal_all: true },
            _ if is_numeric(verb) => {
                let leading = atoi(Some(verb));
                if (0..i64::from(width)).contains(&leading) {
                    let (x, y) = order.apply(leading, first);
                    Self::Reveal { x, y }
                } else {
                    Self::Unknown
                }
            }
            _ => Self::Unknown,
        }
    }
}

/// Converts raw command coordinates, rejecting anything that cannot be on a board.
pub fn to_coords(x: i64, y: i64) -> Result<Coord2, GameError> {
    match (Coord::try_from(x), Coord::try_from(y)) {
        (Ok(x), Ok(y)) => Ok((x, y)),
        _ => Err(GameError::InvalidCoords),
    }
}

fn is_numeric(token: &str) -> bool {
    token
        .trim_start_matches(['+', '-'])
        .starts_with(|c: char| c.is_ascii_digit())
}

/// Lenient integer parsing: optional sign then leading digits, `0` when there
/// are none.
fn atoi(token: Option<&str>) -> i64 {
    let Some(token) = token else {
        return 0;
    };
    let (sign, unsigned) = match token.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, token.strip_prefix('+').unwrap_or(token)),
    };
    let end = unsigned
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(unsigned.len());
    unsigned[..end].parse::<i64>().map_or(0, |value| sign * value)
}
