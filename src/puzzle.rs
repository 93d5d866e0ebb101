use rand::Rng;
use std::fmt;

use crate::error::{Error, Result};

pub const BLANK: u8 = 9;
pub const SCRAMBLE_STEPS: usize = 50;

const SOLVED: [u8; 9] = [1, 2, 3, 4, 5, 6, 7, 8, 9];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    fn offset(self) -> isize {
        match self {
            Move::Up => -3,
            Move::Down => 3,
            Move::Left => -1,
            Move::Right => 1,
        }
    }

    fn is_legal_from(self, blank: usize) -> bool {
        match self {
            Move::Up => blank >= 3,
            Move::Down => blank + 3 < 9,
            Move::Left => blank % 3 > 0,
            Move::Right => blank % 3 < 2,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match *self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    cells: [u8; 9],
    blank: usize,
}

impl Board {
    pub fn solved() -> Self {
        Board {
            cells: SOLVED,
            blank: 8,
        }
    }

    /// Builds a board from raw cells, rejecting anything that is not a
    /// permutation of 1..=9 with the value 9 as the blank.
    pub fn from_cells(cells: [u8; 9]) -> Result<Self> {
        let mut seen = [false; 9];
        for &value in &cells {
            if !(1..=9).contains(&value) {
                return Err(Error::InvalidBoard {
                    reason: format!("value {} out of range 1-9", value),
                });
            }
            if seen[(value - 1) as usize] {
                return Err(Error::InvalidBoard {
                    reason: format!("value {} appears more than once", value),
                });
            }
            seen[(value - 1) as usize] = true;
        }
        let blank = cells
            .iter()
            .position(|&value| value == BLANK)
            .ok_or_else(|| Error::InvalidBoard {
                reason: "no blank cell".to_string(),
            })?;
        Ok(Board { cells, blank })
    }

    pub fn cells(&self) -> &[u8; 9] {
        &self.cells
    }

    pub fn is_solved(&self) -> bool {
        self.cells == SOLVED
    }

    // Canonical Up/Down/Left/Right order, relied on by the selection policy.
    pub fn legal_moves(&self) -> Vec<Move> {
        Move::ALL
            .iter()
            .copied()
            .filter(|mv| mv.is_legal_from(self.blank))
            .collect()
    }

    /// Returns the board obtained by sliding the tile in direction `mv`
    /// into the blank.
    pub fn child(&self, mv: Move) -> Result<Board> {
        if !mv.is_legal_from(self.blank) {
            return Err(Error::IllegalMove {
                mv,
                blank: self.blank,
            });
        }
        let from = (self.blank as isize + mv.offset()) as usize;
        let mut next = *self;
        next.cells[next.blank] = next.cells[from];
        next.cells[from] = BLANK;
        next.blank = from;
        Ok(next)
    }

    /// Structural distance from the solved configuration: 0 iff solved,
    /// otherwise the sum of |i+1 - cells[i]| over all nine cells. The
    /// blank's cell is counted like any other.
    pub fn distance(&self) -> u32 {
        if self.is_solved() {
            return 0;
        }
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &value)| (i as i32 + 1 - i32::from(value)).unsigned_abs())
            .sum()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(3) {
            for &value in row {
                if value == BLANK {
                    write!(f, " . ")?;
                } else {
                    write!(f, "{:2} ", value)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Randomizes a board with a fixed-length walk of uniformly chosen legal
/// moves. Moves may cancel each other; there is no visited-state avoidance.
pub fn scramble(board: &mut Board, rng: &mut impl Rng) -> Result<()> {
    for _ in 0..SCRAMBLE_STEPS {
        let moves = board.legal_moves();
        // every 3x3 board has at least two legal moves
        let mv = moves[rng.gen_range(0..moves.len())];
        *board = board.child(mv)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn board(cells: [u8; 9]) -> Board {
        Board::from_cells(cells).unwrap()
    }

    fn assert_valid(b: &Board) {
        let mut sorted = *b.cells();
        sorted.sort();
        assert_eq!(sorted, [1, 2, 3, 4, 5, 6, 7, 8, 9]);
        assert_eq!(b.cells[b.blank], BLANK);
    }

    #[test]
    fn solved_board_is_solved() {
        assert!(Board::solved().is_solved());
        assert!(!board([2, 1, 3, 4, 5, 6, 7, 8, 9]).is_solved());
    }

    #[test]
    fn from_cells_rejects_out_of_range_values() {
        assert!(Board::from_cells([0, 2, 3, 4, 5, 6, 7, 8, 9]).is_err());
        assert!(Board::from_cells([10, 2, 3, 4, 5, 6, 7, 8, 9]).is_err());
    }

    #[test]
    fn from_cells_rejects_duplicate_values() {
        assert!(Board::from_cells([1, 1, 3, 4, 5, 6, 7, 8, 9]).is_err());
        // duplicating a tile value also squeezes out the blank
        assert!(Board::from_cells([1, 2, 3, 4, 5, 6, 7, 8, 8]).is_err());
    }

    #[test]
    fn legal_moves_with_blank_top_left() {
        let b = board([9, 1, 2, 3, 4, 5, 6, 7, 8]);
        assert_eq!(b.legal_moves(), vec![Move::Down, Move::Right]);
    }

    #[test]
    fn legal_moves_with_blank_in_center() {
        let b = board([1, 2, 3, 4, 9, 5, 6, 7, 8]);
        assert_eq!(
            b.legal_moves(),
            vec![Move::Up, Move::Down, Move::Left, Move::Right]
        );
    }

    #[test]
    fn legal_moves_with_blank_bottom_right() {
        let b = Board::solved();
        assert_eq!(b.legal_moves(), vec![Move::Up, Move::Left]);
    }

    #[test]
    fn child_moves_expected_tile() {
        let b = Board::solved().child(Move::Up).unwrap();
        assert_eq!(b.cells(), &[1, 2, 3, 4, 5, 9, 7, 8, 6]);
        assert_eq!(b.blank, 5);
    }

    #[test]
    fn child_preserves_permutation() {
        let starts = [
            Board::solved(),
            board([9, 1, 2, 3, 4, 5, 6, 7, 8]),
            board([4, 3, 8, 9, 7, 2, 6, 1, 5]),
        ];
        for start in starts {
            for mv in start.legal_moves() {
                assert_valid(&start.child(mv).unwrap());
            }
        }
    }

    #[test]
    fn child_rejects_illegal_move() {
        let err = Board::solved().child(Move::Down).unwrap_err();
        assert!(matches!(err, Error::IllegalMove { mv: Move::Down, blank: 8 }));
    }

    #[test]
    fn distance_of_solved_is_zero() {
        assert_eq!(Board::solved().distance(), 0);
    }

    #[test]
    fn distance_of_swapped_pair() {
        assert_eq!(board([2, 1, 3, 4, 5, 6, 7, 8, 9]).distance(), 2);
    }

    #[test]
    fn distance_counts_the_blank_cell() {
        // blank at position 5 contributes |6 - 9|, the 6 at position 8
        // contributes |9 - 6|
        assert_eq!(board([1, 2, 3, 4, 5, 9, 7, 8, 6]).distance(), 6);
    }

    #[test]
    fn scramble_keeps_board_valid() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut b = Board::solved();
        scramble(&mut b, &mut rng).unwrap();
        assert_valid(&b);
    }

    #[test]
    fn scramble_is_deterministic_per_seed() {
        let mut first = Board::solved();
        let mut second = Board::solved();
        scramble(&mut first, &mut StdRng::seed_from_u64(7)).unwrap();
        scramble(&mut second, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(first, second);

        let mut other = Board::solved();
        scramble(&mut other, &mut StdRng::seed_from_u64(8)).unwrap();
        assert_ne!(first, other);
    }
}
