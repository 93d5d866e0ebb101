use rand::Rng;

use crate::error::Result;
use crate::puzzle::Board;

// larger than any reachable distance score; marks unused candidate slots
const SENTINEL: u32 = 999;

/// Boards already visited during one solve run. Append-only; membership
/// is a linear scan, which stays cheap at the run lengths this solver
/// produces.
struct History {
    seen: Vec<[u8; 9]>,
}

impl History {
    fn new() -> Self {
        History { seen: Vec::new() }
    }

    fn record(&mut self, board: &Board) {
        self.seen.push(*board.cells());
    }

    fn contains(&self, cells: &[u8; 9]) -> bool {
        self.seen.iter().any(|snapshot| snapshot == cells)
    }
}

struct Candidates {
    boards: [Board; 4],
    scores: [u32; 4],
}

impl Candidates {
    fn from_board(board: &Board) -> Result<Candidates> {
        let mut boards = [*board; 4];
        let mut scores = [SENTINEL; 4];
        for (slot, mv) in board.legal_moves().into_iter().enumerate() {
            let next = board.child(mv)?;
            scores[slot] = next.distance();
            boards[slot] = next;
        }
        Ok(Candidates { boards, scores })
    }
}

// Greedy pick with random escape: take the lowest-scored successor not yet
// visited this run; a later candidate must beat the running best strictly,
// so the first of several equal-scored candidates wins. When every legal
// successor has been visited, pick uniformly among them, ignoring scores.
fn select(candidates: &Candidates, history: &History, rng: &mut impl Rng) -> usize {
    let mut best = 0;
    let mut lowest = SENTINEL;
    let mut possible = 0;
    let mut exhausted = true;
    for slot in 0..4 {
        if candidates.scores[slot] == SENTINEL {
            break;
        }
        if candidates.scores[slot] < lowest && !history.contains(candidates.boards[slot].cells()) {
            best = slot;
            lowest = candidates.scores[slot];
            exhausted = false;
        }
        possible += 1;
    }
    if exhausted {
        // every 3x3 board has at least two legal moves, so possible >= 2
        best = rng.gen_range(0..possible);
    }
    best
}

/// Drives the board to the solved configuration and returns the number of
/// moves taken. The solved check runs on each newly adopted board, so even
/// a board that starts out solved takes at least one move. Termination is
/// probabilistic: the random escape from exhausted positions keeps the
/// search from cycling forever.
pub fn solve(board: &mut Board, rng: &mut impl Rng) -> Result<u32> {
    let mut history = History::new();
    history.record(board);
    let mut moves = 0;
    loop {
        let candidates = Candidates::from_board(board)?;
        let chosen = select(&candidates, &history, rng);
        *board = candidates.boards[chosen];
        history.record(board);
        moves += 1;
        if board.is_solved() {
            return Ok(moves);
        }
    }
}
