//! Ticket model and band-constrained ticket generation
//!
//! A ticket holds 10 distinct numbers from 1..=100 laid out on a 2×9 grid:
//! each column draws from a fixed value band, holds at most two numbers
//! (one per row), and each row ends up with exactly 5 filled cells.

use rand::Rng;
use serde::{Deserialize, Serialize};

use bf_stage::TicketId;

use crate::config::{
    column_band, column_for, COLUMN_CAPACITY, MAX_NUMBER, NUMBERS_PER_ROW, NUMBERS_PER_TICKET,
    TICKET_COLS, TICKET_ROWS,
};

/// 2×9 placement grid; `None` cells are blanks.
pub type Grid = [[Option<u8>; TICKET_COLS]; TICKET_ROWS];

/// Per-column number assignment used while building a grid.
type ColumnPicks = [Vec<u8>; TICKET_COLS];

/// A single bingo ticket
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Identity, scoped to (player, sequence)
    pub id: TicketId,
    numbers: Vec<u8>,
    grid: Grid,
    marks: Vec<u8>,
    score: u8,
}

impl Ticket {
    /// Generate a fresh ticket under the column-band constraints
    pub fn generate(id: TicketId, rng: &mut impl Rng) -> Self {
        let mut per_col = pick_numbers(rng);
        fill_shortfall(&mut per_col);
        Self::from_columns(id, per_col)
    }

    /// Build a ticket from an explicit number set (scripted rounds, tests)
    pub fn from_numbers(id: TicketId, numbers: &[u8]) -> Result<Self, TicketError> {
        if numbers.len() != NUMBERS_PER_TICKET {
            return Err(TicketError::WrongCount(numbers.len()));
        }
        let mut per_col: ColumnPicks = Default::default();
        for &n in numbers {
            if n < 1 || n > MAX_NUMBER {
                return Err(TicketError::OutOfRange(n));
            }
            let col = column_for(n);
            if per_col[col].contains(&n) {
                return Err(TicketError::Duplicate(n));
            }
            if per_col[col].len() >= COLUMN_CAPACITY {
                return Err(TicketError::ColumnOverflow { column: col });
            }
            per_col[col].push(n);
        }
        Ok(Self::from_columns(id, per_col))
    }

    fn from_columns(id: TicketId, per_col: ColumnPicks) -> Self {
        let grid = place_rows(&per_col);
        let mut numbers: Vec<u8> = per_col.into_iter().flatten().collect();
        numbers.sort_unstable();
        Self {
            id,
            numbers,
            grid,
            marks: Vec::new(),
            score: 0,
        }
    }

    /// The ticket's numbers, ascending
    pub fn numbers(&self) -> &[u8] {
        &self.numbers
    }

    /// The placement grid
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Called numbers matched so far, in call order
    pub fn marks(&self) -> &[u8] {
        &self.marks
    }

    /// Running Total Score value
    pub fn score(&self) -> u8 {
        self.score
    }

    /// Does this ticket carry the number?
    pub fn contains(&self, number: u8) -> bool {
        self.numbers.binary_search(&number).is_ok()
    }

    /// Has the number already been marked?
    pub fn is_marked(&self, number: u8) -> bool {
        self.marks.contains(&number)
    }

    /// Marked cells on the ticket
    pub fn marked_count(&self) -> u8 {
        self.marks.len() as u8
    }

    /// All numbers marked
    pub fn is_full_house(&self) -> bool {
        self.marks.len() == NUMBERS_PER_TICKET
    }

    /// Unmarked numbers, ascending
    pub fn remaining(&self) -> Vec<u8> {
        self.numbers
            .iter()
            .copied()
            .filter(|n| !self.is_marked(*n))
            .collect()
    }

    /// Mark a called number. Returns false when the ticket does not carry
    /// the number or already marked it; marks never shrink within a round.
    pub(crate) fn mark(&mut self, number: u8) -> bool {
        if !self.contains(number) || self.is_marked(number) {
            return false;
        }
        self.marks.push(number);
        true
    }

    pub(crate) fn set_score(&mut self, score: u8) {
        self.score = score;
    }
}

/// Randomly assign numbers to columns: pick a column with spare capacity
/// uniformly, rejection-sample a value from its band, repeat until the
/// ticket holds 10 numbers or the attempt budget runs out.
fn pick_numbers(rng: &mut impl Rng) -> ColumnPicks {
    const MAX_SAMPLE_ATTEMPTS: u32 = 1_000;

    let mut per_col: ColumnPicks = Default::default();
    let mut picked = 0usize;
    let mut attempts = 0u32;

    while picked < NUMBERS_PER_TICKET && attempts < MAX_SAMPLE_ATTEMPTS {
        attempts += 1;
        let open: Vec<usize> = (0..TICKET_COLS)
            .filter(|&col| per_col[col].len() < COLUMN_CAPACITY && band_has_free(col, &per_col))
            .collect();
        if open.is_empty() {
            break;
        }
        let col = open[rng.random_range(0..open.len())];
        let (lo, hi) = column_band(col);
        let candidate = rng.random_range(lo..=hi);
        if !per_col[col].contains(&candidate) {
            per_col[col].push(candidate);
            picked += 1;
        }
    }

    per_col
}

fn band_has_free(col: usize, per_col: &ColumnPicks) -> bool {
    let (lo, hi) = column_band(col);
    let band_len = (hi - lo + 1) as usize;
    per_col[col].len() < band_len
}

/// Deterministic fallback: scan bands in order and fill any shortfall left
/// by rejection sampling. The bands always permit completion for a single
/// ticket (each holds more values than a column can take).
fn fill_shortfall(per_col: &mut ColumnPicks) {
    let mut picked: usize = per_col.iter().map(Vec::len).sum();
    for col in 0..TICKET_COLS {
        if picked >= NUMBERS_PER_TICKET {
            break;
        }
        let (lo, hi) = column_band(col);
        for n in lo..=hi {
            if per_col[col].len() >= COLUMN_CAPACITY || picked >= NUMBERS_PER_TICKET {
                break;
            }
            if !per_col[col].contains(&n) {
                per_col[col].push(n);
                picked += 1;
            }
        }
    }
}

/// Assign each column's numbers (ascending within the column) to rows so
/// that both rows end with exactly 5 filled cells: first number to the
/// emptier row (tie → row 0, spill to the other row at 5), second number
/// to the cell the first left open.
fn place_rows(per_col: &ColumnPicks) -> Grid {
    let mut grid: Grid = [[None; TICKET_COLS]; TICKET_ROWS];
    let mut row_fill = [0usize; TICKET_ROWS];

    for (col, picks) in per_col.iter().enumerate() {
        let mut picks = picks.clone();
        picks.sort_unstable();
        for (i, &n) in picks.iter().enumerate() {
            let row = if i == 0 {
                let preferred = if row_fill[0] <= row_fill[1] { 0 } else { 1 };
                if row_fill[preferred] >= NUMBERS_PER_ROW {
                    1 - preferred
                } else {
                    preferred
                }
            } else if grid[0][col].is_none() {
                0
            } else {
                1
            };
            grid[row][col] = Some(n);
            row_fill[row] += 1;
        }
    }

    debug_assert_eq!(row_fill, [NUMBERS_PER_ROW; TICKET_ROWS]);
    grid
}

/// Ticket construction errors (scripted number sets)
#[derive(Debug, thiserror::Error)]
pub enum TicketError {
    #[error("expected {NUMBERS_PER_TICKET} numbers, got {0}")]
    WrongCount(usize),

    #[error("number {0} outside 1..={MAX_NUMBER}")]
    OutOfRange(u8),

    #[error("duplicate number {0}")]
    Duplicate(u8),

    #[error("more than {COLUMN_CAPACITY} numbers in column {column}")]
    ColumnOverflow { column: usize },
}
