//! Cursor movement rules.
//!
//! Every function here is pure: it reads the grid and the current cursor and
//! returns where the cursor should go next. Movement that would leave the grid
//! or land on a block holds the cursor in place.

use crate::types::{Arrow, Cell, Clue, ClueMove, Clues, Direction};

/// Active cell and orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub cell_number: usize,
    pub direction: Direction,
}

impl Cursor {
    pub fn new(cell_number: usize, direction: Direction) -> Self {
        Self {
            cell_number,
            direction,
        }
    }
}

/// Neighbor of `cell_number` along `direction`, offset by `delta`
///
/// Returns `None` when the neighbor is off the grid or a block.
pub fn step(
    cells: &[Cell],
    width: usize,
    cell_number: usize,
    direction: Direction,
    delta: isize,
) -> Option<usize> {
    let (row, col) = (cell_number / width, cell_number % width);
    let (row, col) = match direction {
        Direction::Across => (row, col.checked_add_signed(delta)?),
        Direction::Down => (row.checked_add_signed(delta)?, col),
    };
    if row >= width || col >= width {
        return None;
    }

    cells
        .get(row * width + col)
        .filter(|cell| !cell.is_block)
        .map(|cell| cell.cell_number)
}

/// Where the cursor lands after a letter is entered
pub fn guess_advance(cells: &[Cell], width: usize, cursor: Cursor) -> usize {
    step(cells, width, cursor.cell_number, cursor.direction, 1).unwrap_or(cursor.cell_number)
}

/// Arrow key movement
///
/// The arrow's axis becomes the active direction, then the cursor steps once
/// along it if the neighbor is open.
pub fn move_arrow(cells: &[Cell], width: usize, cursor: Cursor, arrow: Arrow) -> Cursor {
    let direction = arrow.axis();
    let cell_number = step(cells, width, cursor.cell_number, direction, arrow.delta())
        .unwrap_or(cursor.cell_number);
    Cursor::new(cell_number, direction)
}

/// Jump to the start of the next or previous clue, wrapping within a direction
pub fn move_clue(cells: &[Cell], clues: &Clues, cursor: Cursor, clue_move: ClueMove) -> Cursor {
    let direction = if clues.is_empty(cursor.direction) {
        cursor.direction.other()
    } else {
        cursor.direction
    };
    let list: Vec<&Clue> = clues.list(direction).collect();
    if list.is_empty() {
        return cursor;
    }
    let len = list.len();

    let current = cells
        .get(cursor.cell_number)
        .and_then(|cell| cell.clue(direction))
        .and_then(|number| list.iter().position(|clue| clue.number == number));

    let target = match (current, clue_move) {
        (Some(i), ClueMove::Next) => (i + 1) % len,
        (Some(i), ClueMove::Previous) => (i + len - 1) % len,
        // Not inside a word in this direction: pick by reading order
        (None, ClueMove::Next) => list
            .iter()
            .position(|clue| clue.start() > cursor.cell_number)
            .unwrap_or(0),
        (None, ClueMove::Previous) => list
            .iter()
            .rposition(|clue| clue.start() < cursor.cell_number)
            .unwrap_or(len - 1),
    };

    Cursor::new(list[target].start(), direction)
}

/// The cell whose guess a backspace should clear
///
/// A filled active cell is cleared in place; an empty one clears the cell
/// behind it.
pub fn remove_guess_target(cells: &[Cell], width: usize, cursor: Cursor) -> usize {
    let has_guess = cells
        .get(cursor.cell_number)
        .is_some_and(|cell| cell.guess.is_some());
    if has_guess {
        return cursor.cell_number;
    }
    step(cells, width, cursor.cell_number, cursor.direction, -1).unwrap_or(cursor.cell_number)
}

/// Clicking a cell
///
/// Clicking the active cell toggles direction when the cell belongs to a word
/// in the other direction. Clicking another cell moves there, keeping the
/// direction if the cell has a word in it.
pub fn click_cell(cells: &[Cell], cursor: Cursor, clicked: usize) -> Cursor {
    let cell = match cells.get(clicked) {
        Some(cell) if !cell.is_block => cell,
        _ => return cursor,
    };
    let other = cursor.direction.other();

    if clicked == cursor.cell_number {
        return if cell.clue(other).is_some() {
            Cursor::new(clicked, other)
        } else {
            cursor
        };
    }

    let direction = if cell.clue(cursor.direction).is_none() && cell.clue(other).is_some() {
        other
    } else {
        cursor.direction
    };
    Cursor::new(clicked, direction)
}

/// Clicking a clue in the clue list
pub fn click_clue(clues: &Clues, cursor: Cursor, direction: Direction, number: u32) -> Cursor {
    match clues.get(direction, number) {
        Some(clue) => Cursor::new(clue.start(), direction),
        None => cursor,
    }
}
