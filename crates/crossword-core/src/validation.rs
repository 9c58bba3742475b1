//! Check, reveal and clear at cell, word or puzzle scope.
//!
//! Solved cells are never touched by check or clear, and reveal leaves them
//! as they are.

use crate::navigation::Cursor;
use crate::types::{Cell, Clue, ClueRef, Clues, Scope};

/// The clue the cursor is in: its word in the active direction, or the
/// cell's default clue when it has none
pub fn active_clue<'a>(
    cells: &[Cell],
    clues: &'a Clues,
    default_clues: &[Option<ClueRef>],
    cursor: Cursor,
) -> Option<&'a Clue> {
    let cell = cells.get(cursor.cell_number)?;
    cell.clue(cursor.direction)
        .and_then(|number| clues.get(cursor.direction, number))
        .or_else(|| {
            default_clues
                .get(cursor.cell_number)
                .copied()
                .flatten()
                .and_then(|clue| clues.lookup(clue))
        })
}

/// Cell numbers covered by `scope`, blocks excluded
pub fn scope_cells(
    cells: &[Cell],
    clues: &Clues,
    default_clues: &[Option<ClueRef>],
    cursor: Cursor,
    scope: Scope,
) -> Vec<usize> {
    match scope {
        Scope::Cell => cells
            .get(cursor.cell_number)
            .filter(|cell| !cell.is_block)
            .map(|cell| vec![cell.cell_number])
            .unwrap_or_default(),
        Scope::Word => match active_clue(cells, clues, default_clues, cursor) {
            Some(clue) => clue.cell_numbers.clone(),
            // a lone cell outside every word is its own word
            None => scope_cells(cells, clues, default_clues, cursor, Scope::Cell),
        },
        Scope::Puzzle => cells
            .iter()
            .filter(|cell| !cell.is_block)
            .map(|cell| cell.cell_number)
            .collect(),
    }
}

/// Clear every wrong guess in `targets`
pub fn check(cells: &[Cell], targets: &[usize]) -> Vec<Cell> {
    update(cells, targets, |cell| {
        if !cell.solved && cell.guess.is_some() && cell.guess != cell.solution {
            cell.guess = None;
        }
    })
}

/// Fill in and lock the answer for every cell in `targets`
pub fn reveal(cells: &[Cell], targets: &[usize]) -> Vec<Cell> {
    update(cells, targets, |cell| {
        if !cell.solved {
            cell.guess = cell.solution;
            cell.solved = true;
        }
    })
}

/// Remove every unlocked guess in `targets`
pub fn clear(cells: &[Cell], targets: &[usize]) -> Vec<Cell> {
    update(cells, targets, |cell| {
        if !cell.solved {
            cell.guess = None;
        }
    })
}

/// Open cells currently holding a guess
pub fn count_filled(cells: &[Cell]) -> usize {
    cells.iter().filter(|cell| cell.is_filled()).count()
}

/// Every open cell's guess matches its solution
pub fn is_puzzle_solved(cells: &[Cell]) -> bool {
    cells.iter().all(Cell::is_correct)
}

fn update(cells: &[Cell], targets: &[usize], apply: impl Fn(&mut Cell)) -> Vec<Cell> {
    let mut next = cells.to_vec();
    for &n in targets {
        if let Some(cell) = next.get_mut(n).filter(|cell| !cell.is_block) {
            apply(cell);
        }
    }
    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::init::initialize;
    use crate::raw::RawPuzzle;
    use crate::session::Session;
    use crate::types::Direction;

    fn session() -> Session {
        initialize(RawPuzzle::from_rows(&["AB#", "C#D", "EFG"])).unwrap()
    }

    fn with_guesses(cells: &[Cell], guesses: &[(usize, char)]) -> Vec<Cell> {
        let mut cells = cells.to_vec();
        for &(n, g) in guesses {
            cells[n].guess = Some(g);
        }
        cells
    }

    #[test]
    fn test_scope_cells() {
        let s = session();
        let args = (s.cells(), s.clues(), s.default_clues());

        let cursor = Cursor::new(7, Direction::Across);
        assert_eq!(scope_cells(args.0, args.1, args.2, cursor, Scope::Cell), vec![7]);
        assert_eq!(scope_cells(args.0, args.1, args.2, cursor, Scope::Word), vec![6, 7, 8]);
        assert_eq!(
            scope_cells(args.0, args.1, args.2, cursor, Scope::Puzzle),
            vec![0, 1, 3, 5, 6, 7, 8]
        );

        // cell 3 has no across word, so its down word is used
        let cursor = Cursor::new(3, Direction::Across);
        assert_eq!(scope_cells(args.0, args.1, args.2, cursor, Scope::Word), vec![0, 3, 6]);
    }

    #[test]
    fn test_check_clears_only_wrong_guesses() {
        let s = session();
        let cells = with_guesses(s.cells(), &[(0, 'A'), (1, 'X'), (6, 'Q')]);

        let checked = check(&cells, &[0, 1, 3]);
        assert_eq!(checked[0].guess, Some('A'));
        assert_eq!(checked[1].guess, None);
        assert_eq!(checked[3].guess, None);
        // outside scope
        assert_eq!(checked[6].guess, Some('Q'));
        assert!(checked.iter().all(|c| !c.solved));
    }

    #[test]
    fn test_reveal_locks_and_is_idempotent() {
        let s = session();
        let cells = with_guesses(s.cells(), &[(0, 'Z')]);

        let once = reveal(&cells, &[0, 1]);
        assert_eq!(once[0].guess, Some('A'));
        assert_eq!(once[1].guess, Some('B'));
        assert!(once[0].solved && once[1].solved);

        let twice = reveal(&once, &[0, 1]);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_clear_skips_solved() {
        let s = session();
        let cells = reveal(s.cells(), &[0]);
        let cells = with_guesses(&cells, &[(1, 'B'), (3, 'C')]);

        let cleared = clear(&cells, &[0, 1, 3]);
        assert_eq!(cleared[0].guess, Some('A'));
        assert_eq!(cleared[1].guess, None);
        assert_eq!(cleared[3].guess, None);
    }

    #[test]
    fn test_blocks_never_targeted() {
        let s = session();
        let revealed = reveal(s.cells(), &[2, 4]);
        assert_eq!(revealed[2].guess, None);
        assert!(!revealed[4].solved);
    }

    #[test]
    fn test_solved_detection() {
        let s = session();
        assert!(!is_puzzle_solved(s.cells()));

        let all = scope_cells(
            s.cells(),
            s.clues(),
            s.default_clues(),
            s.cursor(),
            Scope::Puzzle,
        );
        let revealed = reveal(s.cells(), &all);
        assert!(is_puzzle_solved(&revealed));
        assert_eq!(count_filled(&revealed), 7);
    }
}
