//! Solving session and the reducer that drives it.

use crate::init::initialize;
use crate::navigation::{self, Cursor};
use crate::raw::RawPuzzle;
use crate::types::{Arrow, Cell, ClearScope, Clue, ClueMove, ClueRef, Clues, Direction, Scope};
use crate::validation;
use std::sync::Arc;

/// Something the solver (or the timer) did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    /// A letter typed into the active cell
    EnterGuess(char),
    MoveCursor(Arrow),
    MoveClue(ClueMove),
    /// Backspace
    RemoveGuess,
    CellClicked(usize),
    ClueClicked { direction: Direction, number: u32 },
    Check(Scope),
    Reveal(Scope),
    Clear(ClearScope),
    TimerTick,
    /// Signal for the timer task; leaves the session untouched
    TimerStart,
    /// Signal for the timer task; leaves the session untouched
    TimerStop,
}

/// Solving state for one puzzle
///
/// Sessions are values: `reduce` returns a new session and never touches the
/// one it was called on. Grid, clue tables and the raw definition sit behind
/// `Arc`s, so unchanged parts are shared between successive states.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub(crate) cells: Arc<Vec<Cell>>,
    pub(crate) width: usize,
    pub(crate) clues: Arc<Clues>,
    pub(crate) default_clues: Arc<Vec<Option<ClueRef>>>,
    pub(crate) active_cell_number: usize,
    pub(crate) active_direction: Direction,
    pub(crate) filled_cells: usize,
    pub(crate) available_cells: usize,
    pub(crate) solved: bool,
    pub(crate) timer: u64,
    pub(crate) raw: Arc<RawPuzzle>,
}

impl Session {
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, cell_number: usize) -> Option<&Cell> {
        self.cells.get(cell_number)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn clues(&self) -> &Clues {
        &self.clues
    }

    /// Per cell: across clue if any, else down clue
    pub fn default_clues(&self) -> &[Option<ClueRef>] {
        &self.default_clues
    }

    pub fn active_cell_number(&self) -> usize {
        self.active_cell_number
    }

    pub fn active_direction(&self) -> Direction {
        self.active_direction
    }

    pub fn cursor(&self) -> Cursor {
        Cursor::new(self.active_cell_number, self.active_direction)
    }

    /// The clue containing the cursor
    pub fn active_clue(&self) -> Option<&Clue> {
        validation::active_clue(&self.cells, &self.clues, &self.default_clues, self.cursor())
    }

    pub fn filled_cells(&self) -> usize {
        self.filled_cells
    }

    pub fn available_cells(&self) -> usize {
        self.available_cells
    }

    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Elapsed seconds
    pub fn timer(&self) -> u64 {
        self.timer
    }

    /// Format the elapsed time as MM:SS
    pub fn elapsed_string(&self) -> String {
        let mins = self.timer / 60;
        let secs = self.timer % 60;
        format!("{:02}:{:02}", mins, secs)
    }

    /// The definition this session was built from
    pub fn raw(&self) -> &RawPuzzle {
        &self.raw
    }

    /// Whether both sessions share the same grid allocation
    ///
    /// True means no cell changed between the two states.
    pub fn same_cells(&self, other: &Session) -> bool {
        Arc::ptr_eq(&self.cells, &other.cells)
    }

    /// Apply one event, producing the next session
    pub fn reduce(&self, event: Event) -> Session {
        let mut next = self.clone();
        match event {
            Event::EnterGuess(letter) => next.enter_guess(letter),
            Event::MoveCursor(arrow) => {
                next.set_cursor(navigation::move_arrow(
                    &self.cells,
                    self.width,
                    self.cursor(),
                    arrow,
                ));
            }
            Event::MoveClue(clue_move) => {
                next.set_cursor(navigation::move_clue(
                    &self.cells,
                    &self.clues,
                    self.cursor(),
                    clue_move,
                ));
            }
            Event::RemoveGuess => next.remove_guess(),
            Event::CellClicked(cell_number) => {
                next.set_cursor(navigation::click_cell(&self.cells, self.cursor(), cell_number));
            }
            Event::ClueClicked { direction, number } => {
                next.set_cursor(navigation::click_clue(
                    &self.clues,
                    self.cursor(),
                    direction,
                    number,
                ));
            }
            Event::Check(scope) => {
                let targets = self.scope_cells(scope);
                next.replace_cells(validation::check(&self.cells, &targets));
            }
            Event::Reveal(scope) => {
                let targets = self.scope_cells(scope);
                next.replace_cells(validation::reveal(&self.cells, &targets));
            }
            Event::Clear(scope) => match scope.cells_scope() {
                Some(scope) => {
                    let targets = self.scope_cells(scope);
                    next.replace_cells(validation::clear(&self.cells, &targets));
                }
                None => return self.reset(),
            },
            Event::TimerTick => next.timer += 1,
            Event::TimerStart | Event::TimerStop => {}
        }
        next
    }

    fn scope_cells(&self, scope: Scope) -> Vec<usize> {
        validation::scope_cells(
            &self.cells,
            &self.clues,
            &self.default_clues,
            self.cursor(),
            scope,
        )
    }

    fn set_cursor(&mut self, cursor: Cursor) {
        self.active_cell_number = cursor.cell_number;
        self.active_direction = cursor.direction;
    }

    fn enter_guess(&mut self, letter: char) {
        if !letter.is_ascii_alphabetic() {
            tracing::debug!(target: "crossword_core::session", ?letter, "ignoring non-letter guess");
            return;
        }
        let letter = letter.to_ascii_uppercase();
        let active = self.active_cell_number;
        let next_cell = navigation::guess_advance(&self.cells, self.width, self.cursor());

        let cell = &self.cells[active];
        if !cell.solved && cell.guess != Some(letter) {
            if cell.guess.is_none() {
                self.filled_cells += 1;
            }
            Arc::make_mut(&mut self.cells)[active].guess = Some(letter);
        }

        self.active_cell_number = next_cell;
        self.refresh_solved();
    }

    fn remove_guess(&mut self) {
        let target = navigation::remove_guess_target(&self.cells, self.width, self.cursor());

        let cell = &self.cells[target];
        if !cell.solved && cell.guess.is_some() {
            self.filled_cells -= 1;
            Arc::make_mut(&mut self.cells)[target].guess = None;
        }

        self.active_cell_number = target;
        self.refresh_solved();
    }

    fn replace_cells(&mut self, cells: Vec<Cell>) {
        if cells == *self.cells {
            return;
        }
        self.cells = Arc::new(cells);
        self.filled_cells = validation::count_filled(&self.cells);
        self.refresh_solved();
    }

    fn refresh_solved(&mut self) {
        self.solved = self.filled_cells == self.available_cells
            && validation::is_puzzle_solved(&self.cells);
    }

    /// Rebuild from the stored definition: guesses and timer back to zero
    fn reset(&self) -> Session {
        match initialize(Arc::clone(&self.raw)) {
            Ok(session) => {
                tracing::info!(target: "crossword_core::session", "session reset");
                session
            }
            Err(err) => {
                // The definition already initialized once, so this is unreachable in practice
                tracing::warn!(target: "crossword_core::session", %err, "reset failed");
                self.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        initialize(RawPuzzle::from_rows(&["ABC", "DEF", "GHI"])).unwrap()
    }

    #[test]
    fn test_reduce_leaves_previous_untouched() {
        let before = session();
        let after = before.reduce(Event::EnterGuess('a'));

        assert_eq!(before.cells()[0].guess, None);
        assert_eq!(after.cells()[0].guess, Some('A'));
        assert!(!before.same_cells(&after));
    }

    #[test]
    fn test_cursor_events_share_cells() {
        let before = session();
        let after = before.reduce(Event::MoveCursor(Arrow::Right));
        assert_eq!(after.active_cell_number(), 1);
        assert!(before.same_cells(&after));
    }

    #[test]
    fn test_non_letter_ignored() {
        let before = session();
        let after = before.reduce(Event::EnterGuess('7'));
        assert_eq!(before, after);
    }

    #[test]
    fn test_overwrite_keeps_fill_count() {
        let s = session()
            .reduce(Event::EnterGuess('X'))
            .reduce(Event::CellClicked(0))
            .reduce(Event::EnterGuess('A'));
        assert_eq!(s.filled_cells(), 1);
        assert_eq!(s.cells()[0].guess, Some('A'));
    }

    #[test]
    fn test_guess_on_solved_cell_is_locked() {
        let s = session()
            .reduce(Event::Reveal(Scope::Cell))
            .reduce(Event::EnterGuess('Z'));
        assert_eq!(s.cells()[0].guess, Some('A'));
        assert_eq!(s.filled_cells(), 1);
        // cursor still advances
        assert_eq!(s.active_cell_number(), 1);
    }

    #[test]
    fn test_remove_guess_steps_back() {
        let s = session()
            .reduce(Event::EnterGuess('A'))
            .reduce(Event::EnterGuess('B'));
        assert_eq!(s.active_cell_number(), 2);
        assert_eq!(s.filled_cells(), 2);

        // cell 2 is empty: clear cell 1 and move there
        let s = s.reduce(Event::RemoveGuess);
        assert_eq!(s.active_cell_number(), 1);
        assert_eq!(s.cells()[1].guess, None);
        assert_eq!(s.filled_cells(), 1);

        // cell 1 now empty: clear cell 0
        let s = s.reduce(Event::RemoveGuess);
        assert_eq!(s.active_cell_number(), 0);
        assert_eq!(s.filled_cells(), 0);

        // nothing behind cell 0
        let s = s.reduce(Event::RemoveGuess);
        assert_eq!(s.active_cell_number(), 0);
        assert_eq!(s.filled_cells(), 0);
    }

    #[test]
    fn test_remove_guess_skips_solved() {
        let s = session()
            .reduce(Event::Reveal(Scope::Cell))
            .reduce(Event::CellClicked(1))
            .reduce(Event::RemoveGuess);
        assert_eq!(s.active_cell_number(), 0);
        assert_eq!(s.cells()[0].guess, Some('A'));
        assert_eq!(s.filled_cells(), 1);
    }

    #[test]
    fn test_reveal_puzzle_solves() {
        let s = session().reduce(Event::Reveal(Scope::Puzzle));
        assert!(s.is_solved());
        assert_eq!(s.filled_cells(), 9);
    }

    #[test]
    fn test_reveal_word() {
        let s = session()
            .reduce(Event::CellClicked(4))
            .reduce(Event::Reveal(Scope::Word));
        assert_eq!(s.filled_cells(), 3);
        assert!(s.cells()[3].solved && s.cells()[4].solved && s.cells()[5].solved);
        assert!(!s.is_solved());
    }

    #[test]
    fn test_clear_word_keeps_revealed() {
        let s = session()
            .reduce(Event::EnterGuess('A'))
            .reduce(Event::Reveal(Scope::Cell))
            .reduce(Event::EnterGuess('C'));
        assert_eq!(s.filled_cells(), 2);

        let s = s.reduce(Event::Clear(ClearScope::Word));
        assert_eq!(s.cells()[1].guess, Some('B'));
        assert_eq!(s.cells()[0].guess, None);
        assert_eq!(s.filled_cells(), 1);
    }

    #[test]
    fn test_clue_events() {
        let s = session().reduce(Event::ClueClicked {
            direction: Direction::Down,
            number: 2,
        });
        assert_eq!(s.cursor(), Cursor::new(1, Direction::Down));
        assert_eq!(s.active_clue().map(|c| c.number), Some(2));

        let s = s.reduce(Event::MoveClue(ClueMove::Next));
        assert_eq!(s.cursor(), Cursor::new(2, Direction::Down));
    }

    #[test]
    fn test_timer_events() {
        let s = session()
            .reduce(Event::TimerStart)
            .reduce(Event::TimerTick)
            .reduce(Event::TimerTick)
            .reduce(Event::TimerStop);
        assert_eq!(s.timer(), 2);
        assert_eq!(s.elapsed_string(), "00:02");
    }

    #[test]
    fn test_elapsed_string_minutes() {
        let mut s = session();
        for _ in 0..125 {
            s = s.reduce(Event::TimerTick);
        }
        assert_eq!(s.elapsed_string(), "02:05");
    }
}
