//! Crossword solving engine.
//!
//! A [`Session`] tracks one solver's progress through a puzzle: guesses, the
//! cursor, elapsed time and whether the grid is solved. Sessions change only by
//! reducing [`Event`]s, and the [`SessionStore`] keeps one per puzzle. The
//! [`timer`] module runs the once-per-second tick task.

pub mod error;
pub mod init;
pub mod navigation;
pub mod raw;
pub mod session;
pub mod store;
pub mod timer;
pub mod types;
pub mod validation;


pub use error::DefinitionError;
pub use init::initialize;
pub use navigation::Cursor;
pub use raw::{RawCell, RawClue, RawPuzzle};
pub use session::{Event, Session};
pub use store::{Action, Applied, FetchResponse, FetchTicket, PuzzleEntry, SessionStore};
pub use timer::{spawn_timer, TimerHandle, TimerTick, TICK_INTERVAL};
pub use types::{Arrow, Cell, ClearScope, Clue, ClueMove, ClueRef, Clues, Direction, PuzzleId, Scope};
