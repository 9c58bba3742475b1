use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Orientation of a word in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Across,
    Down,
}

impl Direction {
    /// The perpendicular direction
    pub fn other(self) -> Direction {
        match self {
            Direction::Across => Direction::Down,
            Direction::Down => Direction::Across,
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Across => write!(f, "Across"),
            Direction::Down => write!(f, "Down"),
        }
    }
}

/// Arrow key movement, relative to the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    /// The word direction this arrow travels along
    pub fn axis(self) -> Direction {
        match self {
            Arrow::Left | Arrow::Right => Direction::Across,
            Arrow::Up | Arrow::Down => Direction::Down,
        }
    }

    /// Step offset along the axis
    pub fn delta(self) -> isize {
        match self {
            Arrow::Left | Arrow::Up => -1,
            Arrow::Right | Arrow::Down => 1,
        }
    }
}

/// Tab / Shift-Tab between clues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClueMove {
    Next,
    Previous,
}

/// Breadth of a check or reveal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// Only the active cell
    Cell,
    /// Every cell of the active clue
    Word,
    /// Every cell in the grid
    Puzzle,
}

/// Breadth of a clear; `PuzzleAndTimer` rebuilds the whole session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearScope {
    Cell,
    Word,
    Puzzle,
    PuzzleAndTimer,
}

impl ClearScope {
    /// Cells to clear, or `None` when the whole session is rebuilt
    pub fn cells_scope(self) -> Option<Scope> {
        match self {
            ClearScope::Cell => Some(Scope::Cell),
            ClearScope::Word => Some(Scope::Word),
            ClearScope::Puzzle => Some(Scope::Puzzle),
            ClearScope::PuzzleAndTimer => None,
        }
    }
}

impl From<Scope> for ClearScope {
    fn from(scope: Scope) -> Self {
        match scope {
            Scope::Cell => ClearScope::Cell,
            Scope::Word => ClearScope::Word,
            Scope::Puzzle => ClearScope::Puzzle,
        }
    }
}

/// One grid square
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    /// `row * width + col`
    pub cell_number: usize,
    pub is_block: bool,
    /// Uppercase answer letter, `None` for blocks
    pub solution: Option<char>,
    /// Player's uppercase letter
    pub guess: Option<char>,
    /// Revealed cells are locked until a full reset
    pub solved: bool,
    pub across_clue: Option<u32>,
    pub down_clue: Option<u32>,
}

impl Cell {
    /// Clue number this cell belongs to in `direction`
    pub fn clue(&self, direction: Direction) -> Option<u32> {
        match direction {
            Direction::Across => self.across_clue,
            Direction::Down => self.down_clue,
        }
    }

    pub fn is_filled(&self) -> bool {
        !self.is_block && self.guess.is_some()
    }

    pub fn is_correct(&self) -> bool {
        self.is_block || (self.guess.is_some() && self.guess == self.solution)
    }
}

/// A word entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    pub number: u32,
    pub direction: Direction,
    pub text: String,
    /// First to last
    pub cell_numbers: Vec<usize>,
}

impl Clue {
    pub fn start(&self) -> usize {
        self.cell_numbers[0]
    }
}

/// Identifies one clue without borrowing it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClueRef {
    pub direction: Direction,
    pub number: u32,
}

/// Clue lookup by direction and number, ordered by number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Clues {
    across: BTreeMap<u32, Clue>,
    down: BTreeMap<u32, Clue>,
}

impl Clues {
    pub(crate) fn insert(&mut self, clue: Clue) {
        match clue.direction {
            Direction::Across => self.across.insert(clue.number, clue),
            Direction::Down => self.down.insert(clue.number, clue),
        };
    }

    pub(crate) fn get_mut(&mut self, direction: Direction, number: u32) -> Option<&mut Clue> {
        match direction {
            Direction::Across => self.across.get_mut(&number),
            Direction::Down => self.down.get_mut(&number),
        }
    }

    pub fn get(&self, direction: Direction, number: u32) -> Option<&Clue> {
        self.map(direction).get(&number)
    }

    pub fn lookup(&self, clue: ClueRef) -> Option<&Clue> {
        self.get(clue.direction, clue.number)
    }

    /// Clues in one direction, ascending by number
    pub fn list(&self, direction: Direction) -> impl DoubleEndedIterator<Item = &Clue> {
        self.map(direction).values()
    }

    pub fn is_empty(&self, direction: Direction) -> bool {
        self.map(direction).is_empty()
    }

    pub fn len(&self) -> usize {
        self.across.len() + self.down.len()
    }

    fn map(&self, direction: Direction) -> &BTreeMap<u32, Clue> {
        match direction {
            Direction::Across => &self.across,
            Direction::Down => &self.down,
        }
    }
}

/// Stable key for a session in the store
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PuzzleId(String);

impl PuzzleId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PuzzleId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for PuzzleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
