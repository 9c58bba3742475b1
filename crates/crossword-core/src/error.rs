use crate::types::Direction;
use thiserror::Error;

/// Reasons a raw puzzle definition cannot become a session
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionError {
    #[error("puzzle has no cells")]
    EmptyGrid,
    #[error("grid width {width} needs {expected} cells, found {actual}")]
    DimensionMismatch {
        width: usize,
        expected: usize,
        actual: usize,
    },
    #[error("cell {cell} is open but has no solution")]
    MissingSolution { cell: usize },
    #[error("cell {cell} has invalid solution {value:?}")]
    InvalidSolution { cell: usize, value: String },
    #[error("clue {number} {direction} references cell {cell} outside the grid")]
    ClueOutOfRange {
        number: u32,
        direction: Direction,
        cell: usize,
    },
    #[error("clue {number} {direction} does not start a word in the grid")]
    UnknownClue { number: u32, direction: Direction },
    #[error("clue {number} {direction} does not match the word in the grid")]
    ClueSpanMismatch { number: u32, direction: Direction },
    #[error("puzzle has no open cells")]
    NoOpenCells,
}
