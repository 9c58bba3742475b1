//! Turns a raw definition into a fresh session.

use crate::error::DefinitionError;
use crate::raw::RawPuzzle;
use crate::session::Session;
use crate::types::{Cell, Clue, ClueRef, Clues, Direction};
use std::sync::Arc;

/// Build the initial session for a puzzle
///
/// Clue structures are derived from the grid, so re-running this on the same
/// definition always yields an identical session.
pub fn initialize(raw: impl Into<Arc<RawPuzzle>>) -> Result<Session, DefinitionError> {
    let raw = raw.into();
    let width = raw.width;

    if width == 0 || raw.cells.is_empty() {
        return Err(DefinitionError::EmptyGrid);
    }
    let expected = width * width;
    if raw.cells.len() != expected {
        return Err(DefinitionError::DimensionMismatch {
            width,
            expected,
            actual: raw.cells.len(),
        });
    }

    let mut cells = build_cells(&raw)?;
    let mut clues = detect_words(&mut cells, width);
    attach_clue_texts(&raw, &mut clues, cells.len())?;

    let default_clues: Vec<Option<ClueRef>> = cells
        .iter()
        .map(|cell| {
            cell.across_clue
                .map(|number| ClueRef {
                    direction: Direction::Across,
                    number,
                })
                .or_else(|| {
                    cell.down_clue.map(|number| ClueRef {
                        direction: Direction::Down,
                        number,
                    })
                })
        })
        .collect();

    let first_open = cells
        .iter()
        .find(|cell| !cell.is_block)
        .ok_or(DefinitionError::NoOpenCells)?;
    let active_cell_number = first_open.cell_number;
    let active_direction = if first_open.across_clue.is_some() {
        Direction::Across
    } else {
        Direction::Down
    };
    let available_cells = cells.iter().filter(|cell| !cell.is_block).count();

    tracing::debug!(
        target: "crossword_core::init",
        width,
        available_cells,
        clues = clues.len(),
        "puzzle initialized"
    );

    Ok(Session {
        cells: Arc::new(cells),
        width,
        clues: Arc::new(clues),
        default_clues: Arc::new(default_clues),
        active_cell_number,
        active_direction,
        filled_cells: 0,
        available_cells,
        solved: false,
        timer: 0,
        raw,
    })
}

fn build_cells(raw: &RawPuzzle) -> Result<Vec<Cell>, DefinitionError> {
    raw.cells
        .iter()
        .enumerate()
        .map(|(cell_number, raw_cell)| {
            let solution = if raw_cell.is_block {
                None
            } else {
                let value = raw_cell
                    .solution
                    .as_deref()
                    .ok_or(DefinitionError::MissingSolution { cell: cell_number })?;
                Some(parse_letter(value).ok_or_else(|| DefinitionError::InvalidSolution {
                    cell: cell_number,
                    value: value.to_string(),
                })?)
            };

            Ok(Cell {
                cell_number,
                is_block: raw_cell.is_block,
                solution,
                guess: None,
                solved: false,
                across_clue: None,
                down_clue: None,
            })
        })
        .collect()
}

fn parse_letter(value: &str) -> Option<char> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some(c.to_ascii_uppercase()),
        _ => None,
    }
}

/// Number word starts in reading order and record each cell's clues
fn detect_words(cells: &mut [Cell], width: usize) -> Clues {
    let open: Vec<bool> = cells.iter().map(|cell| !cell.is_block).collect();
    let mut clues = Clues::default();
    let mut number = 0;

    for n in 0..cells.len() {
        if !open[n] {
            continue;
        }
        let (row, col) = (n / width, n % width);

        let starts_across = (col == 0 || !open[n - 1]) && col + 1 < width && open[n + 1];
        let starts_down = (row == 0 || !open[n - width]) && row + 1 < width && open[n + width];

        if !starts_across && !starts_down {
            continue;
        }
        number += 1;

        if starts_across {
            let span: Vec<usize> = (n..row * width + width)
                .take_while(|&m| open[m])
                .collect();
            for &m in &span {
                cells[m].across_clue = Some(number);
            }
            clues.insert(Clue {
                number,
                direction: Direction::Across,
                text: String::new(),
                cell_numbers: span,
            });
        }

        if starts_down {
            let span: Vec<usize> = (n..cells.len())
                .step_by(width)
                .take_while(|&m| open[m])
                .collect();
            for &m in &span {
                cells[m].down_clue = Some(number);
            }
            clues.insert(Clue {
                number,
                direction: Direction::Down,
                text: String::new(),
                cell_numbers: span,
            });
        }
    }

    clues
}

fn attach_clue_texts(
    raw: &RawPuzzle,
    clues: &mut Clues,
    cell_count: usize,
) -> Result<(), DefinitionError> {
    for raw_clue in &raw.clues {
        let (number, direction) = (raw_clue.number, raw_clue.direction);

        if let Some(&cell) = raw_clue.cell_numbers.iter().find(|&&c| c >= cell_count) {
            return Err(DefinitionError::ClueOutOfRange {
                number,
                direction,
                cell,
            });
        }

        let clue = clues
            .get_mut(direction, number)
            .ok_or(DefinitionError::UnknownClue { number, direction })?;

        if !raw_clue.cell_numbers.is_empty() && raw_clue.cell_numbers != clue.cell_numbers {
            return Err(DefinitionError::ClueSpanMismatch { number, direction });
        }
        clue.text.clone_from(&raw_clue.text);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raw::{RawCell, RawClue};

    #[test]
    fn test_open_grid_numbering() {
        let session = initialize(RawPuzzle::from_rows(&["ABC", "DEF", "GHI"])).unwrap();
        let clues = session.clues();

        let across: Vec<(u32, Vec<usize>)> = clues
            .list(Direction::Across)
            .map(|c| (c.number, c.cell_numbers.clone()))
            .collect();
        assert_eq!(
            across,
            vec![(1, vec![0, 1, 2]), (4, vec![3, 4, 5]), (5, vec![6, 7, 8])]
        );

        let down: Vec<(u32, Vec<usize>)> = clues
            .list(Direction::Down)
            .map(|c| (c.number, c.cell_numbers.clone()))
            .collect();
        assert_eq!(
            down,
            vec![(1, vec![0, 3, 6]), (2, vec![1, 4, 7]), (3, vec![2, 5, 8])]
        );

        assert_eq!(session.cells()[4].across_clue, Some(4));
        assert_eq!(session.cells()[4].down_clue, Some(2));
    }

    #[test]
    fn test_initial_state() {
        let session = initialize(RawPuzzle::from_rows(&["ABC", "DEF", "GHI"])).unwrap();
        assert_eq!(session.active_cell_number(), 0);
        assert_eq!(session.active_direction(), Direction::Across);
        assert_eq!(session.filled_cells(), 0);
        assert_eq!(session.available_cells(), 9);
        assert_eq!(session.timer(), 0);
        assert!(!session.is_solved());
    }

    #[test]
    fn test_blocks_split_words() {
        // A B #
        // C # D
        // E F G
        let session = initialize(RawPuzzle::from_rows(&["AB#", "C#D", "EFG"])).unwrap();
        let cells = session.cells();

        assert!(cells[2].is_block);
        assert_eq!(cells[2].solution, None);
        // single-letter runs are not words
        assert_eq!(cells[5].across_clue, None);
        assert_eq!(cells[1].down_clue, None);

        let across: Vec<Vec<usize>> = session
            .clues()
            .list(Direction::Across)
            .map(|c| c.cell_numbers.clone())
            .collect();
        assert_eq!(across, vec![vec![0, 1], vec![6, 7, 8]]);

        let down: Vec<Vec<usize>> = session
            .clues()
            .list(Direction::Down)
            .map(|c| c.cell_numbers.clone())
            .collect();
        assert_eq!(down, vec![vec![0, 3, 6], vec![5, 8]]);
        assert_eq!(session.available_cells(), 7);
    }

    #[test]
    fn test_first_cell_without_across_starts_down() {
        // A #
        // B C
        let session = initialize(RawPuzzle::from_rows(&["A#", "BC"])).unwrap();
        assert_eq!(session.active_cell_number(), 0);
        assert_eq!(session.active_direction(), Direction::Down);
    }

    #[test]
    fn test_leading_block_skipped() {
        let session = initialize(RawPuzzle::from_rows(&["#AB", "CDE", "FGH"])).unwrap();
        assert_eq!(session.active_cell_number(), 1);
    }

    #[test]
    fn test_default_clues_prefer_across() {
        let session = initialize(RawPuzzle::from_rows(&["A#", "BC"])).unwrap();
        let defaults = session.default_clues();
        assert_eq!(defaults[0].map(|c| c.direction), Some(Direction::Down));
        assert_eq!(defaults[1], None);
        assert_eq!(defaults[2].map(|c| c.direction), Some(Direction::Across));
    }

    #[test]
    fn test_clue_texts_attached() {
        let mut raw = RawPuzzle::from_rows(&["AB", "CD"]);
        raw.clues.push(RawClue {
            number: 1,
            direction: Direction::Down,
            text: "Top left down".to_string(),
            cell_numbers: vec![0, 2],
        });
        let session = initialize(raw).unwrap();
        assert_eq!(
            session.clues().get(Direction::Down, 1).unwrap().text,
            "Top left down"
        );
        assert_eq!(session.clues().get(Direction::Across, 1).unwrap().text, "");
    }

    #[test]
    fn test_dimension_mismatch() {
        let mut raw = RawPuzzle::from_rows(&["AB", "CD"]);
        raw.cells.pop();
        assert_eq!(
            initialize(raw),
            Err(DefinitionError::DimensionMismatch {
                width: 2,
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_empty_grid() {
        let raw = RawPuzzle {
            width: 0,
            cells: Vec::new(),
            clues: Vec::new(),
        };
        assert_eq!(initialize(raw), Err(DefinitionError::EmptyGrid));
    }

    #[test]
    fn test_clue_out_of_range() {
        let mut raw = RawPuzzle::from_rows(&["AB", "CD"]);
        raw.clues.push(RawClue {
            number: 1,
            direction: Direction::Across,
            text: String::new(),
            cell_numbers: vec![0, 9],
        });
        assert_eq!(
            initialize(raw),
            Err(DefinitionError::ClueOutOfRange {
                number: 1,
                direction: Direction::Across,
                cell: 9
            })
        );
    }

    #[test]
    fn test_unknown_and_mismatched_clues() {
        let mut raw = RawPuzzle::from_rows(&["AB", "CD"]);
        raw.clues.push(RawClue {
            number: 7,
            direction: Direction::Across,
            text: String::new(),
            cell_numbers: Vec::new(),
        });
        assert_eq!(
            initialize(raw),
            Err(DefinitionError::UnknownClue {
                number: 7,
                direction: Direction::Across
            })
        );

        let mut raw = RawPuzzle::from_rows(&["AB", "CD"]);
        raw.clues.push(RawClue {
            number: 1,
            direction: Direction::Across,
            text: String::new(),
            cell_numbers: vec![0, 2],
        });
        assert_eq!(
            initialize(raw),
            Err(DefinitionError::ClueSpanMismatch {
                number: 1,
                direction: Direction::Across
            })
        );
    }

    #[test]
    fn test_bad_solutions() {
        let mut raw = RawPuzzle::from_rows(&["AB", "CD"]);
        raw.cells[1] = RawCell {
            is_block: false,
            solution: None,
        };
        assert_eq!(
            initialize(raw),
            Err(DefinitionError::MissingSolution { cell: 1 })
        );

        let mut raw = RawPuzzle::from_rows(&["AB", "CD"]);
        raw.cells[3].solution = Some("7".to_string());
        assert!(matches!(
            initialize(raw),
            Err(DefinitionError::InvalidSolution { cell: 3, .. })
        ));
    }

    #[test]
    fn test_lowercase_solution_normalized() {
        let session = initialize(RawPuzzle::from_rows(&["ab", "cd"])).unwrap();
        assert_eq!(session.cells()[0].solution, Some('A'));
    }

    #[test]
    fn test_all_blocks() {
        assert_eq!(
            initialize(RawPuzzle::from_rows(&["##", "##"])),
            Err(DefinitionError::NoOpenCells)
        );
    }
}
