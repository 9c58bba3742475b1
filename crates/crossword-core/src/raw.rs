//! Wire shape of a puzzle definition as delivered by the puzzle source.

use crate::types::Direction;
use serde::{Deserialize, Serialize};

/// A puzzle definition before initialization
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPuzzle {
    pub width: usize,
    pub cells: Vec<RawCell>,
    #[serde(default)]
    pub clues: Vec<RawClue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawCell {
    #[serde(default)]
    pub is_block: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawClue {
    pub number: u32,
    pub direction: Direction,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub cell_numbers: Vec<usize>,
}

impl RawPuzzle {
    /// Build a definition from rows of letters, `#` marking a block
    ///
    /// Rows must all have the same length as the number of rows. Clue texts are
    /// left empty.
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.len();
        let cells = rows
            .iter()
            .flat_map(|row| row.chars())
            .map(|c| {
                if c == '#' {
                    RawCell {
                        is_block: true,
                        solution: None,
                    }
                } else {
                    RawCell {
                        is_block: false,
                        solution: Some(c.to_string()),
                    }
                }
            })
            .collect();

        Self {
            width,
            cells,
            clues: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case() {
        let json = serde_json::json!({
            "width": 2,
            "cells": [
                {"isBlock": false, "solution": "a"},
                {"isBlock": false, "solution": "B"},
                {"isBlock": true},
                {"solution": "C"}
            ],
            "clues": [
                {"number": 1, "direction": "across", "text": "Start", "cellNumbers": [0, 1]}
            ]
        });

        let raw: RawPuzzle = serde_json::from_value(json).unwrap();
        assert_eq!(raw.width, 2);
        assert!(raw.cells[2].is_block);
        assert!(!raw.cells[3].is_block);
        assert_eq!(raw.clues[0].direction, Direction::Across);
        assert_eq!(raw.clues[0].cell_numbers, vec![0, 1]);
    }

    #[test]
    fn test_from_rows() {
        let raw = RawPuzzle::from_rows(&["AB", "#C"]);
        assert_eq!(raw.width, 2);
        assert_eq!(raw.cells.len(), 4);
        assert!(raw.cells[2].is_block);
        assert_eq!(raw.cells[3].solution.as_deref(), Some("C"));
    }
}
