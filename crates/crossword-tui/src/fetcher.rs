//! Loads puzzle definitions from a directory of JSON files.

use anyhow::Context;
use crossword_core::{FetchResponse, PuzzleId, RawPuzzle};
use std::io::ErrorKind;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct PuzzleDirectory {
    root: PathBuf,
}

impl PuzzleDirectory {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Read `<root>/<puzzle_id>.json`
    ///
    /// A missing file is a normal `NotFound`; unreadable or malformed files are
    /// errors.
    pub async fn fetch(&self, puzzle_id: &PuzzleId) -> anyhow::Result<FetchResponse> {
        let id = puzzle_id.as_str();
        if id.is_empty() || id.contains(['/', '\\']) || id.starts_with('.') {
            tracing::warn!(target: "crossword::fetcher", %puzzle_id, "refusing puzzle id outside the directory");
            return Ok(FetchResponse::NotFound);
        }

        let path = self.root.join(format!("{id}.json"));
        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(target: "crossword::fetcher", path = %path.display(), "no puzzle file");
                return Ok(FetchResponse::NotFound);
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read {}", path.display()));
            }
        };

        let raw: RawPuzzle = serde_json::from_str(&json)
            .with_context(|| format!("invalid puzzle file {}", path.display()))?;
        tracing::debug!(target: "crossword::fetcher", path = %path.display(), width = raw.width, "puzzle file read");
        Ok(FetchResponse::Found(raw))
    }
}
