//! Sessions keyed by puzzle identity.
//!
//! The store is owned by a single coordinator and is the only place sessions
//! change. Fetches are ticketed so that only the newest request for a puzzle
//! ever installs a session.

use crate::error::DefinitionError;
use crate::init::initialize;
use crate::raw::RawPuzzle;
use crate::session::{Event, Session};
use crate::types::PuzzleId;
use std::collections::HashMap;

/// What the puzzle source answered
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchResponse {
    Found(RawPuzzle),
    NotFound,
}

/// Issued when a fetch starts; presented again with its response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    puzzle_id: PuzzleId,
    generation: u64,
}

impl FetchTicket {
    pub fn puzzle_id(&self) -> &PuzzleId {
        &self.puzzle_id
    }
}

/// Per-puzzle state held by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PuzzleEntry {
    Ready(Session),
    /// The source has no such puzzle
    NotFound,
}

impl PuzzleEntry {
    pub fn session(&self) -> Option<&Session> {
        match self {
            PuzzleEntry::Ready(session) => Some(session),
            PuzzleEntry::NotFound => None,
        }
    }
}

/// Everything the store reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    FetchReceived {
        ticket: FetchTicket,
        response: FetchResponse,
    },
    Puzzle {
        puzzle_id: PuzzleId,
        event: Event,
    },
}

/// What applying an action did to the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    /// A session was installed or replaced by a fetch response
    Installed,
    /// The puzzle is recorded as missing
    NotFound,
    /// An existing session moved to its next state
    Updated,
    /// Nothing changed (stale ticket, unknown puzzle, missing puzzle)
    Ignored,
}

#[derive(Debug, Default)]
pub struct SessionStore {
    entries: HashMap<PuzzleId, PuzzleEntry>,
    latest_fetch: HashMap<PuzzleId, u64>,
    next_generation: u64,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, puzzle_id: &PuzzleId) -> Option<&PuzzleEntry> {
        self.entries.get(puzzle_id)
    }

    pub fn session(&self, puzzle_id: &PuzzleId) -> Option<&Session> {
        self.get(puzzle_id).and_then(PuzzleEntry::session)
    }

    /// Start a fetch, superseding any in flight for the same puzzle
    pub fn begin_fetch(&mut self, puzzle_id: PuzzleId) -> FetchTicket {
        self.next_generation += 1;
        let generation = self.next_generation;
        self.latest_fetch.insert(puzzle_id.clone(), generation);
        tracing::debug!(target: "crossword_core::store", %puzzle_id, generation, "fetch started");
        FetchTicket {
            puzzle_id,
            generation,
        }
    }

    /// Whether `ticket` is still the newest fetch for its puzzle
    ///
    /// Lets callers drop transport errors from superseded fetches the same way
    /// the store drops their responses.
    pub fn is_current(&self, ticket: &FetchTicket) -> bool {
        self.latest_fetch.get(&ticket.puzzle_id) == Some(&ticket.generation)
    }

    /// Apply one action
    ///
    /// A definition error from the newest fetch is returned and leaves the
    /// previous entry in place.
    pub fn apply(&mut self, action: Action) -> Result<Applied, DefinitionError> {
        match action {
            Action::FetchReceived { ticket, response } => self.receive_fetch(ticket, response),
            Action::Puzzle { puzzle_id, event } => Ok(self.dispatch(&puzzle_id, event)),
        }
    }

    fn receive_fetch(
        &mut self,
        ticket: FetchTicket,
        response: FetchResponse,
    ) -> Result<Applied, DefinitionError> {
        let latest = self.latest_fetch.get(&ticket.puzzle_id).copied();
        if latest != Some(ticket.generation) {
            tracing::debug!(
                target: "crossword_core::store",
                puzzle_id = %ticket.puzzle_id,
                generation = ticket.generation,
                "discarding superseded fetch"
            );
            return Ok(Applied::Ignored);
        }
        self.latest_fetch.remove(&ticket.puzzle_id);

        match response {
            FetchResponse::NotFound => {
                tracing::info!(target: "crossword_core::store", puzzle_id = %ticket.puzzle_id, "puzzle not found");
                self.entries.insert(ticket.puzzle_id, PuzzleEntry::NotFound);
                Ok(Applied::NotFound)
            }
            FetchResponse::Found(raw) => match initialize(raw) {
                Ok(session) => {
                    tracing::info!(
                        target: "crossword_core::store",
                        puzzle_id = %ticket.puzzle_id,
                        width = session.width(),
                        "session installed"
                    );
                    self.entries
                        .insert(ticket.puzzle_id, PuzzleEntry::Ready(session));
                    Ok(Applied::Installed)
                }
                Err(err) => {
                    tracing::warn!(
                        target: "crossword_core::store",
                        puzzle_id = %ticket.puzzle_id,
                        %err,
                        "rejected puzzle definition"
                    );
                    Err(err)
                }
            },
        }
    }

    fn dispatch(&mut self, puzzle_id: &PuzzleId, event: Event) -> Applied {
        match self.entries.get_mut(puzzle_id) {
            Some(PuzzleEntry::Ready(session)) => {
                *session = session.reduce(event);
                Applied::Updated
            }
            Some(PuzzleEntry::NotFound) | None => {
                tracing::debug!(target: "crossword_core::store", %puzzle_id, ?event, "no session for event");
                Applied::Ignored
            }
        }
    }
}
