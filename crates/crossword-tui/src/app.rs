use crate::fetcher::PuzzleDirectory;
use crate::render::{Hit, HitMap};
use crate::theme::Theme;
use crossterm::event::{
    Event as TermEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossword_core::{
    Action, Applied, Arrow, ClearScope, ClueMove, Event, FetchResponse, FetchTicket, PuzzleEntry,
    PuzzleId, Scope, Session, SessionStore, TimerHandle, TimerTick,
};
use tokio::sync::mpsc::UnboundedSender;

/// Everything the main loop waits on, from every source
#[derive(Debug)]
pub enum AppEvent {
    /// Terminal input from the reader thread
    Input(TermEvent),
    /// One second elapsed
    Tick(TimerTick),
    /// A puzzle file finished loading
    Fetched {
        ticket: FetchTicket,
        result: anyhow::Result<FetchResponse>,
    },
}

impl From<TimerTick> for AppEvent {
    fn from(tick: TimerTick) -> Self {
        AppEvent::Tick(tick)
    }
}

/// Result of handling an event
pub enum AppAction {
    Continue,
    Quit,
}

/// What a key press asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Puzzle(Event),
    /// Click the active cell, flipping direction where the cell allows it
    ToggleDirection,
    TogglePause,
    Reload,
    Quit,
}

/// Map a key press to a command
pub fn command_for_key(key: KeyEvent) -> Option<Command> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    let event = match key.code {
        KeyCode::Char('c') if ctrl => return Some(Command::Quit),
        KeyCode::Char('p') if ctrl => return Some(Command::TogglePause),
        KeyCode::Char('r') if ctrl => return Some(Command::Reload),
        KeyCode::Char(_) if ctrl => return None,
        KeyCode::Esc => return Some(Command::Quit),
        KeyCode::Char(' ') => return Some(Command::ToggleDirection),
        KeyCode::Char(c) if c.is_ascii_alphabetic() => Event::EnterGuess(c),

        KeyCode::Up => Event::MoveCursor(Arrow::Up),
        KeyCode::Down => Event::MoveCursor(Arrow::Down),
        KeyCode::Left => Event::MoveCursor(Arrow::Left),
        KeyCode::Right => Event::MoveCursor(Arrow::Right),
        KeyCode::Tab => Event::MoveClue(ClueMove::Next),
        KeyCode::BackTab => Event::MoveClue(ClueMove::Previous),
        KeyCode::Backspace | KeyCode::Delete => Event::RemoveGuess,

        KeyCode::F(1) => Event::Check(Scope::Cell),
        KeyCode::F(2) => Event::Check(Scope::Word),
        KeyCode::F(3) => Event::Check(Scope::Puzzle),
        KeyCode::F(5) => Event::Reveal(Scope::Cell),
        KeyCode::F(6) => Event::Reveal(Scope::Word),
        KeyCode::F(7) => Event::Reveal(Scope::Puzzle),
        KeyCode::F(9) => Event::Clear(ClearScope::Cell),
        KeyCode::F(10) => Event::Clear(ClearScope::Word),
        KeyCode::F(11) => Event::Clear(ClearScope::Puzzle),
        KeyCode::F(12) => Event::Clear(ClearScope::PuzzleAndTimer),
        _ => return None,
    };
    Some(Command::Puzzle(event))
}

/// The main application state
pub struct App {
    store: SessionStore,
    puzzle_id: PuzzleId,
    source: PuzzleDirectory,
    /// Fetch tasks report back on this queue
    events: UnboundedSender<AppEvent>,
    timer: TimerHandle,
    timer_running: bool,
    paused: bool,
    loading: bool,
    /// Color theme
    pub theme: Theme,
    /// Message to display
    pub message: Option<String>,
    /// Screen regions from the last render
    pub hits: HitMap,
}

impl App {
    pub fn new(
        puzzle_id: PuzzleId,
        source: PuzzleDirectory,
        events: UnboundedSender<AppEvent>,
        timer: TimerHandle,
        theme: Theme,
    ) -> Self {
        Self {
            store: SessionStore::new(),
            puzzle_id,
            source,
            events,
            timer,
            timer_running: false,
            paused: false,
            loading: false,
            theme,
            message: None,
            hits: HitMap::default(),
        }
    }

    pub fn puzzle_id(&self) -> &PuzzleId {
        &self.puzzle_id
    }

    pub fn source(&self) -> &PuzzleDirectory {
        &self.source
    }

    pub fn entry(&self) -> Option<&PuzzleEntry> {
        self.store.get(&self.puzzle_id)
    }

    pub fn session(&self) -> Option<&Session> {
        self.store.session(&self.puzzle_id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer_running
    }

    pub fn show_message(&mut self, msg: impl Into<String>) {
        self.message = Some(msg.into());
    }

    /// Load the puzzle in the background
    ///
    /// Starting a new fetch supersedes any still in flight.
    pub fn fetch(&mut self) {
        let ticket = self.store.begin_fetch(self.puzzle_id.clone());
        self.loading = true;

        let source = self.source.clone();
        let events = self.events.clone();
        tokio::spawn(async move {
            let result = source.fetch(ticket.puzzle_id()).await;
            // the receiver only goes away on shutdown
            let _ = events.send(AppEvent::Fetched { ticket, result });
        });
    }

    /// Handle one queued event
    pub fn handle(&mut self, event: AppEvent) -> AppAction {
        match event {
            AppEvent::Input(TermEvent::Key(key)) => return self.handle_key(key),
            AppEvent::Input(TermEvent::Mouse(mouse)) => self.handle_mouse(mouse),
            AppEvent::Input(_) => {}
            AppEvent::Tick(tick) => self.handle_tick(tick),
            AppEvent::Fetched { ticket, result } => self.receive_fetch(ticket, result),
        }
        AppAction::Continue
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        let Some(command) = command_for_key(key) else {
            return AppAction::Continue;
        };
        self.message = None;

        match command {
            Command::Quit => return AppAction::Quit,
            Command::Reload => {
                self.show_message("Reloading...");
                self.fetch();
            }
            Command::TogglePause => self.toggle_pause(),
            Command::ToggleDirection => {
                if let Some(cell) = self.session().map(Session::active_cell_number) {
                    self.dispatch(Event::CellClicked(cell));
                }
            }
            Command::Puzzle(event) => self.dispatch(event),
        }
        AppAction::Continue
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let event = match self.hits.hit(mouse.column, mouse.row) {
            Some(Hit::Cell(cell)) => Event::CellClicked(cell),
            Some(Hit::Clue(clue)) => Event::ClueClicked {
                direction: clue.direction,
                number: clue.number,
            },
            None => return,
        };
        self.message = None;
        self.dispatch(event);
    }

    fn handle_tick(&mut self, tick: TimerTick) {
        // ticks queued before a stop are dropped
        if !self.timer_running || tick.puzzle_id != self.puzzle_id {
            return;
        }
        self.apply_event(Event::TimerTick);
    }

    fn toggle_pause(&mut self) {
        match self.session() {
            Some(session) if !session.is_solved() => {}
            _ => return,
        }
        self.paused = !self.paused;
        tracing::debug!(target: "crossword::app", paused = self.paused, "pause toggled");
        if self.paused {
            self.show_message("Paused - Ctrl+P to resume");
        }
        self.sync_timer();
    }

    /// Run a solver event through the store, then bring the timer in line
    fn dispatch(&mut self, event: Event) {
        if self.paused {
            self.show_message("Paused - Ctrl+P to resume");
            return;
        }
        let was_solved = self.session().is_some_and(Session::is_solved);
        self.apply_event(event);

        if event == Event::Clear(ClearScope::PuzzleAndTimer) {
            self.stop_timer();
            self.show_message("Puzzle reset");
        }
        if let Some(session) = self.session() {
            if session.is_solved() && !was_solved {
                let msg = format!("Solved in {}!", session.elapsed_string());
                tracing::info!(target: "crossword::app", puzzle_id = %self.puzzle_id, seconds = session.timer(), "puzzle solved");
                self.show_message(msg);
            }
        }
        self.sync_timer();
    }

    fn apply_event(&mut self, event: Event) {
        let action = Action::Puzzle {
            puzzle_id: self.puzzle_id.clone(),
            event,
        };
        if let Err(err) = self.store.apply(action) {
            self.show_message(err.to_string());
        }
    }

    /// The timer runs exactly while an unsolved session is shown unpaused
    fn sync_timer(&mut self) {
        let should_run = !self.paused && self.session().is_some_and(|s| !s.is_solved());
        if should_run && !self.timer_running {
            self.timer.start(self.puzzle_id.clone());
            self.timer_running = true;
            self.apply_event(Event::TimerStart);
        } else if !should_run {
            self.stop_timer();
        }
    }

    fn stop_timer(&mut self) {
        if self.timer_running {
            self.timer.stop();
            self.timer_running = false;
            self.apply_event(Event::TimerStop);
        }
    }

    fn receive_fetch(&mut self, ticket: FetchTicket, result: anyhow::Result<FetchResponse>) {
        if !self.store.is_current(&ticket) {
            tracing::debug!(target: "crossword::app", puzzle_id = %ticket.puzzle_id(), "dropping superseded fetch");
            return;
        }
        let is_ours = ticket.puzzle_id() == &self.puzzle_id;
        if is_ours {
            self.loading = false;
        }

        let response = match result {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(target: "crossword::app", puzzle_id = %ticket.puzzle_id(), error = ?err, "failed to load puzzle");
                self.show_message(format!("Failed to load puzzle: {err:#}"));
                return;
            }
        };

        match self.store.apply(Action::FetchReceived { ticket, response }) {
            Ok(Applied::Installed) if is_ours => {
                self.paused = false;
                self.message = None;
                // a fresh session starts a fresh timer window
                self.stop_timer();
                self.sync_timer();
            }
            Ok(Applied::NotFound) if is_ours => self.stop_timer(),
            Ok(_) => {}
            Err(err) => self.show_message(format!("Invalid puzzle: {err}")),
        }
    }
}
