use crate::app::App;
use crate::theme::Theme;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Color, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use crossword_core::{Cell, ClueRef, Direction, PuzzleEntry, Session};
use std::io;

/// Screen columns per grid square
pub const CELL_WIDTH: u16 = 4;
/// Screen rows per grid square: number line, then letter line
pub const CELL_HEIGHT: u16 = 2;

const GRID_X: u16 = 2;
const GRID_Y: u16 = 3;

/// What sits under a mouse click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Cell(usize),
    Clue(ClueRef),
}

#[derive(Debug, Clone, Copy)]
struct GridArea {
    x: u16,
    y: u16,
    columns: usize,
    rows: usize,
}

#[derive(Debug, Clone, Copy)]
struct ClueLine {
    x: u16,
    y: u16,
    width: u16,
    clue: ClueRef,
}

/// Clickable regions drawn by the last frame
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    grid: Option<GridArea>,
    clues: Vec<ClueLine>,
}

impl HitMap {
    pub fn hit(&self, column: u16, row: u16) -> Option<Hit> {
        if let Some(grid) = self.grid {
            if column >= grid.x && row >= grid.y {
                let col = usize::from((column - grid.x) / CELL_WIDTH);
                let line = usize::from((row - grid.y) / CELL_HEIGHT);
                if col < grid.columns && line < grid.rows {
                    return Some(Hit::Cell(line * grid.columns + col));
                }
            }
        }
        self.clues
            .iter()
            .find(|l| l.y == row && column >= l.x && column < l.x + l.width)
            .map(|l| Hit::Clue(l.clue))
    }
}

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(
        stdout,
        Hide,
        SetBackgroundColor(app.theme.bg),
        Clear(ClearType::All)
    )?;

    let mut hits = HitMap::default();
    match app.entry() {
        Some(PuzzleEntry::Ready(session)) => {
            render_game_screen(stdout, app, session, &mut hits, term_width, term_height)?
        }
        Some(PuzzleEntry::NotFound) => render_not_found(stdout, app, term_width, term_height)?,
        None => render_loading(stdout, app, term_width, term_height)?,
    }

    if let Some(ref msg) = app.message {
        render_message(stdout, &app.theme, msg, term_width)?;
    }

    execute!(stdout, Show)?;
    app.hits = hits;
    Ok(())
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &App,
    session: &Session,
    hits: &mut HitMap,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let columns = session.width();
    let rows = session.cells().len() / columns;
    let grid_width = columns as u16 * CELL_WIDTH;
    let grid_height = rows as u16 * CELL_HEIGHT;

    render_header(stdout, app, session, GRID_X, 1)?;

    render_grid(stdout, &app.theme, session, app.is_paused(), GRID_X, GRID_Y)?;
    hits.grid = Some(GridArea {
        x: GRID_X,
        y: GRID_Y,
        columns,
        rows,
    });

    let below = GRID_Y + grid_height + 1;
    render_active_clue(stdout, &app.theme, session, GRID_X, below, term_width)?;
    render_controls(stdout, &app.theme, GRID_X, below + 2)?;

    let clues_x = GRID_X + grid_width + 4;
    if clues_x + 12 < term_width {
        render_clue_lists(
            stdout,
            &app.theme,
            session,
            hits,
            clues_x,
            GRID_Y,
            term_width - clues_x - 1,
            term_height,
        )?;
    }

    Ok(())
}

fn render_header(
    stdout: &mut io::Stdout,
    app: &App,
    session: &Session,
    x: u16,
    y: u16,
) -> io::Result<()> {
    let theme = &app.theme;

    let (status, status_color) = if session.is_solved() {
        ("SOLVED", theme.success)
    } else if app.is_paused() {
        ("PAUSED", theme.key)
    } else {
        ("", theme.info)
    };
    let clock_color = if app.is_timer_running() {
        theme.fg
    } else {
        theme.number
    };

    execute!(
        stdout,
        MoveTo(x, y),
        SetBackgroundColor(theme.bg),
        SetForegroundColor(theme.key),
        Print("═══ CROSSWORD ═══ "),
        SetForegroundColor(theme.fg),
        Print(app.puzzle_id()),
        SetForegroundColor(theme.info),
        Print("   Time: "),
        SetForegroundColor(clock_color),
        Print(session.elapsed_string()),
        SetForegroundColor(theme.info),
        Print(format!(
            "   Filled: {}/{}   ",
            session.filled_cells(),
            session.available_cells()
        )),
        SetForegroundColor(status_color),
        Print(status)
    )?;

    Ok(())
}

fn render_grid(
    stdout: &mut io::Stdout,
    theme: &Theme,
    session: &Session,
    hide_letters: bool,
    x: u16,
    y: u16,
) -> io::Result<()> {
    let columns = session.width();
    let word: &[usize] = session
        .active_clue()
        .map(|clue| clue.cell_numbers.as_slice())
        .unwrap_or(&[]);

    for cell in session.cells() {
        let col = (cell.cell_number % columns) as u16;
        let row = (cell.cell_number / columns) as u16;
        let cx = x + col * CELL_WIDTH;
        let cy = y + row * CELL_HEIGHT;

        if cell.is_block {
            execute!(
                stdout,
                SetBackgroundColor(theme.block),
                MoveTo(cx, cy),
                Print("    "),
                MoveTo(cx, cy + 1),
                Print("    ")
            )?;
            continue;
        }

        let bg = if cell.cell_number == session.active_cell_number() {
            theme.selected_bg
        } else if word.contains(&cell.cell_number) {
            theme.highlight_bg
        } else {
            theme.cell_bg
        };
        let fg = if session.is_solved() {
            theme.success
        } else if cell.solved {
            theme.revealed
        } else {
            theme.filled
        };

        let label = word_start_number(session, cell)
            .map(|n| n.to_string())
            .unwrap_or_default();
        let letter = match cell.guess {
            Some(letter) if !hide_letters => letter,
            _ => ' ',
        };

        execute!(
            stdout,
            SetBackgroundColor(bg),
            MoveTo(cx, cy),
            SetForegroundColor(theme.number),
            Print(format!("{:<4}", label)),
            MoveTo(cx, cy + 1),
            SetForegroundColor(fg),
            Print(format!(" {}  ", letter))
        )?;
    }

    execute!(stdout, SetBackgroundColor(theme.bg))?;
    Ok(())
}

/// Number printed in the corner of a square that starts a word
fn word_start_number(session: &Session, cell: &Cell) -> Option<u32> {
    [Direction::Across, Direction::Down]
        .into_iter()
        .filter_map(|direction| {
            let number = cell.clue(direction)?;
            let clue = session.clues().get(direction, number)?;
            (clue.start() == cell.cell_number).then_some(number)
        })
        .next()
}

fn render_active_clue(
    stdout: &mut io::Stdout,
    theme: &Theme,
    session: &Session,
    x: u16,
    y: u16,
    term_width: u16,
) -> io::Result<()> {
    let Some(clue) = session.active_clue() else {
        return Ok(());
    };
    let tag = format!("{}{} ", clue.number, direction_letter(clue.direction));
    let room = usize::from(term_width.saturating_sub(x + 1)).saturating_sub(tag.len());

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print(&tag),
        SetForegroundColor(theme.fg),
        Print(fit(&clue.text, room))
    )?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn render_clue_lists(
    stdout: &mut io::Stdout,
    theme: &Theme,
    session: &Session,
    hits: &mut HitMap,
    x: u16,
    y: u16,
    width: u16,
    term_height: u16,
) -> io::Result<()> {
    let active = session.active_clue().map(|clue| ClueRef {
        direction: clue.direction,
        number: clue.number,
    });
    let crossing = session
        .cell(session.active_cell_number())
        .and_then(|cell| {
            let direction = session.active_direction().other();
            cell.clue(direction)
                .map(|number| ClueRef { direction, number })
        });

    let mut line = y;
    for direction in [Direction::Across, Direction::Down] {
        if line + 1 >= term_height {
            break;
        }
        execute!(
            stdout,
            MoveTo(x, line),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.key),
            Print(direction.to_string().to_uppercase())
        )?;
        line += 1;

        for clue in session.clues().list(direction) {
            if line + 1 >= term_height {
                break;
            }
            let clue_ref = ClueRef {
                direction,
                number: clue.number,
            };
            let bg = if Some(clue_ref) == active {
                theme.selected_bg
            } else if Some(clue_ref) == crossing {
                theme.highlight_bg
            } else {
                theme.bg
            };
            let text = fit(&format!("{:>3} {}", clue.number, clue.text), usize::from(width));
            execute!(
                stdout,
                MoveTo(x, line),
                SetBackgroundColor(bg),
                SetForegroundColor(theme.fg),
                Print(&text)
            )?;
            hits.clues.push(ClueLine {
                x,
                y: line,
                width,
                clue: clue_ref,
            });
            line += 1;
        }
        line += 1;
    }

    execute!(stdout, SetBackgroundColor(theme.bg))?;
    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, theme: &Theme, x: u16, y: u16) -> io::Result<()> {
    let controls = [
        ("A-Z", "Guess"),
        ("Arrows", "Move"),
        ("Tab/S-Tab", "Next/prev clue"),
        ("Space", "Flip direction"),
        ("Bksp", "Erase"),
        ("F1-F3", "Check cell/word/all"),
        ("F5-F7", "Reveal cell/word/all"),
        ("F9-F11", "Clear cell/word/all"),
        ("F12", "Reset with timer"),
        ("^P", "Pause"),
        ("^R", "Reload"),
        ("Esc", "Quit"),
    ];

    // 3 columns of 4
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 4;
        let row = i % 4;
        let cx = x + (col as u16) * 32;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>9}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_loading(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let text = if app.is_loading() {
        format!("Loading {}...", app.puzzle_id())
    } else {
        format!("Could not load {} (Ctrl+R to retry, Esc to quit)", app.puzzle_id())
    };
    render_centered(stdout, &text, app.theme.info, term_width, term_height)
}

fn render_not_found(
    stdout: &mut io::Stdout,
    app: &App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let text = format!(
        "No puzzle named {} in {}",
        app.puzzle_id(),
        app.source().root().display()
    );
    render_centered(stdout, &text, app.theme.error, term_width, term_height)?;
    execute!(
        stdout,
        MoveTo(1, term_height.saturating_sub(1)),
        SetForegroundColor(app.theme.info),
        Print("Ctrl+R to retry, Esc to quit")
    )?;
    Ok(())
}

fn render_centered(
    stdout: &mut io::Stdout,
    text: &str,
    color: Color,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    let text = fit(text, usize::from(term_width.saturating_sub(2)));
    let x = term_width.saturating_sub(text.chars().count() as u16) / 2;
    execute!(
        stdout,
        MoveTo(x, term_height / 2),
        SetForegroundColor(color),
        Print(text)
    )?;
    Ok(())
}

fn render_message(stdout: &mut io::Stdout, theme: &Theme, msg: &str, term_width: u16) -> io::Result<()> {
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.chars().count() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.selected_bg),
        Print(&padded),
        SetBackgroundColor(theme.bg)
    )?;

    Ok(())
}

fn direction_letter(direction: Direction) -> char {
    match direction {
        Direction::Across => 'A',
        Direction::Down => 'D',
    }
}

/// Truncate to `width` characters, marking the cut
fn fit(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(width - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossword_core::{initialize, RawPuzzle};

    fn map() -> HitMap {
        HitMap {
            grid: Some(GridArea {
                x: 2,
                y: 3,
                columns: 3,
                rows: 3,
            }),
            clues: vec![ClueLine {
                x: 20,
                y: 4,
                width: 10,
                clue: ClueRef {
                    direction: Direction::Down,
                    number: 2,
                },
            }],
        }
    }

    #[test]
    fn test_hit_cells() {
        let hits = map();
        assert_eq!(hits.hit(2, 3), Some(Hit::Cell(0)));
        // second column, letter line of the second row
        assert_eq!(hits.hit(7, 6), Some(Hit::Cell(4)));
        assert_eq!(hits.hit(13, 8), Some(Hit::Cell(8)));
        assert_eq!(hits.hit(14, 3), None);
        assert_eq!(hits.hit(1, 3), None);
        assert_eq!(hits.hit(2, 9), None);
    }

    #[test]
    fn test_hit_clue_lines() {
        let hits = map();
        let down2 = ClueRef {
            direction: Direction::Down,
            number: 2,
        };
        assert_eq!(hits.hit(20, 4), Some(Hit::Clue(down2)));
        assert_eq!(hits.hit(29, 4), Some(Hit::Clue(down2)));
        assert_eq!(hits.hit(30, 4), None);
        assert_eq!(hits.hit(20, 5), None);
    }

    #[test]
    fn test_empty_map_hits_nothing() {
        assert_eq!(HitMap::default().hit(0, 0), None);
    }

    #[test]
    fn test_word_start_numbers() {
        let session = initialize(RawPuzzle::from_rows(&["AB#", "CDE", "#FG"])).unwrap();
        let numbers: Vec<Option<u32>> = session
            .cells()
            .iter()
            .map(|cell| word_start_number(&session, cell))
            .collect();
        assert_eq!(numbers[0], Some(1));
        assert_eq!(numbers[1], Some(2));
        assert_eq!(numbers[3], Some(3));
        assert_eq!(numbers[4], None);
        assert_eq!(numbers[5], Some(4));
        assert_eq!(numbers[7], Some(5));
        assert_eq!(numbers[8], None);
    }

    #[test]
    fn test_fit() {
        assert_eq!(fit("short", 10), "short");
        assert_eq!(fit("truncated", 5), "trun…");
        assert_eq!(fit("x", 0), "");
    }
}
