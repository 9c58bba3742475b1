use clap::Parser;
use std::path::PathBuf;

/// Solve crosswords in the terminal
#[derive(Debug, Parser)]
#[command(name = "crossword", version, about)]
pub struct Cli {
    /// Puzzle to open, looked up as `<puzzle>.json` in the puzzle directory
    pub puzzle: String,

    /// Directory holding puzzle definitions
    #[arg(long, value_name = "DIR")]
    pub puzzle_dir: Option<PathBuf>,

    /// Where to write logs (the terminal is taken over by the grid)
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Use the light color theme
    #[arg(long)]
    pub light: bool,
}

impl Cli {
    pub fn puzzle_dir(&self) -> PathBuf {
        self.puzzle_dir
            .clone()
            .unwrap_or_else(|| data_dir().join("puzzles"))
    }

    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| data_dir().join("crossword.log"))
    }
}

fn data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("crossword")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["crossword", "monday"]).unwrap();
        assert_eq!(cli.puzzle, "monday");
        assert!(!cli.light);
        assert!(cli.puzzle_dir().ends_with("crossword/puzzles"));
        assert!(cli.log_file().ends_with("crossword/crossword.log"));
    }

    #[test]
    fn test_overrides() {
        let cli = Cli::try_parse_from([
            "crossword",
            "tuesday",
            "--puzzle-dir",
            "/tmp/puzzles",
            "--log-file",
            "/tmp/cw.log",
            "--light",
        ])
        .unwrap();
        assert_eq!(cli.puzzle_dir(), PathBuf::from("/tmp/puzzles"));
        assert_eq!(cli.log_file(), PathBuf::from("/tmp/cw.log"));
        assert!(cli.light);
    }

    #[test]
    fn test_puzzle_required() {
        assert!(Cli::try_parse_from(["crossword"]).is_err());
    }
}
