use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Open square background
    pub cell_bg: Color,
    /// Black squares
    pub block: Color,
    /// Word-start numbers
    pub number: Color,
    /// Player guesses
    pub filled: Color,
    /// Letters locked in by a reveal
    pub revealed: Color,
    /// Active cell background
    pub selected_bg: Color,
    /// Cells of the active word, and the crossing clue in the list
    pub highlight_bg: Color,
    /// Error color
    pub error: Color,
    /// Solved grid color
    pub success: Color,
    /// Timer/info text color
    pub info: Color,
    /// Key binding text color
    pub key: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            cell_bg: Color::Rgb { r: 44, g: 48, b: 62 },
            block: Color::Rgb { r: 8, g: 8, b: 12 },
            number: Color::Rgb { r: 140, g: 150, b: 180 },
            filled: Color::Rgb { r: 80, g: 180, b: 255 },
            revealed: Color::Rgb { r: 255, g: 170, b: 90 },
            selected_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            highlight_bg: Color::Rgb { r: 52, g: 62, b: 88 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            cell_bg: Color::Rgb { r: 255, g: 255, b: 255 },
            block: Color::Rgb { r: 30, g: 30, b: 40 },
            number: Color::Rgb { r: 110, g: 110, b: 130 },
            filled: Color::Rgb { r: 30, g: 100, b: 200 },
            revealed: Color::Rgb { r: 200, g: 110, b: 20 },
            selected_bg: Color::Rgb { r: 180, g: 200, b: 255 },
            highlight_bg: Color::Rgb { r: 222, g: 228, b: 246 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }
}
