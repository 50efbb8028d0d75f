use crossterm::style::Color;

/// Color theme for the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    /// Theme name shown in the info panel
    pub name: &'static str,
    /// Background color
    pub bg: Color,
    /// Default text color
    pub fg: Color,
    /// Grid border color
    pub border: Color,
    /// Letter still in play
    pub letter: Color,
    /// Cursor cell background
    pub cursor_bg: Color,
    /// Selected cell background
    pub selecting_bg: Color,
    /// Selected cell letter
    pub selecting_fg: Color,
    /// Marker for cells on a found word's path
    pub found: Color,
    /// Success/complete color
    pub success: Color,
    /// Error color
    pub error: Color,
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
            name: "Dark",
            bg: Color::Rgb { r: 20, g: 22, b: 30 },
            fg: Color::Rgb { r: 230, g: 230, b: 240 },
            border: Color::Rgb { r: 70, g: 75, b: 90 },
            letter: Color::Rgb { r: 255, g: 255, b: 255 },
            cursor_bg: Color::Rgb { r: 45, g: 50, b: 70 },
            selecting_bg: Color::Rgb { r: 70, g: 90, b: 140 },
            selecting_fg: Color::Rgb { r: 255, g: 210, b: 100 },
            found: Color::Rgb { r: 60, g: 160, b: 90 },
            success: Color::Rgb { r: 90, g: 255, b: 130 },
            error: Color::Rgb { r: 255, g: 90, b: 90 },
            info: Color::Rgb { r: 160, g: 165, b: 185 },
            key: Color::Rgb { r: 255, g: 210, b: 100 },
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            name: "Light",
            bg: Color::Rgb { r: 248, g: 248, b: 252 },
            fg: Color::Rgb { r: 30, g: 30, b: 40 },
            border: Color::Rgb { r: 180, g: 180, b: 195 },
            letter: Color::Rgb { r: 0, g: 0, b: 0 },
            cursor_bg: Color::Rgb { r: 225, g: 228, b: 240 },
            selecting_bg: Color::Rgb { r: 180, g: 200, b: 255 },
            selecting_fg: Color::Rgb { r: 30, g: 60, b: 160 },
            found: Color::Rgb { r: 40, g: 150, b: 70 },
            success: Color::Rgb { r: 40, g: 160, b: 60 },
            error: Color::Rgb { r: 220, g: 50, b: 50 },
            info: Color::Rgb { r: 90, g: 90, b: 110 },
            key: Color::Rgb { r: 200, g: 120, b: 20 },
        }
    }

    /// High contrast theme
    pub fn high_contrast() -> Self {
        Self {
            name: "Contrast",
            bg: Color::Black,
            fg: Color::White,
            border: Color::Grey,
            letter: Color::White,
            cursor_bg: Color::DarkGrey,
            selecting_bg: Color::Blue,
            selecting_fg: Color::Yellow,
            found: Color::Green,
            success: Color::Green,
            error: Color::Red,
            info: Color::Grey,
            key: Color::Yellow,
        }
    }

    /// The theme after this one in the `t` rotation
    pub fn next(&self) -> Self {
        match self.name {
            "Dark" => Self::light(),
            "Light" => Self::high_contrast(),
            _ => Self::dark(),
        }
    }
}
