use ratatui::style::Color;

/// Default grid width in cells.
pub const DEFAULT_GRID_WIDTH: u16 = 20;

/// Default grid height in cells.
pub const DEFAULT_GRID_HEIGHT: u16 = 20;

/// Default simulation tick interval in milliseconds.
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Default score awarded per food consumed.
pub const DEFAULT_POINTS_PER_FOOD: u32 = 10;

/// Logical grid dimensions passed through the engine as a named type.
///
/// Width vs. height stays unambiguous at every call site, unlike an
/// anonymous `(u16, u16)` tuple.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_GRID_WIDTH,
            height: DEFAULT_GRID_HEIGHT,
        }
    }
}

/// Tunable engine parameters resolved from defaults, settings file, and CLI.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct EngineConfig {
    pub grid: GridSize,
    pub points_per_food: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            grid: GridSize::default(),
            points_per_food: DEFAULT_POINTS_PER_FOOD,
        }
    }
}

/// A color theme applied to all visual elements.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub border_fg: Color,
    pub hud_text: Color,
    pub hud_accent: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

/// Classic green snake on dark, matching the original canvas colors.
pub const THEME_CLASSIC: Theme = Theme {
    name: "classic",
    snake_head: Color::White,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    border_fg: Color::White,
    hud_text: Color::Gray,
    hud_accent: Color::Green,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Ocean cyan theme.
pub const THEME_OCEAN: Theme = Theme {
    name: "ocean",
    snake_head: Color::White,
    snake_body: Color::Cyan,
    snake_tail: Color::DarkGray,
    food: Color::Yellow,
    border_fg: Color::Cyan,
    hud_text: Color::Gray,
    hud_accent: Color::Cyan,
    menu_title: Color::Cyan,
    menu_footer: Color::DarkGray,
};

/// Neon magenta theme.
pub const THEME_NEON: Theme = Theme {
    name: "neon",
    snake_head: Color::White,
    snake_body: Color::Magenta,
    snake_tail: Color::DarkGray,
    food: Color::Yellow,
    border_fg: Color::Magenta,
    hud_text: Color::Gray,
    hud_accent: Color::Magenta,
    menu_title: Color::Magenta,
    menu_footer: Color::DarkGray,
};

/// All built-in themes in cycle order.
pub const THEMES: &[Theme] = &[THEME_CLASSIC, THEME_OCEAN, THEME_NEON];

/// Looks up a built-in theme by its case-insensitive name.
#[must_use]
pub fn theme_by_name(name: &str) -> Option<&'static Theme> {
    THEMES
        .iter()
        .find(|theme| theme.name.eq_ignore_ascii_case(name))
}

/// Glyph drawn for the snake head.
pub const GLYPH_SNAKE_HEAD: &str = "█";

/// Glyph drawn for snake body segments.
pub const GLYPH_SNAKE_BODY: &str = "█";

/// Glyph drawn for the tail segment.
pub const GLYPH_SNAKE_TAIL: &str = "▓";

/// Glyph drawn for food.
pub const GLYPH_FOOD: &str = "●";
