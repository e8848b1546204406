use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub comment: Color, // Grey
    pub error: Color,   // Red
    pub info: Color,    // Cyan, for the key-binding hint line
    pub command: Color, // Green, for the prompt line
    pub border_focused: Color,
    pub border_normal: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    comment: Color::Rgb(108, 112, 134),
    error: Color::Rgb(243, 139, 168),
    info: Color::Rgb(137, 220, 235),
    command: Color::Rgb(166, 227, 161),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
};
