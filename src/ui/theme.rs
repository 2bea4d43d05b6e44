use ratatui::style::Color;

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub status_bg: Color,
    pub page_id: Color,
    pub variable: Color,
    pub size: Color,
    pub highlight: Color, // Page found by `get`
    pub usage_full: Color,
    pub usage_free: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    status_bg: Color::Rgb(50, 50, 70),
    page_id: Color::Rgb(249, 226, 175),   // Yellow
    variable: Color::Rgb(148, 226, 213),  // Cyan/teal
    size: Color::Rgb(250, 179, 135),      // Orange
    highlight: Color::Rgb(245, 194, 231), // Pink
    usage_full: Color::Rgb(137, 180, 250),
    usage_free: Color::Rgb(69, 71, 90),
};
