use ratatui::style::Color;

pub const COLOR_ACCENT: Color = Color::Rgb(120, 196, 118);
pub const COLOR_MUTED: Color = Color::Rgb(132, 142, 152);
pub const COLOR_BORDER: Color = Color::Rgb(72, 82, 92);
pub const COLOR_GOOD: Color = Color::Rgb(120, 196, 118);
pub const COLOR_WARN: Color = Color::Rgb(228, 178, 76);
