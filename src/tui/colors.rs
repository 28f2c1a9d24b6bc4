//! Color constants for the terminal dashboard.

use ratatui::style::Color;

use crate::fields::Priority;

/// High priority
pub const DARK_RED: Color = Color::Rgb(170, 30, 30);
/// Medium priority
pub const GOLD: Color = Color::Rgb(255, 215, 0);
/// Low priority
pub const DARK_GREEN: Color = Color::Rgb(0, 110, 0);
/// Header and status bar background
pub const INK: Color = Color::Rgb(40, 44, 70);

pub fn priority_color(p: Priority) -> Color {
    match p {
        Priority::High => DARK_RED,
        Priority::Medium => GOLD,
        Priority::Low => DARK_GREEN,
    }
}
