use crate::color::{Rgb, rgb_to_hex};
use crate::config::devbox_no_color_override;
use crossterm::style::Color;
use std::io::IsTerminal;

/// Check if terminal supports color output
pub fn supports_color() -> bool {
    // Honor devbox-specific override for disabling color output
    if let Some(no_color_override) = devbox_no_color_override() {
        return !no_color_override;
    }

    if !std::io::stdout().is_terminal() {
        return false;
    }

    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    true
}

/// Relative luminosity in 0.0..=1.0
pub fn calculate_luminosity(rgb: Rgb) -> f64 {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    0.299 * r + 0.587 * g + 0.114 * b
}

/// Text color that stays readable on top of `background`
pub fn contrasting_text(background: Rgb) -> Rgb {
    if calculate_luminosity(background) > 0.55 {
        Rgb::new(0, 0, 0)
    } else {
        Rgb::new(255, 255, 255)
    }
}

pub fn to_crossterm(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

/// Foreground/background pair rendered as truecolor escape sequences
#[derive(Debug, Clone, Default)]
pub struct AnsiStyle {
    pub fg_color: Option<Color>,
    pub bg_color: Option<Color>,
}

impl AnsiStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: Color) -> Self {
        self.fg_color = Some(color);
        self
    }

    pub fn bg(mut self, color: Color) -> Self {
        self.bg_color = Some(color);
        self
    }

    pub fn apply(&self, text: &str, no_colors: bool) -> String {
        if no_colors {
            return text.to_string();
        }

        let mut result = String::new();

        if let Some(Color::Rgb { r, g, b }) = self.fg_color {
            result.push_str(&format!("\x1b[38;2;{};{};{}m", r, g, b));
        }
        if let Some(Color::Rgb { r, g, b }) = self.bg_color {
            result.push_str(&format!("\x1b[48;2;{};{};{}m", r, g, b));
        }

        result.push_str(text);
        result.push_str("\x1b[0m");

        result
    }
}

/// Padded hex label painted on its own color, or the bare hex without colors
pub fn swatch(rgb: Rgb, no_colors: bool) -> String {
    if no_colors {
        return rgb_to_hex(rgb);
    }

    let label = format!(" {} ", rgb_to_hex(rgb));

    AnsiStyle::new()
        .fg(to_crossterm(contrasting_text(rgb)))
        .bg(to_crossterm(rgb))
        .apply(&label, no_colors)
}
