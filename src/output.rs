use crate::cli::PaletteFormat;
use crate::color::{Palette, hex_to_rgb, normalize_hex, rgb_to_hsl};
use crate::error::DevboxError;
use crate::table::PaletteTableRenderer;
use crate::terminal::swatch;
use anyhow::Result;

/// Format a palette in the requested output format
pub fn format_palette(palette: &Palette, format: PaletteFormat, no_colors: bool) -> Result<String> {
    let output = match format {
        PaletteFormat::Table => {
            let mut rendered = PaletteTableRenderer::new(no_colors).render(palette);
            rendered.push('\n');
            rendered
        }
        PaletteFormat::Yaml => serde_yaml::to_string(palette)
            .map_err(|e| DevboxError::OutputError(format!("Failed to serialize palette: {}", e)))?,
        PaletteFormat::Plain => {
            let mut lines = String::new();
            let tones = std::iter::once(&palette.base)
                .chain(palette.shades.iter())
                .chain(palette.complementary.iter());
            for hex in tones {
                lines.push_str(&swatch(hex_to_rgb(hex), no_colors));
                lines.push('\n');
            }
            lines
        }
    };

    Ok(output)
}

/// Describe a color in hex, rgb and hsl notation
pub fn format_conversion(raw: &str, no_colors: bool) -> String {
    let hex = normalize_hex(raw);
    let rgb = hex_to_rgb(&hex);
    let hsl = rgb_to_hsl(rgb);

    let mut output = format!(
        "hex  {}\nrgb  rgb({}, {}, {})\nhsl  hsl({}, {}%, {}%)\n",
        hex, rgb.r, rgb.g, rgb.b, hsl.h, hsl.s, hsl.l
    );

    if !no_colors {
        output.push_str(&swatch(rgb, false));
        output.push('\n');
    }

    output
}
