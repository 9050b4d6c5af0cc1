use crate::color::{COMPLEMENTARY_OFFSETS, Palette, Rgb, SHADE_OFFSETS, hex_to_rgb, rgb_to_hsl};
use crate::terminal::contrasting_text;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table,
    modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL,
};

const HEADERS: [&str; 5] = ["Tone", "Hex", "RGB", "HSL", "Swatch"];
const SWATCH_WIDTH: usize = 8;

/// Palette renderer using comfy-table, with colored swatch cells
pub struct PaletteTableRenderer {
    no_colors: bool,
}

impl PaletteTableRenderer {
    pub fn new(no_colors: bool) -> Self {
        Self { no_colors }
    }

    pub fn render(&self, palette: &Palette) -> String {
        let mut table = Table::new();

        table
            .load_preset(UTF8_FULL)
            .apply_modifier(UTF8_ROUND_CORNERS)
            .set_content_arrangement(ContentArrangement::Dynamic);

        if self.no_colors {
            table.force_no_tty();
        } else {
            table.enforce_styling();
        }

        let header_cells: Vec<Cell> = HEADERS
            .iter()
            .map(|header| {
                let cell = Cell::new(header).set_alignment(CellAlignment::Center);
                if self.no_colors {
                    cell
                } else {
                    cell.add_attribute(Attribute::Bold)
                }
            })
            .collect();
        table.set_header(header_cells);

        table.add_row(self.row("base", &palette.base));

        for (hex, (light, _)) in palette.shades.iter().zip(SHADE_OFFSETS) {
            table.add_row(self.row(&format!("shade {:+}", light), hex));
        }

        for (hex, (hue, _, _)) in palette.complementary.iter().zip(COMPLEMENTARY_OFFSETS) {
            table.add_row(self.row(&format!("complement {:+}°", hue), hex));
        }

        table.to_string()
    }

    fn row(&self, label: &str, hex: &str) -> Vec<Cell> {
        let rgb = hex_to_rgb(hex);
        let hsl = rgb_to_hsl(rgb);

        vec![
            Cell::new(label),
            Cell::new(hex),
            Cell::new(format!("{}, {}, {}", rgb.r, rgb.g, rgb.b)),
            Cell::new(format!("{}°, {}%, {}%", hsl.h, hsl.s, hsl.l)),
            self.swatch_cell(rgb),
        ]
    }

    fn swatch_cell(&self, rgb: Rgb) -> Cell {
        if self.no_colors {
            return Cell::new("");
        }

        let text = contrasting_text(rgb);
        Cell::new(" ".repeat(SWATCH_WIDTH))
            .bg(to_comfy(rgb))
            .fg(to_comfy(text))
    }
}

fn to_comfy(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
