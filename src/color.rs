use serde::Serialize;

/// Color used whenever a hex string cannot be parsed
pub const FALLBACK_HEX: &str = "#529DFF";

const FALLBACK_VALUE: u32 = 0x529DFF;

/// Lightness/saturation offsets for the tonal ladder, darkest first
pub const SHADE_OFFSETS: [(i32, i32); 5] = [(-28, -14), (-16, -8), (0, 0), (12, 6), (22, 11)];

/// Hue/saturation/lightness offsets applied around the complementary hue
pub const COMPLEMENTARY_OFFSETS: [(i32, i32, i32); 3] = [(-12, -6, 6), (0, 0, 0), (12, 6, -6)];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// HSL triple with hue in degrees and saturation/lightness in percent.
///
/// Fields are signed so derived values may temporarily leave their range;
/// [`hsl_to_rgb`] wraps the hue and clamps the percentages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Hsl {
    pub h: i32,
    pub s: i32,
    pub l: i32,
}

impl Hsl {
    pub const fn new(h: i32, s: i32, l: i32) -> Self {
        Self { h, s, l }
    }
}

/// Palette derived from a single base color
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub base: String,
    pub shades: [String; 5],
    pub complementary: [String; 3],
}

/// Normalize a user supplied hex color to `#RRGGBB`.
///
/// Accepts an optional leading `#` and the 3-digit short form. Anything else
/// yields [`FALLBACK_HEX`].
pub fn normalize_hex(raw: &str) -> String {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed).to_ascii_lowercase();

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return FALLBACK_HEX.to_string();
    }

    match digits.len() {
        6 => format!("#{}", digits.to_ascii_uppercase()),
        3 => {
            let expanded: String = digits
                .chars()
                .flat_map(|c| [c, c])
                .collect::<String>()
                .to_ascii_uppercase();
            format!("#{}", expanded)
        }
        _ => FALLBACK_HEX.to_string(),
    }
}

/// Returns true when `raw` would normalize without hitting the fallback
pub fn is_valid_hex(raw: &str) -> bool {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    matches!(digits.len(), 3 | 6) && digits.chars().all(|c| c.is_ascii_hexdigit())
}

pub fn hex_to_rgb(hex: &str) -> Rgb {
    let normalized = normalize_hex(hex);
    let value = u32::from_str_radix(&normalized[1..], 16).unwrap_or(FALLBACK_VALUE);

    Rgb {
        r: ((value >> 16) & 255) as u8,
        g: ((value >> 8) & 255) as u8,
        b: (value & 255) as u8,
    }
}

pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02X}{:02X}{:02X}", rgb.r, rgb.g, rgb.b)
}

pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    if max == min {
        return Hsl::new(0, 0, (l * 100.0).round() as i32);
    }

    let d = max - min;
    let s = if l > 0.5 {
        d / (2.0 - max - min)
    } else {
        d / (max + min)
    };

    let sector = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };

    Hsl {
        h: ((sector / 6.0 * 360.0).round() as i32).rem_euclid(360),
        s: (s * 100.0).round() as i32,
        l: (l * 100.0).round() as i32,
    }
}

pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let h = f64::from(hsl.h.rem_euclid(360)) / 360.0;
    let s = f64::from(hsl.s.clamp(0, 100)) / 100.0;
    let l = f64::from(hsl.l.clamp(0, 100)) / 100.0;

    if s == 0.0 {
        let gray = to_channel(l);
        return Rgb::new(gray, gray, gray);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb {
        r: to_channel(hue_to_channel(p, q, h + 1.0 / 3.0)),
        g: to_channel(hue_to_channel(p, q, h)),
        b: to_channel(hue_to_channel(p, q, h - 1.0 / 3.0)),
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = if t < 0.0 {
        t + 1.0
    } else if t > 1.0 {
        t - 1.0
    } else {
        t
    };

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

fn to_channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

/// Derive the tonal ladder and complementary triad for `base_hex`.
///
/// Shades hold the base hue and walk lightness from darkest to lightest.
/// Complementary tones sit around the hue opposite the base. Output order
/// follows the offset tables.
pub fn generate_palette(base_hex: &str) -> Palette {
    let base = normalize_hex(base_hex);
    let hsl = rgb_to_hsl(hex_to_rgb(&base));

    let shades = SHADE_OFFSETS.map(|(light, sat)| {
        rgb_to_hex(hsl_to_rgb(Hsl {
            h: hsl.h,
            s: (hsl.s + sat).clamp(12, 96),
            l: (hsl.l + light).clamp(8, 94),
        }))
    });

    let complementary = COMPLEMENTARY_OFFSETS.map(|(hue, sat, light)| {
        rgb_to_hex(hsl_to_rgb(Hsl {
            h: (hsl.h + 180 + hue).rem_euclid(360),
            s: (hsl.s + sat).clamp(18, 96),
            l: (hsl.l + light).clamp(10, 92),
        }))
    });

    Palette {
        base,
        shades,
        complementary,
    }
}
