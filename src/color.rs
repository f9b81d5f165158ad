// color.rs - Height-to-color mapping and HSL conversion
//
// Heights below zero shade from blue toward red, heights above zero from red
// toward green, and anything past the threshold saturates to white. The
// height color is then mixed over a base color by a blend percentage, so at
// 0% the cell shows only the base color.

use std::fmt;

/// 8-bit RGB triple.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

pub const LOW: Rgb = Rgb::new(0, 0, 255);
pub const MID: Rgb = Rgb::new(128, 0, 0);
pub const HIGH: Rgb = Rgb::new(0, 255, 0);
pub const SATURATED: Rgb = Rgb::new(255, 255, 255);
pub const DEFAULT_BASE: Rgb = Rgb::new(64, 0, 0);
pub const HEIGHT_THRESHOLD: f32 = 2.0;

// Working color for blending, unclamped
#[derive(Clone, Copy, Default)]
struct Color {
    r: f64,
    g: f64,
    b: f64,
}

impl Color {
    fn lerp(a: Rgb, b: Rgb, t: f64) -> Self {
        Color::from(a) * (1.0 - t) + Color::from(b) * t
    }

    /// Floor into 8 bits
    fn to_rgb(self) -> Rgb {
        Rgb::new(
            self.r.clamp(0.0, 255.0) as u8,
            self.g.clamp(0.0, 255.0) as u8,
            self.b.clamp(0.0, 255.0) as u8,
        )
    }
}

impl From<Rgb> for Color {
    fn from(c: Rgb) -> Self {
        Self { r: c.r as f64, g: c.g as f64, b: c.b as f64 }
    }
}

impl std::ops::Add for Color {
    type Output = Self;
    fn add(self, o: Self) -> Self {
        Self { r: self.r + o.r, g: self.g + o.g, b: self.b + o.b }
    }
}

impl std::ops::Mul<f64> for Color {
    type Output = Self;
    fn mul(self, s: f64) -> Self {
        Self { r: self.r * s, g: self.g * s, b: self.b * s }
    }
}

/// Anchor colors and saturation threshold for height shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeightPalette {
    pub low: Rgb,
    pub mid: Rgb,
    pub high: Rgb,
    pub saturated: Rgb,
    pub threshold: f32,
}

impl Default for HeightPalette {
    fn default() -> Self {
        Self { low: LOW, mid: MID, high: HIGH, saturated: SATURATED, threshold: HEIGHT_THRESHOLD }
    }
}

impl HeightPalette {
    /// Color for `height`, with `blend_percent` (0-100) of the height color
    /// mixed over `base`. Past the threshold the saturated color is returned
    /// whatever the blend.
    pub fn map(&self, height: f32, blend_percent: f32, base: Rgb) -> Rgb {
        if height.abs() > self.threshold {
            return self.saturated;
        }

        let frac = (height.abs() / self.threshold) as f64;
        let shade = if height < 0.0 {
            Color::lerp(self.low, self.mid, 1.0 - frac)
        } else {
            Color::lerp(self.mid, self.high, frac)
        };

        let p = blend_percent.clamp(0.0, 100.0) as f64 / 100.0;
        (Color::from(base) * (1.0 - p) + shade * p).to_rgb()
    }
}

/// `HeightPalette::default().map(..)`
pub fn map_height(height: f32, blend_percent: f32, base: Rgb) -> Rgb {
    HeightPalette::default().map(height, blend_percent, base)
}

/// Standard HSL to RGB; all inputs in [0, 1], channels rounded.
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Rgb {
    let (h, s, l) = (hue as f64, saturation as f64, lightness as f64);

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_channel(p, q, h + 1.0 / 3.0),
            hue_channel(p, q, h),
            hue_channel(p, q, h - 1.0 / 3.0),
        )
    };

    let to_u8 = |c: f64| (c * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb::new(to_u8(r), to_u8(g), to_u8(b))
}

fn hue_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 { t += 1.0; }
    if t > 1.0 { t -= 1.0; }

    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}
