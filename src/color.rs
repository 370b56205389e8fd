use std::fmt;
use std::ops::{Add, AddAssign, Mul, MulAssign};

/// A linear RGB color with every channel kept in `[0.0, 1.0]`.
///
/// All arithmetic clamps its result, so a `Color` never holds an out-of-range
/// channel. Alpha isn't stored: exported pixels are always fully opaque.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Color {
    r: f64,
    g: f64,
    b: f64,
}

impl Color {
    pub const WHITE: Color = Color { r: 1.0, g: 1.0, b: 1.0 };
    pub const RED: Color = Color { r: 1.0, g: 0.0, b: 0.0 };
    pub const GREEN: Color = Color { r: 0.0, g: 1.0, b: 0.0 };
    pub const BLUE: Color = Color { r: 0.0, g: 0.0, b: 1.0 };
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    pub fn new(r: f64, g: f64, b: f64) -> Color {
        Color {
            r: clamp_channel(r),
            g: clamp_channel(g),
            b: clamp_channel(b),
        }
    }

    /// Normalized `(r, g, b)` channels.
    pub fn components(&self) -> (f64, f64, f64) {
        (self.r, self.g, self.b)
    }

    /// Approximates a display gamma of 2.0 by taking the square root of each channel.
    pub fn gamma(&mut self) -> &mut Color {
        self.r = clamp_channel(self.r.sqrt());
        self.g = clamp_channel(self.g.sqrt());
        self.b = clamp_channel(self.b.sqrt());
        self
    }

    /// Red channel as `(r * 255.0) as u8`, truncated rather than rounded.
    pub fn r(&self) -> u8 {
        channel_to_u8(self.r)
    }

    /// Green channel, truncated the same way as [`Color::r`].
    pub fn g(&self) -> u8 {
        channel_to_u8(self.g)
    }

    /// Blue channel, truncated the same way as [`Color::r`].
    pub fn b(&self) -> u8 {
        channel_to_u8(self.b)
    }

    /// Always 255: colors are opaque.
    pub fn a(&self) -> u8 {
        u8::max_value()
    }

    /// The four 8-bit exports in PNG order. A channel of 0.5 becomes 127, not 128.
    pub fn to_rgba8(&self) -> [u8; 4] {
        [self.r(), self.g(), self.b(), self.a()]
    }

    fn map(self, f: impl Fn(f64) -> f64) -> Color {
        Color::new(f(self.r), f(self.g), f(self.b))
    }

    fn zip(self, other: Color, f: impl Fn(f64, f64) -> f64) -> Color {
        Color::new(f(self.r, other.r), f(self.g, other.g), f(self.b, other.b))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}, {}, {}", self.r, self.g, self.b)
    }
}

impl Mul<f64> for Color {
    type Output = Color;

    fn mul(self, scale: f64) -> Color {
        self.map(|c| c * scale)
    }
}

impl Mul<Color> for f64 {
    type Output = Color;

    fn mul(self, color: Color) -> Color {
        color * self
    }
}

impl MulAssign<f64> for Color {
    fn mul_assign(&mut self, scale: f64) {
        *self = *self * scale;
    }
}

impl Mul for Color {
    type Output = Color;

    fn mul(self, rhs: Color) -> Color {
        self.zip(rhs, |a, b| a * b)
    }
}

impl MulAssign for Color {
    fn mul_assign(&mut self, rhs: Color) {
        *self = *self * rhs;
    }
}

impl Add for Color {
    type Output = Color;

    fn add(self, rhs: Color) -> Color {
        self.zip(rhs, |a, b| a + b)
    }
}

impl AddAssign for Color {
    fn add_assign(&mut self, rhs: Color) {
        *self = *self + rhs;
    }
}

fn clamp_channel(value: f64) -> f64 {
    // NaN fails both comparisons, so it ends up as 0.0.
    if value >= 1.0 {
        1.0
    } else if value > 0.0 {
        value
    } else {
        0.0
    }
}

fn channel_to_u8(value: f64) -> u8 {
    (f64::from(u8::max_value()) * value) as u8
}
