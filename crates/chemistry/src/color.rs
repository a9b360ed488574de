/// An opaque display color in 8-bit RGB.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Creates a color from its red, green, and blue components.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Linearly interpolates from `self` toward `other`.
    ///
    /// `t` is clamped to `[0, 1]`, where `0` returns `self` and `1` returns `other`.
    #[must_use]
    pub fn blend(self, other: Self, t: f64) -> Self {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| {
            let value = f64::from(a) + (f64::from(b) - f64::from(a)) * t;
            // Always within [0, 255] because `t` is clamped.
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let channel = value.round() as u8;
            channel
        };
        Self::rgb(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }
}
