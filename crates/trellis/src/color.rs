/// An RGBA8 color, passed through to the render sink unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba {
    /// Opaque white, the background of a freshly allocated element.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// Construct a color from all four channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Construct an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl From<(u8, u8, u8)> for Rgba {
    fn from(v: (u8, u8, u8)) -> Self {
        Self::rgb(v.0, v.1, v.2)
    }
}

impl From<(u8, u8, u8, u8)> for Rgba {
    fn from(v: (u8, u8, u8, u8)) -> Self {
        Self::new(v.0, v.1, v.2, v.3)
    }
}
