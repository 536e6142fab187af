use approx::relative_eq;
use bytemuck::{Pod, Zeroable};
use palette::{rgb::Srgba, Component, Shade, Srgb};
#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// A RGBA color with f32 components.
#[derive(Clone, Debug, Copy, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Color {
    red: f32,
    green: f32,
    blue: f32,
    alpha: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl<U: Component> From<Srgba<U>> for Color {
    fn from(color: Srgba<U>) -> Self {
        let color = color.into_format::<_, f32>();
        Self::new(
            color.color.red,
            color.color.green,
            color.color.blue,
            color.alpha,
        )
    }
}

impl<U: Component> From<Srgb<U>> for Color {
    fn from(color: Srgb<U>) -> Self {
        let color = color.into_format::<f32>();
        Self::new(color.red, color.green, color.blue, 1.)
    }
}

impl From<Color> for Srgba {
    fn from(color: Color) -> Self {
        Self::new(color.red, color.green, color.blue, color.alpha)
    }
}

impl From<[f32; 4]> for Color {
    fn from([r, g, b, a]: [f32; 4]) -> Self {
        Self::new(r, g, b, a)
    }
}

impl Color {
    /// Creates a color from components in the range 0.0 to 1.0.
    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            red: r,
            green: g,
            blue: b,
            alpha: a,
        }
    }

    /// Lightens the color by `amount`.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let color: Srgba = self.into();
        let linear = color.into_linear();
        Srgba::from_linear(linear.lighten(amount)).into()
    }

    /// Darkens the color by `amount`.
    #[must_use]
    pub fn darken(self, amount: f32) -> Self {
        let color: Srgba = self.into();
        let linear = color.into_linear();
        Srgba::from_linear(linear.darken(amount)).into()
    }

    /// Returns the red component.
    #[must_use]
    pub const fn red(&self) -> f32 {
        self.red
    }

    /// Returns the green component.
    #[must_use]
    pub const fn green(&self) -> f32 {
        self.green
    }

    /// Returns the blue component.
    #[must_use]
    pub const fn blue(&self) -> f32 {
        self.blue
    }

    /// Returns the alpha component.
    #[must_use]
    pub const fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Returns the color as an f32 array.
    #[must_use]
    pub const fn rgba(&self) -> [f32; 4] {
        [self.red, self.green, self.blue, self.alpha]
    }

    /// Returns if the color has a non-zero alpha value.
    #[must_use]
    pub fn visible(&self) -> bool {
        !relative_eq!(self.alpha, 0.)
    }

    /// Returns a new color using red, green, and blue from `self` and the
    /// parameter `alpha`.
    #[must_use]
    pub const fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Packs this color into the single-slot vertex representation.
    #[must_use]
    pub fn packed(&self) -> PackedColor {
        PackedColor::from_rgba8([
            normalized_to_byte(self.red),
            normalized_to_byte(self.green),
            normalized_to_byte(self.blue),
            normalized_to_byte(self.alpha),
        ])
    }
}

fn normalized_to_byte(component: f32) -> u8 {
    (component.max(0.).min(1.) * 255.).round() as u8
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::new(0., 0., 0., 1.);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0., 0., 1., 1.);
    /// Transparent black.
    pub const CLEAR_BLACK: Self = Self::new(0., 0., 0., 0.);
    /// Transparent white.
    pub const CLEAR_WHITE: Self = Self::new(1., 1., 1., 0.);
    /// Opaque 50% gray.
    pub const GRAY: Self = Self::new(128. / 255., 128. / 255., 128. / 255., 1.);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0., 128. / 255., 0., 1.);
    /// Opaque lime.
    pub const LIME: Self = Self::new(0., 1., 0., 1.);
    /// Opaque red.
    pub const RED: Self = Self::new(1., 0., 0., 1.);
    /// Opaque white. The default tint, which leaves textures unchanged.
    pub const WHITE: Self = Self::new(1., 1., 1., 1.);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::new(1., 1., 0., 1.);
}

/// A color packed into 4 normalized bytes, stored in one float-sized vertex
/// slot.
///
/// In memory the bytes are ordered red, green, blue, alpha, matching a
/// `Unorm8x4` vertex attribute. The lowest bit of the alpha channel is always
/// cleared, which keeps the slot from ever holding a NaN bit pattern when it
/// is reinterpreted as an `f32`.
#[repr(transparent)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct PackedColor(u32);

impl PackedColor {
    const ALPHA_MASK: u32 = 0xfeff_ffff;

    /// Packs `[red, green, blue, alpha]` bytes.
    #[must_use]
    pub const fn from_rgba8(rgba: [u8; 4]) -> Self {
        Self(u32::from_le_bytes(rgba) & Self::ALPHA_MASK)
    }

    /// Returns the `[red, green, blue, alpha]` bytes.
    #[must_use]
    pub const fn to_rgba8(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }

    /// Returns the raw packed value.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// Reinterprets the packed value as the float written into the vertex
    /// stream.
    #[must_use]
    pub fn to_f32(self) -> f32 {
        bytemuck::cast(self.0)
    }

    /// Reads a packed value back out of a vertex stream slot.
    #[must_use]
    pub fn from_f32(slot: f32) -> Self {
        Self(bytemuck::cast(slot))
    }
}

impl From<Color> for PackedColor {
    fn from(color: Color) -> Self {
        color.packed()
    }
}

impl Default for PackedColor {
    fn default() -> Self {
        Color::WHITE.packed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_channels_in_memory_order() {
        let packed = Color::new(1., 0., 0.5, 1.).packed();
        assert_eq!(packed.to_rgba8(), [255, 0, 128, 254]);
    }

    #[test]
    fn clamps_out_of_range_components() {
        let packed = Color::new(-1., 2., 0., 0.).packed();
        assert_eq!(packed.to_rgba8(), [0, 255, 0, 0]);
    }

    #[test]
    fn packed_slot_is_never_nan() {
        for blue in [0_u8, 127, 128, 255] {
            let packed = PackedColor::from_rgba8([255, 255, blue, 255]);
            assert!(!packed.to_f32().is_nan());
            assert_eq!(PackedColor::from_f32(packed.to_f32()), packed);
        }
    }

    #[test]
    fn default_is_opaque_white() {
        assert_eq!(Color::default(), Color::WHITE);
        assert_eq!(PackedColor::default().to_rgba8(), [255, 255, 255, 254]);
    }

    #[test]
    fn with_alpha_keeps_rgb() {
        let color = Color::RED.with_alpha(0.);
        assert_eq!(color.rgba(), [1., 0., 0., 0.]);
        assert!(!color.visible());
    }
}
