#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::{math::Size, Color};

/// A factor applied to the source or destination color when blending.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub enum BlendFactor {
    /// `0`
    Zero,
    /// `1`
    One,
    /// The source color.
    SourceColor,
    /// `1 - source color`
    OneMinusSourceColor,
    /// The source alpha.
    SourceAlpha,
    /// `1 - source alpha`
    OneMinusSourceAlpha,
    /// The destination color.
    DestinationColor,
    /// `1 - destination color`
    OneMinusDestinationColor,
    /// The destination alpha.
    DestinationAlpha,
    /// `1 - destination alpha`
    OneMinusDestinationAlpha,
}

/// The blend equation factors applied while drawing a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct BlendFunction {
    /// The factor applied to the incoming fragment.
    pub source: BlendFactor,
    /// The factor applied to the color already in the target.
    pub destination: BlendFactor,
}

impl BlendFunction {
    /// Straight (non-premultiplied) alpha blending.
    pub const ALPHA: Self = Self::new(BlendFactor::SourceAlpha, BlendFactor::OneMinusSourceAlpha);
    /// Blending for textures whose color is already multiplied by alpha.
    pub const PREMULTIPLIED_ALPHA: Self =
        Self::new(BlendFactor::One, BlendFactor::OneMinusSourceAlpha);
    /// Additive blending.
    pub const ADDITIVE: Self = Self::new(BlendFactor::SourceAlpha, BlendFactor::One);

    /// Returns a new blend function.
    #[must_use]
    pub const fn new(source: BlendFactor, destination: BlendFactor) -> Self {
        Self {
            source,
            destination,
        }
    }
}

impl Default for BlendFunction {
    fn default() -> Self {
        Self::ALPHA
    }
}

/// Construction options for a [`SpriteBatch`](crate::SpriteBatch).
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct BatchConfig {
    /// The number of quads the vertex buffer holds before it must be flushed.
    pub max_quads: usize,
    /// The blending applied to the first session. `None` disables blending.
    pub blending: Option<BlendFunction>,
    /// The tint applied to quads until [`set_color`] is called.
    ///
    /// [`set_color`]: crate::SpriteBatch::set_color
    pub color: Color,
    /// When set, the initial projection is derived from this viewport size.
    /// Otherwise the projection starts as the identity matrix.
    pub viewport: Option<Size>,
}

impl BatchConfig {
    /// The quad capacity used by [`BatchConfig::default`].
    pub const DEFAULT_MAX_QUADS: usize = 1000;
    /// The largest quad capacity whose vertices are addressable by 16-bit
    /// indices.
    pub const MAX_QUADS: usize = (u16::MAX as usize + 1) / 4;

    /// Returns a copy of this configuration with `max_quads` set.
    #[must_use]
    pub const fn with_max_quads(mut self, max_quads: usize) -> Self {
        self.max_quads = max_quads;
        self
    }

    /// Returns a copy of this configuration with `blending` set.
    #[must_use]
    pub const fn with_blending(mut self, blending: Option<BlendFunction>) -> Self {
        self.blending = blending;
        self
    }

    /// Returns a copy of this configuration with `color` set.
    #[must_use]
    pub const fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Returns a copy of this configuration whose initial projection matches
    /// a viewport of `width` by `height`.
    #[must_use]
    pub fn with_viewport(mut self, width: f32, height: f32) -> Self {
        self.viewport = Some(Size::new(width, height));
        self
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            max_quads: Self::DEFAULT_MAX_QUADS,
            blending: Some(BlendFunction::default()),
            color: Color::WHITE,
            viewport: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = BatchConfig::default();
        assert_eq!(config.max_quads, 1000);
        assert_eq!(config.blending, Some(BlendFunction::ALPHA));
        assert_eq!(config.color, Color::WHITE);
        assert!(config.viewport.is_none());
    }

    #[test]
    fn max_quads_fits_u16_indices() {
        assert_eq!(BatchConfig::MAX_QUADS, 16384);
        assert_eq!(BatchConfig::MAX_QUADS * 4 - 1, u16::MAX as usize);
    }
}
