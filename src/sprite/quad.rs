#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

use crate::{
    backend::BatchTexture,
    color::PackedColor,
    math::{Angle, Point, Rotation, Size, Vector},
    sprite::SpriteVertex,
};

/// A rectangle of normalized texture coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct UvRect {
    /// The left texture coordinate.
    pub u1: f32,
    /// The top texture coordinate.
    pub v1: f32,
    /// The right texture coordinate.
    pub u2: f32,
    /// The bottom texture coordinate.
    pub v2: f32,
}

impl UvRect {
    /// The whole texture.
    pub const FULL: Self = Self::new(0., 0., 1., 1.);

    /// Returns a new rectangle spanning `(u1, v1)` to `(u2, v2)`.
    #[must_use]
    pub const fn new(u1: f32, v1: f32, u2: f32, v2: f32) -> Self {
        Self { u1, v1, u2, v2 }
    }

    /// Returns the rectangle covering the pixels `x, y, width, height` of a
    /// texture sized `texture_size`.
    #[must_use]
    pub fn from_pixels(x: u32, y: u32, width: u32, height: u32, texture_size: Size<u32>) -> Self {
        let texture_width = texture_size.width as f32;
        let texture_height = texture_size.height as f32;
        Self::new(
            x as f32 / texture_width,
            y as f32 / texture_height,
            (x + width) as f32 / texture_width,
            (y + height) as f32 / texture_height,
        )
    }

    /// Returns this rectangle mirrored horizontally and/or vertically.
    #[must_use]
    pub const fn flipped(self, horizontally: bool, vertically: bool) -> Self {
        let (u1, u2) = if horizontally {
            (self.u2, self.u1)
        } else {
            (self.u1, self.u2)
        };
        let (v1, v2) = if vertically {
            (self.v2, self.v1)
        } else {
            (self.v1, self.v2)
        };
        Self::new(u1, v1, u2, v2)
    }

    /// The texture coordinates of each corner, in quad winding order.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.u1, self.v1),
            Point::new(self.u2, self.v1),
            Point::new(self.u2, self.v2),
            Point::new(self.u1, self.v2),
        ]
    }
}

impl Default for UvRect {
    fn default() -> Self {
        Self::FULL
    }
}

/// Where and how a quad is placed on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct QuadTransform {
    /// The location of the quad's unrotated upper-left corner.
    pub position: Point,
    /// The unscaled size of the quad.
    pub size: Size,
    /// The point, relative to `position`, that rotation and scaling are
    /// applied around.
    pub origin: Vector,
    /// The clockwise rotation in screen space (y increases downward).
    pub rotation: Angle,
    /// The horizontal and vertical scale factors.
    pub scale: Vector,
}

impl QuadTransform {
    /// Returns an unrotated, unscaled transform placing a quad of `size` at
    /// `position`.
    #[must_use]
    pub fn new(position: Point, size: Size) -> Self {
        Self {
            position,
            size,
            origin: Vector::zero(),
            rotation: Angle::zero(),
            scale: Vector::new(1., 1.),
        }
    }

    /// Computes the four screen-space corners: upper-left, upper-right,
    /// lower-right, lower-left before rotation.
    #[must_use]
    pub fn corners(&self) -> [Point; 4] {
        let Self {
            position,
            size,
            origin,
            rotation,
            scale,
        } = *self;

        let local = [
            Point::new(-origin.x, -origin.y),
            Point::new(size.width - origin.x, -origin.y),
            Point::new(size.width - origin.x, size.height - origin.y),
            Point::new(-origin.x, size.height - origin.y),
        ];
        let rotation = if rotation.radians == 0. {
            None
        } else {
            Some(Rotation::new(rotation))
        };
        let translation = position.to_vector() + origin;

        let mut corners = [Point::zero(); 4];
        for (corner, local) in corners.iter_mut().zip(local.iter()) {
            let scaled = Point::new(local.x * scale.x, local.y * scale.y);
            let rotated = match &rotation {
                Some(rotation) => rotation.transform_point(scaled),
                None => scaled,
            };
            *corner = rotated + translation;
        }
        corners
    }
}

/// The geometry of one textured quad.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    /// Screen-space corners in winding order.
    pub corners: [Point; 4],
    /// Texture coordinates paired with each corner.
    pub uvs: [Point; 4],
}

impl Quad {
    /// Builds the quad described by `transform`, sampling `uv` from its
    /// texture.
    #[must_use]
    pub fn new(transform: &QuadTransform, uv: UvRect) -> Self {
        Self {
            corners: transform.corners(),
            uvs: uv.corners(),
        }
    }

    /// Produces the quad's vertices, each tinted with `color`.
    #[must_use]
    pub fn vertices(&self, color: PackedColor) -> [SpriteVertex; 4] {
        let vertex = |index: usize| SpriteVertex {
            position: self.corners[index].to_array(),
            color,
            uv: self.uvs[index].to_array(),
        };
        [vertex(0), vertex(1), vertex(2), vertex(3)]
    }
}

/// Options controlling how [`SpriteBatch::draw`](crate::SpriteBatch::draw)
/// places a quad.
///
/// Dimensions left as `None` take the texture's natural size. An explicit
/// `Some(0.)` is honored and produces a degenerate quad.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct DrawOptions {
    /// The location of the quad. Defaults to the origin.
    pub position: Option<Point>,
    /// The width of the quad. Defaults to the texture's width.
    pub width: Option<f32>,
    /// The height of the quad. Defaults to the texture's height.
    pub height: Option<f32>,
    /// The point rotation and scaling are applied around, relative to
    /// `position`.
    pub origin: Vector,
    /// The rotation applied around `origin`.
    pub rotation: Angle,
    /// The scale applied around `origin`.
    pub scale: Vector,
    /// The region of the texture to sample.
    pub uv: UvRect,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            position: None,
            width: None,
            height: None,
            origin: Vector::zero(),
            rotation: Angle::zero(),
            scale: Vector::new(1., 1.),
            uv: UvRect::FULL,
        }
    }
}

impl DrawOptions {
    /// Returns options placing the quad at `x, y`.
    #[must_use]
    pub fn at(x: f32, y: f32) -> Self {
        Self::default().with_position(x, y)
    }

    /// Returns a copy with the position set.
    #[must_use]
    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Some(Point::new(x, y));
        self
    }

    /// Returns a copy with both dimensions set.
    #[must_use]
    pub const fn sized(mut self, width: f32, height: f32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Returns a copy with the width set.
    #[must_use]
    pub const fn with_width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    /// Returns a copy with the height set.
    #[must_use]
    pub const fn with_height(mut self, height: f32) -> Self {
        self.height = Some(height);
        self
    }

    /// Returns a copy rotating and scaling around `x, y`.
    #[must_use]
    pub fn with_origin(mut self, x: f32, y: f32) -> Self {
        self.origin = Vector::new(x, y);
        self
    }

    /// Returns a copy rotated by `rotation`.
    #[must_use]
    pub const fn rotated_by(mut self, rotation: Angle) -> Self {
        self.rotation = rotation;
        self
    }

    /// Returns a copy scaled by `x, y`.
    #[must_use]
    pub fn scaled(mut self, x: f32, y: f32) -> Self {
        self.scale = Vector::new(x, y);
        self
    }

    /// Returns a copy sampling `uv`.
    #[must_use]
    pub const fn with_uv(mut self, uv: UvRect) -> Self {
        self.uv = uv;
        self
    }

    /// Resolves the defaults against `texture`.
    #[must_use]
    pub fn transform<T: BatchTexture>(&self, texture: &T) -> QuadTransform {
        let width = self
            .width
            .unwrap_or_else(|| texture.width().unwrap_or_default() as f32);
        let height = self
            .height
            .unwrap_or_else(|| texture.height().unwrap_or_default() as f32);
        QuadTransform {
            position: self.position.unwrap_or_else(Point::zero),
            size: Size::new(width, height),
            origin: self.origin,
            rotation: self.rotation,
            scale: self.scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::FRAC_PI_2;

    use approx::assert_relative_eq;

    use super::*;

    fn assert_corners(actual: [Point; 4], expected: [(f32, f32); 4]) {
        for (actual, (x, y)) in actual.iter().zip(expected.iter()) {
            assert_relative_eq!(actual.x, *x, epsilon = 1e-4);
            assert_relative_eq!(actual.y, *y, epsilon = 1e-4);
        }
    }

    #[derive(Clone)]
    struct Natural(Option<u32>, Option<u32>);

    impl BatchTexture for Natural {
        fn id(&self) -> u64 {
            0
        }

        fn width(&self) -> Option<u32> {
            self.0
        }

        fn height(&self) -> Option<u32> {
            self.1
        }
    }

    #[test]
    fn untransformed_quad() {
        let quad = Quad::new(
            &QuadTransform::new(Point::new(10., 20.), Size::new(30., 40.)),
            UvRect::FULL,
        );
        assert_corners(
            quad.corners,
            [(10., 20.), (40., 20.), (40., 60.), (10., 60.)],
        );
        assert_corners(quad.uvs, [(0., 0.), (1., 0.), (1., 1.), (0., 1.)]);
    }

    #[test]
    fn origin_alone_does_not_move_the_quad() {
        let mut transform = QuadTransform::new(Point::new(10., 20.), Size::new(30., 40.));
        transform.origin = Vector::new(15., 20.);
        assert_corners(
            transform.corners(),
            [(10., 20.), (40., 20.), (40., 60.), (10., 60.)],
        );
    }

    #[test]
    fn scale_is_applied_around_origin() {
        let mut transform = QuadTransform::new(Point::new(0., 0.), Size::new(10., 10.));
        transform.origin = Vector::new(5., 5.);
        transform.scale = Vector::new(2., 3.);
        assert_corners(
            transform.corners(),
            [(-5., -10.), (15., -10.), (15., 20.), (-5., 20.)],
        );
    }

    #[test]
    fn rotation_turns_around_origin() {
        let mut transform = QuadTransform::new(Point::new(0., 0.), Size::new(10., 20.));
        transform.rotation = Angle::radians(FRAC_PI_2);
        // (x, y) -> (-y, x) around the upper-left corner.
        assert_corners(
            transform.corners(),
            [(0., 0.), (0., 10.), (-20., 10.), (-20., 0.)],
        );
    }

    #[test]
    fn scale_applies_before_rotation() {
        let mut transform = QuadTransform::new(Point::new(100., 100.), Size::new(10., 10.));
        transform.origin = Vector::new(5., 5.);
        transform.scale = Vector::new(2., 1.);
        transform.rotation = Angle::radians(FRAC_PI_2);
        // Local corners scaled to (-10, -5), (10, -5), (10, 5), (-10, 5), then
        // rotated to (5, -10), (5, 10), (-5, 10), (-5, -10) and moved by 105.
        assert_corners(
            transform.corners(),
            [(110., 95.), (110., 115.), (100., 115.), (100., 95.)],
        );
    }

    #[test]
    fn uv_pixels_and_flipping() {
        let uv = UvRect::from_pixels(16, 0, 16, 32, Size::new(64, 32));
        assert_eq!(uv, UvRect::new(0.25, 0., 0.5, 1.));
        assert_eq!(uv.flipped(true, false), UvRect::new(0.5, 0., 0.25, 1.));
        assert_eq!(uv.flipped(false, true), UvRect::new(0.25, 1., 0.5, 0.));
    }

    #[test]
    fn unset_size_uses_texture_size() {
        let texture = Natural(Some(64), Some(32));
        let transform = DrawOptions::default().transform(&texture);
        assert_eq!(transform.position, Point::new(0., 0.));
        assert_eq!(transform.size, Size::new(64., 32.));
    }

    #[test]
    fn explicit_zero_size_is_honored() {
        let texture = Natural(Some(64), Some(32));
        let transform = DrawOptions::at(1., 2.).sized(0., 0.).transform(&texture);
        assert_eq!(transform.size, Size::new(0., 0.));

        let transform = DrawOptions::default().with_width(0.).transform(&texture);
        assert_eq!(transform.size, Size::new(0., 32.));
    }

    #[test]
    fn unknown_texture_size_falls_back_to_zero() {
        let texture = Natural(None, Some(8));
        let transform = DrawOptions::default().transform(&texture);
        assert_eq!(transform.size, Size::new(0., 8.));
    }

    #[test]
    fn vertices_share_color() {
        let color = PackedColor::from_rgba8([10, 20, 30, 40]);
        let quad = Quad::new(
            &QuadTransform::new(Point::new(0., 0.), Size::new(1., 1.)),
            UvRect::FULL,
        );
        let vertices = quad.vertices(color);
        assert!(vertices.iter().all(|vertex| vertex.color == color));
        assert_eq!(vertices[2].position, [1., 1.]);
        assert_eq!(vertices[3].uv, [0., 1.]);
    }
}
