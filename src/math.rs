#[cfg(feature = "serialization")]
use serde::{Deserialize, Serialize};

/// A type representing an x and y coordinate.
pub type Point<T = f32> = euclid::default::Point2D<T>;
/// A type representing a width and height.
pub type Size<T = f32> = euclid::default::Size2D<T>;
/// A type representing a vector with magnitudes x and y.
pub type Vector<T = f32> = euclid::default::Vector2D<T>;
/// A type representing an angle of measurement.
pub type Angle = euclid::Angle<f32>;
/// A rotation in 2d space.
pub type Rotation = euclid::default::Rotation2D<f32>;

/// A 4x4 column-major projection matrix pushed to the sprite shader.
///
/// Matrices compare bit for bit, so a degenerate matrix (such as one built
/// for an empty viewport) still equals itself.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct Projection([f32; 16]);

impl Default for Projection {
    fn default() -> Self {
        Self::identity()
    }
}

impl PartialEq for Projection {
    fn eq(&self, other: &Self) -> bool {
        self.0
            .iter()
            .zip(other.0.iter())
            .all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Eq for Projection {}

impl From<[f32; 16]> for Projection {
    fn from(matrix: [f32; 16]) -> Self {
        Self(matrix)
    }
}

impl Projection {
    /// The identity matrix.
    #[must_use]
    pub const fn identity() -> Self {
        Self([
            1., 0., 0., 0., //
            0., 1., 0., 0., //
            0., 0., 1., 0., //
            0., 0., 0., 1., //
        ])
    }

    /// An orthographic projection mapping the box described by the arguments
    /// onto normalized device coordinates.
    #[must_use]
    pub fn ortho(left: f32, top: f32, right: f32, bottom: f32, near: f32, far: f32) -> Self {
        let tx = -((right + left) / (right - left));
        let ty = -((top + bottom) / (top - bottom));
        let tz = -((far + near) / (far - near));

        Self([
            // Column one
            2. / (right - left),
            0.,
            0.,
            0.,
            // Column two
            0.,
            2. / (top - bottom),
            0.,
            0.,
            // Column three
            0.,
            0.,
            -2. / (far - near),
            0.,
            // Column four
            tx,
            ty,
            tz,
            1.,
        ])
    }

    /// A y-down screen projection for a viewport of `width` by `height`, with
    /// the origin at the upper-left corner.
    #[must_use]
    pub fn from_viewport(width: f32, height: f32) -> Self {
        Self::ortho(0., 0., width, height, -1., 1.)
    }

    /// Transforms `point` (with z = 0) and returns the resulting x and y in
    /// normalized device coordinates.
    #[must_use]
    pub fn transform_point(&self, point: Point) -> Point {
        let m = &self.0;
        let x = m[0] * point.x + m[4] * point.y + m[12];
        let y = m[1] * point.x + m[5] * point.y + m[13];
        let w = m[3] * point.x + m[7] * point.y + m[15];
        Point::new(x / w, y / w)
    }

    /// Returns the matrix in column-major order.
    #[must_use]
    pub const fn to_array(self) -> [f32; 16] {
        self.0
    }
}
