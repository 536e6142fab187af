use std::mem::size_of;

use bytemuck::{Pod, Zeroable};

use crate::{color::PackedColor, session::VertexLayout};

/// One corner of a sprite quad as it is laid out in the vertex stream.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteVertex {
    /// The screen-space position.
    pub position: [f32; 2],
    /// The tint, packed into one float-sized slot.
    pub color: PackedColor,
    /// The texture coordinate.
    pub uv: [f32; 2],
}

impl VertexLayout for SpriteVertex {
    const VERTEX_SIZE: usize = size_of::<Self>() / size_of::<f32>();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn five_floats_per_vertex() {
        assert_eq!(SpriteVertex::VERTEX_SIZE, 5);
        assert_eq!(SpriteVertex::QUAD_SIZE, 20);
    }

    #[test]
    fn color_occupies_the_third_slot() {
        let color = PackedColor::from_rgba8([1, 2, 3, 4]);
        let vertex = SpriteVertex {
            position: [10., 20.],
            color,
            uv: [0.5, 1.],
        };
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&vertex));
        assert_eq!(floats[0], 10.);
        assert_eq!(floats[1], 20.);
        assert_eq!(PackedColor::from_f32(floats[2]), color);
        assert_eq!(floats[3], 0.5);
        assert_eq!(floats[4], 1.);
    }
}
