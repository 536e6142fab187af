mod batch;
mod quad;
mod vertex;

pub use self::{
    batch::SpriteBatch,
    quad::{DrawOptions, Quad, QuadTransform, UvRect},
    vertex::SpriteVertex,
};
