//! Batches textured 2d quads into as few draw calls as possible.
//!
//! A [`SpriteBatch`] collects quads between [`SpriteBatch::begin`] and
//! [`SpriteBatch::end`] into a fixed-capacity vertex buffer. Consecutive quads
//! that share a texture are submitted to the [`RenderBackend`] with a single
//! draw call. Switching textures or filling the buffer flushes the pending
//! quads first, so the order quads are drawn in is always the order they were
//! submitted in.

#![forbid(unsafe_code)]
#![warn(
    clippy::cargo,
    missing_docs,
    clippy::nursery,
    clippy::pedantic,
    future_incompatible,
    rust_2018_idioms,
)]
#![allow(
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
)]

/// Capability traits implemented by graphics backends.
pub mod backend;
mod buffer;
mod color;
mod config;
mod error;
/// Math types for 2d geometry and projections.
pub mod math;
/// The generic begin/draw/flush/end machinery shared by batches.
pub mod session;
/// Types for batching sprites.
pub mod sprite;
/// Types for managing textures.
pub mod texture;

pub use self::{
    backend::{BatchTexture, RenderBackend, ShaderProgram},
    buffer::VertexBuffer,
    color::{Color, PackedColor},
    config::{BatchConfig, BlendFactor, BlendFunction},
    error::Error,
    session::BatchStats,
    sprite::{DrawOptions, SpriteBatch},
};

/// A collection of commonly used exports provided by this crate.
pub mod prelude {
    pub use super::{
        backend::{BatchTexture, RenderBackend, ShaderProgram},
        math::{Angle, Point, Projection, Size, Vector},
        sprite::{DrawOptions, Quad, QuadTransform, SpriteBatch, UvRect},
        texture::{Texture, TextureRegion},
        BatchConfig, BlendFunction, Color, Error,
    };
}

/// Alias for [`std::result::Result`] where the error type is [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
