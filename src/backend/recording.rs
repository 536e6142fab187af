use std::marker::PhantomData;

use crate::{
    backend::{BatchTexture, RenderBackend, ShaderProgram},
    config::BlendFunction,
    math::Projection,
};

/// A command received by a [`RecordingBackend`].
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// The index buffer was filled with this many indices.
    PrepareIndices(usize),
    /// The program was bound.
    BindProgram,
    /// The program was unbound.
    UnbindProgram,
    /// Depth writes were toggled.
    DepthMask(bool),
    /// Blending was changed.
    Blending(Option<BlendFunction>),
    /// A texture was bound.
    BindTexture {
        /// The texture unit.
        unit: u32,
        /// The id of the bound texture.
        texture: u64,
    },
    /// Vertex data was uploaded.
    Upload(Vec<f32>),
    /// A draw call was issued.
    DrawQuads(usize),
}

/// A uniform assignment received by a [`RecordingShader`].
#[derive(Clone, Debug, PartialEq)]
pub enum Uniform {
    /// A matrix uniform.
    Matrix4(String, Projection),
    /// An integer uniform.
    Int(String, i32),
}

/// A shader that records the uniforms set on it.
#[derive(Clone, Debug, Default)]
pub struct RecordingShader {
    /// Every uniform assignment, in order.
    pub uniforms: Vec<Uniform>,
    log: Option<String>,
}

impl RecordingShader {
    /// Returns a shader that reports `log` as its compilation output.
    #[must_use]
    pub fn with_log(log: impl Into<String>) -> Self {
        Self {
            uniforms: Vec::new(),
            log: Some(log.into()),
        }
    }

    /// Returns the last matrix assigned to `name`.
    #[must_use]
    pub fn last_matrix(&self, name: &str) -> Option<Projection> {
        self.uniforms.iter().rev().find_map(|uniform| match uniform {
            Uniform::Matrix4(uniform_name, matrix) if uniform_name == name => Some(*matrix),
            _ => None,
        })
    }
}

impl ShaderProgram for RecordingShader {
    fn set_uniform_matrix4(&mut self, name: &str, matrix: &Projection) {
        self.uniforms.push(Uniform::Matrix4(name.to_owned(), *matrix));
    }

    fn set_uniform_int(&mut self, name: &str, value: i32) {
        self.uniforms.push(Uniform::Int(name.to_owned(), value));
    }

    fn log(&self) -> Option<&str> {
        self.log.as_deref()
    }
}

/// A backend that performs no GPU work and instead records every command.
///
/// Useful for testing code that drives a batch, and for inspecting exactly
/// which draw calls a frame produces.
#[derive(Debug)]
pub struct RecordingBackend<T> {
    /// Every command received, in order.
    pub commands: Vec<Command>,
    /// The program uniforms are set on.
    pub shader: RecordingShader,
    _texture: PhantomData<T>,
}

impl<T> Default for RecordingBackend<T> {
    fn default() -> Self {
        Self::new(RecordingShader::default())
    }
}

impl<T> RecordingBackend<T> {
    /// Returns a backend drawing with `shader`.
    #[must_use]
    pub const fn new(shader: RecordingShader) -> Self {
        Self {
            commands: Vec::new(),
            shader,
            _texture: PhantomData,
        }
    }

    /// Returns the quad counts of every draw call issued.
    #[must_use]
    pub fn draw_calls(&self) -> Vec<usize> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                Command::DrawQuads(quads) => Some(*quads),
                _ => None,
            })
            .collect()
    }

    /// Returns every vertex upload.
    #[must_use]
    pub fn uploads(&self) -> Vec<&[f32]> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                Command::Upload(vertices) => Some(vertices.as_slice()),
                _ => None,
            })
            .collect()
    }

    /// Returns the ids of every texture bound, in order.
    #[must_use]
    pub fn bound_textures(&self) -> Vec<u64> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                Command::BindTexture { texture, .. } => Some(*texture),
                _ => None,
            })
            .collect()
    }

    /// Forgets all recorded commands and uniforms.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.shader.uniforms.clear();
    }
}

impl<T> RenderBackend for RecordingBackend<T>
where
    T: BatchTexture,
{
    type Shader = RecordingShader;
    type Texture = T;

    fn shader_mut(&mut self) -> &mut Self::Shader {
        &mut self.shader
    }

    fn prepare_indices(&mut self, indices: &[u16]) {
        self.commands.push(Command::PrepareIndices(indices.len()));
    }

    fn bind_program(&mut self) {
        self.commands.push(Command::BindProgram);
    }

    fn unbind_program(&mut self) {
        self.commands.push(Command::UnbindProgram);
    }

    fn set_depth_mask(&mut self, enabled: bool) {
        self.commands.push(Command::DepthMask(enabled));
    }

    fn set_blending(&mut self, function: Option<BlendFunction>) {
        self.commands.push(Command::Blending(function));
    }

    fn bind_texture(&mut self, unit: u32, texture: &Self::Texture) {
        self.commands.push(Command::BindTexture {
            unit,
            texture: texture.id(),
        });
    }

    fn upload_vertices(&mut self, vertices: &[f32]) {
        self.commands.push(Command::Upload(vertices.to_vec()));
    }

    fn draw_quads(&mut self, quads: usize) {
        self.commands.push(Command::DrawQuads(quads));
    }
}
