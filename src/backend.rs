use crate::{config::BlendFunction, math::Projection};

/// A headless backend that records every command it receives.
pub mod recording;

/// A texture that quads can be drawn with.
///
/// Handles are expected to be cheap to clone: the batch keeps a clone of the
/// texture it is currently accumulating quads for.
pub trait BatchTexture: Clone {
    /// A value that uniquely identifies the underlying GPU texture. Two handles
    /// with the same id are batched together.
    fn id(&self) -> u64;

    /// The natural width of the texture in pixels, if known.
    fn width(&self) -> Option<u32>;

    /// The natural height of the texture in pixels, if known.
    fn height(&self) -> Option<u32>;
}

/// A linked shader program able to receive the uniforms a batch sets.
pub trait ShaderProgram {
    /// Sets a 4x4 matrix uniform.
    fn set_uniform_matrix4(&mut self, name: &str, matrix: &Projection);

    /// Sets an integer uniform.
    fn set_uniform_int(&mut self, name: &str, value: i32);

    /// The compile/link log, if the program produced one.
    fn log(&self) -> Option<&str> {
        None
    }
}

/// The graphics context a batch submits its quads through.
///
/// Every method is infallible from the batch's point of view. Backends that
/// can fail (lost contexts, out of memory) report it through their own
/// channels.
pub trait RenderBackend {
    /// The texture handle type this backend binds.
    type Texture: BatchTexture;
    /// The shader program type this backend draws with.
    type Shader: ShaderProgram;

    /// The program used to draw quads. The batch only sets uniforms on it.
    fn shader_mut(&mut self) -> &mut Self::Shader;

    /// Fills the index buffer shared by every draw call. Called once when the
    /// batch is created, with six indices per quad of capacity.
    fn prepare_indices(&mut self, indices: &[u16]);

    /// Binds the shader program along with the vertex and index buffers.
    fn bind_program(&mut self);

    /// Unbinds what [`bind_program`](Self::bind_program) bound.
    fn unbind_program(&mut self);

    /// Enables or disables writes to the depth buffer.
    fn set_depth_mask(&mut self, enabled: bool);

    /// Enables blending with `function`, or disables blending for `None`.
    fn set_blending(&mut self, function: Option<BlendFunction>);

    /// Binds `texture` to the texture unit `unit`.
    fn bind_texture(&mut self, unit: u32, texture: &Self::Texture);

    /// Uploads `vertices` to the start of the vertex buffer.
    fn upload_vertices(&mut self, vertices: &[f32]);

    /// Issues one indexed draw call covering the first `quads` quads.
    fn draw_quads(&mut self, quads: usize);
}
