use std::marker::PhantomData;

use tracing::{debug, instrument, trace, warn};

use crate::{
    backend::{BatchTexture, RenderBackend, ShaderProgram},
    buffer::VertexBuffer,
    config::{BatchConfig, BlendFunction},
    math::Projection,
    Error, Result,
};

/// The shader uniform the projection matrix is assigned to.
pub const PROJECTION_UNIFORM: &str = "u_projection";
/// The shader uniform holding the texture unit quads sample from.
pub const TEXTURE_UNIFORM: &str = "u_texture";

/// Describes how one vertex is laid out in the interleaved float stream.
pub trait VertexLayout {
    /// The number of floats one vertex occupies.
    const VERTEX_SIZE: usize;
    /// The number of floats one quad occupies.
    const QUAD_SIZE: usize = Self::VERTEX_SIZE * 4;
}

/// Counters describing the draw calls a batch has issued.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BatchStats {
    /// Draw calls issued since the last `begin`.
    pub render_calls: usize,
    /// Draw calls issued since the batch was created.
    pub total_render_calls: usize,
    /// The largest number of quads submitted by a single draw call.
    pub max_quads_in_batch: usize,
}

/// The begin/draw/flush/end state machine shared by every batch.
///
/// A session owns the vertex buffer and decides when it must be flushed. It
/// knows nothing about what the floats it stores mean beyond their
/// [`VertexLayout`]; batches built on top of it produce the vertices.
pub struct BatchSession<B, V>
where
    B: RenderBackend,
{
    backend: B,
    buffer: VertexBuffer,
    drawing: bool,
    texture: Option<B::Texture>,
    projection: Projection,
    blending: Option<BlendFunction>,
    stats: BatchStats,
    shader_log: Option<String>,
    _layout: PhantomData<V>,
}

impl<B, V> BatchSession<B, V>
where
    B: RenderBackend,
    V: VertexLayout,
{
    /// Creates a session drawing through `backend`.
    ///
    /// The index buffer for `config.max_quads` quads is handed to the backend
    /// immediately. If the backend's shader reports a compilation log it is
    /// emitted as a warning and kept available through
    /// [`shader_log`](Self::shader_log); creation still succeeds.
    pub fn new(mut backend: B, config: &BatchConfig) -> Result<Self> {
        let max_quads = config.max_quads;
        if max_quads == 0 || max_quads > BatchConfig::MAX_QUADS {
            return Err(Error::InvalidCapacity {
                requested: max_quads,
                max: BatchConfig::MAX_QUADS,
            });
        }

        let shader_log = backend
            .shader_mut()
            .log()
            .map(str::trim)
            .filter(|log| !log.is_empty())
            .map(str::to_owned);
        if let Some(log) = &shader_log {
            warn!(log = %log, "shader program reported diagnostics");
        }

        backend.prepare_indices(&quad_indices(max_quads));

        let projection = config
            .viewport
            .map_or_else(Projection::identity, |size| {
                Projection::from_viewport(size.width, size.height)
            });

        debug!(max_quads, vertex_size = V::VERTEX_SIZE, "created batch session");
        Ok(Self {
            backend,
            buffer: VertexBuffer::new(max_quads * V::QUAD_SIZE),
            drawing: false,
            texture: None,
            projection,
            blending: config.blending,
            stats: BatchStats::default(),
            shader_log,
            _layout: PhantomData,
        })
    }

    /// Opens a session. Binds the program, pushes the projection, disables
    /// depth writes and selects texture unit 0.
    pub fn begin(&mut self) -> Result<()> {
        if self.drawing {
            return Err(Error::AlreadyDrawing);
        }

        self.backend.bind_program();
        self.push_uniforms();
        self.backend.set_depth_mask(false);
        self.stats.render_calls = 0;
        self.drawing = true;
        Ok(())
    }

    /// Flushes any buffered quads and closes the session, restoring depth
    /// writes.
    pub fn end(&mut self) -> Result<()> {
        self.ensure_drawing("end")?;

        self.flush();
        self.drawing = false;
        self.backend.set_depth_mask(true);
        self.backend.unbind_program();
        Ok(())
    }

    /// Submits the buffered quads with a single draw call.
    ///
    /// Does nothing if no quads are buffered. The current texture is kept, so
    /// further quads with the same texture don't count as a texture switch.
    #[instrument(name = "BatchSession::flush", level = "trace", skip(self))]
    pub fn flush(&mut self) {
        let texture = match &self.texture {
            Some(texture) if !self.buffer.is_empty() => texture,
            _ => return,
        };

        let quads = self.buffer.cursor() / V::QUAD_SIZE;
        self.backend.bind_texture(0, texture);
        self.backend.set_blending(self.blending);
        self.backend.upload_vertices(self.buffer.populated());
        self.backend.draw_quads(quads);

        self.stats.render_calls += 1;
        self.stats.total_render_calls += 1;
        self.stats.max_quads_in_batch = self.stats.max_quads_in_batch.max(quads);
        self.buffer.reset();
    }

    /// Returns an error naming `operation` unless a session is open.
    pub fn ensure_drawing(&self, operation: &'static str) -> Result<()> {
        if self.drawing {
            Ok(())
        } else {
            Err(Error::NotDrawing(operation))
        }
    }

    /// Reserves room for one quad drawn with `texture` and returns the slot
    /// its vertices must be written to.
    ///
    /// A `None` texture draws nothing and returns `Ok(None)`. Switching to a
    /// different texture, or reserving while the buffer is full, flushes the
    /// buffered quads first.
    pub fn reserve_quad(
        &mut self,
        operation: &'static str,
        texture: Option<&B::Texture>,
    ) -> Result<Option<&mut [f32]>> {
        self.ensure_drawing(operation)?;
        let texture = match texture {
            Some(texture) => texture,
            None => return Ok(None),
        };

        match self.texture.as_ref().map(|current| current.id() != texture.id()) {
            Some(true) => {
                trace!(texture = texture.id(), "texture switch");
                self.flush();
                self.texture = Some(texture.clone());
            }
            Some(false) => {
                if self.buffer.is_full() {
                    trace!(texture = texture.id(), "buffer full");
                    self.flush();
                }
            }
            None => self.texture = Some(texture.clone()),
        }

        Ok(Some(self.buffer.reserve(V::QUAD_SIZE)))
    }

    /// Replaces the projection. Quads already buffered are flushed first when
    /// the matrix changes mid-session, so they render with the projection
    /// they were drawn under.
    pub fn set_projection(&mut self, projection: Projection) {
        if self.projection == projection {
            return;
        }

        if self.drawing {
            self.flush();
        }
        self.projection = projection;
        if self.drawing {
            self.push_uniforms();
        }
    }

    /// Changes the blending applied to subsequent draw calls, flushing
    /// buffered quads first when it changes mid-session.
    pub fn set_blending(&mut self, blending: Option<BlendFunction>) {
        if self.blending == blending {
            return;
        }

        if self.drawing {
            self.flush();
        }
        self.blending = blending;
    }

    fn push_uniforms(&mut self) {
        let shader = self.backend.shader_mut();
        shader.set_uniform_matrix4(PROJECTION_UNIFORM, &self.projection);
        shader.set_uniform_int(TEXTURE_UNIFORM, 0);
    }

    /// Returns true between `begin` and `end`.
    #[must_use]
    pub const fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// The number of floats currently buffered.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    /// The number of quads currently buffered.
    #[must_use]
    pub const fn buffered_quads(&self) -> usize {
        self.buffer.cursor() / V::QUAD_SIZE
    }

    /// The number of quads that fit in one draw call.
    #[must_use]
    pub fn max_quads(&self) -> usize {
        self.buffer.capacity() / V::QUAD_SIZE
    }

    /// The underlying vertex buffer.
    #[must_use]
    pub const fn buffer(&self) -> &VertexBuffer {
        &self.buffer
    }

    /// The texture buffered quads are drawn with.
    #[must_use]
    pub const fn current_texture(&self) -> Option<&B::Texture> {
        self.texture.as_ref()
    }

    /// The current projection.
    #[must_use]
    pub const fn projection(&self) -> &Projection {
        &self.projection
    }

    /// The current blending.
    #[must_use]
    pub const fn blending(&self) -> Option<BlendFunction> {
        self.blending
    }

    /// The draw call counters.
    #[must_use]
    pub const fn stats(&self) -> BatchStats {
        self.stats
    }

    /// The shader compilation log reported when the session was created.
    #[must_use]
    pub fn shader_log(&self) -> Option<&str> {
        self.shader_log.as_deref()
    }

    /// The backend quads are submitted to.
    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// The backend quads are submitted to.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consumes the session, returning the backend.
    #[must_use]
    pub fn into_backend(self) -> B {
        self.backend
    }
}

/// Builds the index pattern for `quads` quads: two triangles per quad,
/// `0, 1, 2` and `2, 3, 0`, offset by four vertices per quad.
#[must_use]
pub fn quad_indices(quads: usize) -> Vec<u16> {
    (0..quads)
        .flat_map(|quad| {
            let first = (quad * 4) as u16;
            [first, first + 1, first + 2, first + 2, first + 3, first]
        })
        .collect()
}
