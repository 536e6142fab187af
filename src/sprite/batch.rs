use crate::{
    backend::RenderBackend,
    color::{Color, PackedColor},
    config::{BatchConfig, BlendFunction},
    math::Projection,
    session::{BatchSession, BatchStats, VertexLayout},
    sprite::{DrawOptions, Quad, SpriteVertex},
    texture::TextureRegion,
    Error, Result,
};

/// Collects textured quads and submits them in as few draw calls as possible.
///
/// Quads are buffered between [`begin`](Self::begin) and [`end`](Self::end).
/// Consecutive quads using the same texture share one draw call; drawing with
/// a different texture, or filling the buffer, flushes what has been buffered
/// so far. Quads are never reordered, so sorting draws by texture is left to
/// the caller.
///
/// ```rust
/// use spritebatch::{backend::recording::RecordingBackend, prelude::*};
/// # use image::DynamicImage;
///
/// # fn main() -> spritebatch::Result<()> {
/// let texture = Texture::new(&DynamicImage::new_rgba8(32, 32));
/// let mut batch = SpriteBatch::new(RecordingBackend::<Texture>::default())?;
///
/// batch.begin()?;
/// batch.draw(&texture, &DrawOptions::at(10., 20.))?;
/// batch.draw(&texture, &DrawOptions::at(50., 20.).sized(16., 16.))?;
/// batch.end()?;
///
/// assert_eq!(batch.backend().draw_calls(), vec![2]);
/// # Ok(())
/// # }
/// ```
pub struct SpriteBatch<B>
where
    B: RenderBackend,
{
    session: BatchSession<B, SpriteVertex>,
    color: Color,
    packed_color: PackedColor,
}

impl<B> SpriteBatch<B>
where
    B: RenderBackend,
{
    /// Returns a batch drawing through `backend` with the default
    /// configuration.
    pub fn new(backend: B) -> Result<Self> {
        Self::with_config(backend, &BatchConfig::default())
    }

    /// Returns a batch drawing through `backend`.
    pub fn with_config(backend: B, config: &BatchConfig) -> Result<Self> {
        Ok(Self {
            session: BatchSession::new(backend, config)?,
            color: config.color,
            packed_color: config.color.packed(),
        })
    }

    /// Opens a drawing session.
    pub fn begin(&mut self) -> Result<()> {
        self.session.begin()
    }

    /// Submits any buffered quads and closes the drawing session.
    pub fn end(&mut self) -> Result<()> {
        self.session.end()
    }

    /// Submits any buffered quads. Can be called whether or not a session is
    /// open, and does nothing if nothing is buffered.
    pub fn flush(&mut self) {
        self.session.flush();
    }

    /// Draws `texture` as described by `options`.
    ///
    /// A `None` texture draws nothing.
    pub fn draw<'a>(
        &mut self,
        texture: impl Into<Option<&'a B::Texture>>,
        options: &DrawOptions,
    ) -> Result<()>
    where
        B::Texture: 'a,
    {
        self.session.ensure_drawing("draw")?;
        let texture = match texture.into() {
            Some(texture) => texture,
            None => return Ok(()),
        };

        let quad = Quad::new(&options.transform(texture), options.uv);
        let vertices = quad.vertices(self.packed_color);
        if let Some(slot) = self.session.reserve_quad("draw", Some(texture))? {
            slot.copy_from_slice(bytemuck::cast_slice(&vertices));
        }
        Ok(())
    }

    /// Draws `region` at `x, y`. Dimensions left as `None` take the region's
    /// size in pixels.
    pub fn draw_region(
        &mut self,
        region: &TextureRegion<B::Texture>,
        x: f32,
        y: f32,
        width: Option<f32>,
        height: Option<f32>,
    ) -> Result<()> {
        let mut options = DrawOptions::at(x, y).with_uv(region.uv());
        options.width = width.or_else(|| region.width());
        options.height = height.or_else(|| region.height());
        self.draw(region.texture(), &options)
    }

    /// Copies one quad of already transformed vertices, starting at
    /// `vertices[offset]`, into the batch.
    ///
    /// The floats must follow the [`SpriteVertex`] layout: one quad is
    /// [`vertex_size`](Self::vertex_size) times four floats. A `None` texture
    /// draws nothing.
    pub fn draw_vertices<'a>(
        &mut self,
        texture: impl Into<Option<&'a B::Texture>>,
        vertices: &[f32],
        offset: usize,
    ) -> Result<()>
    where
        B::Texture: 'a,
    {
        self.session.ensure_drawing("draw_vertices")?;
        let texture = match texture.into() {
            Some(texture) => texture,
            None => return Ok(()),
        };

        let quad = offset
            .checked_add(SpriteVertex::QUAD_SIZE)
            .and_then(|end| vertices.get(offset..end))
            .ok_or(Error::VertexDataTooShort {
                offset,
                required: SpriteVertex::QUAD_SIZE,
                available: vertices.len(),
            })?;
        if let Some(slot) = self.session.reserve_quad("draw_vertices", Some(texture))? {
            slot.copy_from_slice(quad);
        }
        Ok(())
    }

    /// Sets the tint applied to quads drawn after this call. Quads already
    /// drawn keep the color they were drawn with.
    pub fn set_color(&mut self, color: impl Into<Color>) {
        let color = color.into();
        if self.color != color {
            self.color = color;
            self.packed_color = color.packed();
        }
    }

    /// The current tint.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// The current tint as written into the vertex stream.
    #[must_use]
    pub const fn packed_color(&self) -> PackedColor {
        self.packed_color
    }

    /// Replaces the projection, flushing first if it changes mid-session.
    pub fn set_projection(&mut self, projection: impl Into<Projection>) {
        self.session.set_projection(projection.into());
    }

    /// The current projection.
    #[must_use]
    pub const fn projection(&self) -> &Projection {
        self.session.projection()
    }

    /// Sets the projection to a y-down screen projection for a viewport of
    /// `width` by `height`.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.session
            .set_projection(Projection::from_viewport(width, height));
    }

    /// Changes the blending used by later draw calls. `None` disables
    /// blending.
    pub fn set_blending(&mut self, blending: Option<BlendFunction>) {
        self.session.set_blending(blending);
    }

    /// The current blending.
    #[must_use]
    pub const fn blending(&self) -> Option<BlendFunction> {
        self.session.blending()
    }

    /// The number of floats in one vertex.
    #[must_use]
    pub const fn vertex_size(&self) -> usize {
        SpriteVertex::VERTEX_SIZE
    }

    /// Returns true between `begin` and `end`.
    #[must_use]
    pub const fn is_drawing(&self) -> bool {
        self.session.is_drawing()
    }

    /// The number of floats currently buffered.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.session.cursor()
    }

    /// The number of quads that fit in one draw call.
    #[must_use]
    pub fn max_quads(&self) -> usize {
        self.session.max_quads()
    }

    /// The texture buffered quads are drawn with.
    #[must_use]
    pub const fn current_texture(&self) -> Option<&B::Texture> {
        self.session.current_texture()
    }

    /// The draw call counters.
    #[must_use]
    pub const fn stats(&self) -> BatchStats {
        self.session.stats()
    }

    /// The shader compilation log reported when the batch was created.
    #[must_use]
    pub fn shader_log(&self) -> Option<&str> {
        self.session.shader_log()
    }

    /// The session driving this batch.
    #[must_use]
    pub const fn session(&self) -> &BatchSession<B, SpriteVertex> {
        &self.session
    }

    /// The backend quads are submitted to.
    #[must_use]
    pub const fn backend(&self) -> &B {
        self.session.backend()
    }

    /// The backend quads are submitted to.
    pub fn backend_mut(&mut self) -> &mut B {
        self.session.backend_mut()
    }

    /// Consumes the batch, returning the backend.
    #[must_use]
    pub fn into_backend(self) -> B {
        self.session.into_backend()
    }
}
