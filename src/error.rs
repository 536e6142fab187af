/// All errors that `spritebatch` can return.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// `begin` was called while the batch was already drawing.
    #[error("begin called while the batch is already drawing; call end first")]
    AlreadyDrawing,
    /// An operation that requires an open session was called while idle.
    #[error("{0} called while the batch is not drawing; call begin first")]
    NotDrawing(&'static str),
    /// The requested quad capacity can't be indexed by the batch.
    #[error("batch capacity must be between 1 and {max} quads, got {requested}")]
    InvalidCapacity {
        /// The capacity that was requested.
        requested: usize,
        /// The largest supported capacity.
        max: usize,
    },
    /// Raw vertex data didn't contain a full quad at the requested offset.
    #[error(
        "vertex data too short: a quad at offset {offset} needs {required} floats, only {available} available"
    )]
    VertexDataTooShort {
        /// The offset the quad was read from.
        offset: usize,
        /// The number of floats one quad occupies.
        required: usize,
        /// The total length of the provided data.
        available: usize,
    },
    /// An error opening an image.
    #[error("error reading image: {0}")]
    Image(#[from] image::ImageError),
}

impl Error {
    /// Returns true if this error was caused by calling an operation in the
    /// wrong session state.
    #[must_use]
    pub const fn is_illegal_state(&self) -> bool {
        matches!(self, Self::AlreadyDrawing | Self::NotDrawing(_))
    }
}
