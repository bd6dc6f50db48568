/// Errors that can occur while laying out or encoding a frame.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FrameError {
    /// The device profile name is not known.
    #[error("unknown dmx device type: {0}")]
    UnknownProfile(String),

    /// A color literal could not be parsed.
    #[error("invalid color {0:?} (expected R,G,B with components 0-255)")]
    InvalidColor(String),

    /// The frame has fewer colors than the universe has fixtures.
    #[error("frame has {got} colors, universe needs {needed}")]
    NotEnoughColors { needed: usize, got: usize },

    /// The destination buffer does not match the layout's wire size.
    #[error("buffer is {got} bytes, layout needs {expected}")]
    BufferLength { expected: usize, got: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
