use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum Error {
    #[error("{name} must be positive")]
    InvalidDimension { name: &'static str },

    /// Raised only when block clipping is broken; callers shouldn't retry.
    #[error("pixel ({x}, {y}) is outside of the {width}x{height} buffer")]
    PixelAccessFault { x: u32, y: u32, width: u32, height: u32 },

    #[error("grid covers {grid_width}x{grid_height} pixels but the image is {width}x{height}")]
    GridMismatch {
        grid_width: u32,
        grid_height: u32,
        width: u32,
        height: u32,
    },

    #[error("can't average a block with no pixels")]
    EmptyBlock,

    #[error("unknown mode `{0}` (expected S or M)")]
    InvalidMode(String),

    #[error("couldn't start worker pool: {0}")]
    ThreadPool(String),
}
