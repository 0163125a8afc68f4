use thiserror::Error;

/// everything that can go wrong in the engine and around it
#[derive(Debug, Error)]
pub enum EvolveError {
    /// target and candidate rasters differ in size. never expected at runtime,
    /// dimensions are fixed once the target is loaded
    #[error("raster dimensions differ: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("canvas must be non-empty, got {width}x{height}")]
    EmptyCanvas { width: u32, height: u32 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("generation produced no candidates")]
    EmptyGeneration,

    #[error("engine thread exited without a result")]
    WorkerDisconnected,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, EvolveError>;
