use thiserror::Error;

/// Errors surfaced by [`render`](crate::FractalEngine::render) and the
/// enum parsers. All are terminal for the current call; the engine never
/// retries or falls back to another backend on its own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The mapping factors divide by `width - 1` and `height - 1`, so both
    /// dimensions must be at least 2.
    #[error("invalid dimensions {width}x{height}: width and height must be >= 2")]
    InvalidDimension { width: u32, height: u32 },

    /// A mode or kind label outside the enumerated set.
    #[error("unsupported mode {0:?}")]
    UnsupportedMode(String),

    /// The GPU backend was requested but no compute adapter or device
    /// could be acquired.
    #[error("no GPU compute device available")]
    DeviceUnavailable,

    /// The compute kernel failed to build on the selected device.
    #[error("kernel build failure: {0}")]
    KernelBuildFailure(String),
}
