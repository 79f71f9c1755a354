use thiserror::Error;

/// Input array does not match the channel count or dimensionality a stage
/// expects.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("expected 3 color channels in the last axis, found {found}")]
    ChannelCount { found: usize },
    #[error(
        "buffer holds {actual} samples but a {width}x{height}x{channels} image needs {expected}"
    )]
    BufferLength {
        width: usize,
        height: usize,
        channels: usize,
        expected: usize,
        actual: usize,
    },
}
