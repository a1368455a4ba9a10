use thiserror::Error;

/// Errors from choosing a sum position that is only known at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PositionError {
    #[error("position {position} is out of range for a sum of {len} positions")]
    OutOfRange { position: usize, len: usize },
}
