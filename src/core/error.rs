use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParableError {
    #[error("Speed must be non-zero (the time per step divides by it).")]
    ZeroSpeed,
    #[error("Step length must be non-zero, otherwise the arc never advances.")]
    ZeroStepLength,
    #[error("Arc does not move: forward and gravity along up are both zero.")]
    Stalled,
    #[error("Up vector must be non-zero to define the flat plane.")]
    ZeroUp,
    #[error("Parameter '{parameter}' must be finite.")]
    NonFinite { parameter: &'static str },
}

pub type Result<T> = std::result::Result<T, ParableError>;
