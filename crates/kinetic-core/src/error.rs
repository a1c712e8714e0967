use thiserror::Error;

/// Errors produced by the parsing surfaces of the core.
///
/// Sampling and animation never fail; only user-supplied identifiers and
/// configuration values can be rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum KineticError {
    #[error("unknown shape '{0}'")]
    UnknownShape(String),
    #[error("invalid colour '{0}', expected #rrggbb or #rgb")]
    InvalidColor(String),
    #[error("invalid value '{value}' for '{key}'")]
    InvalidParam { key: String, value: String },
    #[error("unknown configuration key '{0}'")]
    UnknownParam(String),
    #[error("particle count {count} outside 1..={max}")]
    ParticleCount { count: usize, max: usize },
}

pub type Result<T> = std::result::Result<T, KineticError>;
