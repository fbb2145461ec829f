use thiserror::Error;

/// Registry lookup failures.
///
/// These are programmer errors: registrations happen once at startup, so a
/// missing entry means the wiring is wrong, not that the application hit a
/// runtime condition. The panicking accessors on `StateCtx` format these.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("state {0} is not registered")]
    StateNotFound(&'static str),
    #[error("compute {0} is not registered")]
    ComputeNotFound(&'static str),
    #[error("command {0} is not registered")]
    CommandNotFound(&'static str),
}
