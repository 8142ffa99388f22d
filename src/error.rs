//! Error types for the evolutionary engine.
//!
//! The failure taxonomy is deliberately small:
//!
//! - **Configuration errors** ([`EcError::Config`]) are detected by
//!   `validate()` before any candidate is generated or evaluated — a run
//!   that starts has a well-formed configuration.
//! - **Evaluator failures** ([`EcError::Callback`]) propagate transparently
//!   with the original error intact; the engine never wraps, retries, or
//!   swallows them.
//! - Every other callback failure is a panic that propagates unmodified
//!   and aborts the run. Population-based search has no meaningful notion
//!   of a "partial" generation, so nothing is resumed or rolled back.
//!
//! The engine performs no compatibility checking between operators: a
//! selector returning fewer parents than a replacer expects is a caller
//! error that surfaces as whatever failure the replacer produces.

use thiserror::Error;

/// Boxed error produced by an evaluator implementation.
pub type EvalError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by [`Engine::evolve`](crate::ec::Engine::evolve) and by
/// configuration validation.
#[derive(Debug, Error)]
pub enum EcError {
    /// Invalid configuration, rejected before any evaluation occurs.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A failure raised inside an evaluator, passed through unmodified.
    #[error(transparent)]
    Callback(#[from] EvalError),
}
