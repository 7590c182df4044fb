//! Error types for controller initialization

use crate::hardware::HardwareError;
use crate::scope::ScopeError;
use thiserror::Error;

use super::LifecycleState;

/// Failure reported by a controller's own `init`
#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("Parameter error: {0}")]
    Param(#[from] ScopeError),

    #[error("Hardware error: {0}")]
    Hardware(#[from] HardwareError),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Why an initialization request was rejected
///
/// Every variant leaves the controller in [`LifecycleState::Constructed`] or,
/// for `NotConstructed`, in whatever state it already had.
#[derive(Debug, Error)]
pub enum InitError {
    /// The controller is not in `Constructed`, e.g. it was already initialized
    #[error("Cannot initialize controller {controller}: not constructed (state: {state})")]
    NotConstructed {
        controller: String,
        state: LifecycleState,
    },

    /// The hardware handle cannot present the interface the controller needs
    #[error("Controller {controller} requires a hardware interface of type {required}, available: {available:?}")]
    TypeMismatch {
        controller: String,
        required: &'static str,
        available: Vec<&'static str>,
    },

    /// The controller's own `init` failed
    #[error("Failed to initialize controller {controller}: {source}")]
    ControllerInit {
        controller: String,
        #[source]
        source: ControllerError,
    },
}
