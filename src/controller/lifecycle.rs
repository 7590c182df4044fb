//! Lifecycle of a controller gate

use std::fmt::{self, Display};

/// Where a controller stands in its lifecycle
///
/// The only transition is `Constructed -> Initialized`. A failed
/// initialization leaves the controller in `Constructed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LifecycleState {
    #[default]
    Constructed,
    Initialized,
}

impl LifecycleState {
    pub fn is_initialized(self) -> bool {
        self == LifecycleState::Initialized
    }
}

impl Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecycleState::Constructed => write!(f, "Constructed"),
            LifecycleState::Initialized => write!(f, "Initialized"),
        }
    }
}
