//! Typed initialization gate
//!
//! [`Controller`] wraps a user controller and performs the one-shot handshake
//! between an untyped [`HardwareInterface`] and the typed `init` of the
//! controller:
//!
//! ```text
//! init_request(hw, scope)
//!   ├─ state != Constructed        ──► NotConstructed
//!   ├─ required label not in hw    ──► TypeMismatch
//!   ├─ view_mut(hw) == None        ──► TypeMismatch
//!   ├─ inner.init(typed, scope) Err ──► ControllerInit
//!   └─ Ok                          ──► state = Initialized
//! ```

use tracing::{debug, error, info};

use super::{ControllerError, InitError, LifecycleState};
use crate::hardware::{HardwareInterface, TypedInterface};
use crate::scope::ConfigScope;

/// Contract every concrete controller implements
///
/// `init` receives the interface already narrowed to `Self::Hardware` and the
/// controller's own configuration scope. It reads its parameters, claims the
/// resources it needs and reports whether setup succeeded. It is called from
/// the management thread, never from a real-time loop.
pub trait ControllerInit: Send + 'static {
    /// Hardware interface kind this controller binds to
    type Hardware: TypedInterface;

    fn init(
        &mut self,
        hw: &mut Self::Hardware,
        scope: &ConfigScope,
    ) -> Result<(), ControllerError>;

    /// Type name used in diagnostics and by the registry
    fn type_name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Resources this controller claimed during `init`
    fn claimed_resources(&self) -> Vec<String> {
        Vec::new()
    }
}

/// Object-safe view of a controller, used by the manager to hold
/// controllers of different hardware kinds side by side
pub trait ControllerBase: Send {
    fn name(&self) -> &str;

    fn type_name(&self) -> &'static str;

    fn state(&self) -> LifecycleState;

    /// Label of the hardware interface the controller requires
    fn required_interface(&self) -> &'static str;

    fn claimed_resources(&self) -> Vec<String>;

    fn init_request(
        &mut self,
        hw: &mut HardwareInterface,
        scope: &ConfigScope,
    ) -> Result<(), InitError>;
}

/// Gate around a concrete controller
///
/// Not `Clone`: each instance is one binding to one hardware resource and one
/// configuration scope.
#[derive(Debug)]
pub struct Controller<C: ControllerInit> {
    name: String,
    state: LifecycleState,
    inner: C,
}

impl<C: ControllerInit> Controller<C> {
    pub fn new(name: impl Into<String>, inner: C) -> Self {
        let name = name.into();
        debug!(
            "Constructed controller {} requiring {}",
            name,
            C::Hardware::LABEL
        );
        Self {
            name,
            state: LifecycleState::Constructed,
            inner,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    pub fn is_initialized(&self) -> bool {
        self.state.is_initialized()
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn required_interface(&self) -> &'static str {
        C::Hardware::LABEL
    }

    /// Runs the initialization handshake
    ///
    /// Only allowed from `Constructed`. Checks that `hw` can present
    /// `C::Hardware`, narrows it and hands it to the controller's `init`.
    /// The state advances to `Initialized` only if every step succeeds.
    pub fn init_request(
        &mut self,
        hw: &mut HardwareInterface,
        scope: &ConfigScope,
    ) -> Result<(), InitError> {
        if self.state != LifecycleState::Constructed {
            error!(
                "Cannot initialize controller {} because it is not constructed (state: {})",
                self.name, self.state
            );
            return Err(InitError::NotConstructed {
                controller: self.name.clone(),
                state: self.state,
            });
        }

        let required = C::Hardware::LABEL;
        let hw_label = hw.label();
        let available = hw.available_types();
        debug!(
            "Controller {} requires {}, hardware {} presents {:?}",
            self.name,
            required,
            hw_label,
            available
        );

        if !available.contains(&required) {
            error!(
                "Controller {} requires a hardware interface of type {}",
                self.name, required
            );
            return Err(InitError::TypeMismatch {
                controller: self.name.clone(),
                required,
                available,
            });
        }

        let Some(typed) = C::Hardware::view_mut(hw) else {
            error!(
                "Hardware {} lists {} but cannot present it",
                hw_label,
                required
            );
            return Err(InitError::TypeMismatch {
                controller: self.name.clone(),
                required,
                available,
            });
        };

        if let Err(source) = self.inner.init(typed, scope) {
            error!("Failed to initialize controller {}: {}", self.name, source);
            return Err(InitError::ControllerInit {
                controller: self.name.clone(),
                source,
            });
        }

        self.state = LifecycleState::Initialized;
        info!(
            "Controller {} initialized on {} ({})",
            self.name,
            required,
            scope.namespace()
        );
        Ok(())
    }
}

impl<C: ControllerInit> ControllerBase for Controller<C> {
    fn name(&self) -> &str {
        &self.name
    }

    fn type_name(&self) -> &'static str {
        self.inner.type_name()
    }

    fn state(&self) -> LifecycleState {
        self.state
    }

    fn required_interface(&self) -> &'static str {
        C::Hardware::LABEL
    }

    fn claimed_resources(&self) -> Vec<String> {
        self.inner.claimed_resources()
    }

    fn init_request(
        &mut self,
        hw: &mut HardwareInterface,
        scope: &ConfigScope,
    ) -> Result<(), InitError> {
        Controller::init_request(self, hw, scope)
    }
}
