//! Controller manager with statum state machine
//!
//! Owns the hardware handle and the root configuration scope, builds
//! controllers from the registry and runs their initialization handshake.
//!
//! # State Machine
//!
//! ```text
//! Loading ──(finish)──► Ready
//!   │
//!   └─ load_controller / load_all
//! ```
//!
//! Controllers are declared under the `controllers` table of the root scope:
//!
//! ```toml
//! [controllers.arm_controller]
//! type = "ArmPositionController"
//! joints = ["shoulder", "elbow"]
//! ```

pub mod registry;

pub use registry::{ControllerFactory, ControllerRegistry};

use crate::controller::{ControllerBase, InitError};
use crate::hardware::HardwareInterface;
use crate::scope::{ConfigScope, ScopeError};
use chrono::{DateTime, Local};
use serde::Serialize;
use statum::{machine, state};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Table under the root scope holding one sub-table per controller
pub const CONTROLLERS_NAMESPACE: &str = "controllers";

#[derive(Debug, Error)]
pub enum ManagerError {
    #[error("Unknown controller type: {0}")]
    UnknownType(String),

    #[error("Controller type registered twice: {0}")]
    DuplicateType(String),

    #[error("Controller already loaded: {0}")]
    AlreadyLoaded(String),

    #[error("Configuration error: {0}")]
    Scope(#[from] ScopeError),

    #[error("Initialization error: {0}")]
    Init(#[from] InitError),
}

/// A controller that passed its initialization handshake
pub struct LoadedController {
    controller: Box<dyn ControllerBase>,
    loaded_at: DateTime<Local>,
}

impl LoadedController {
    pub fn controller(&self) -> &dyn ControllerBase {
        self.controller.as_ref()
    }

    pub fn loaded_at(&self) -> DateTime<Local> {
        self.loaded_at
    }
}

/// Controller that could not be loaded, with the reason
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoadFailure {
    pub name: String,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoadedEntry {
    pub name: String,
    pub type_name: String,
    pub interface: String,
    pub claimed: Vec<String>,
    pub loaded_at: DateTime<Local>,
}

/// Summary of a loading phase
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LoadReport {
    pub hardware: String,
    pub available: Vec<String>,
    pub loaded: Vec<LoadedEntry>,
    pub failed: Vec<LoadFailure>,
}

/// States for the manager lifecycle using statum
#[state]
#[derive(Debug, Clone)]
pub enum ManagerState {
    Loading, // Controllers may be added and initialized
    Ready,   // Loading closed, report available
}

#[machine]
pub struct ControllerManager<S: ManagerState> {
    hardware: HardwareInterface,
    root: ConfigScope,
    registry: ControllerRegistry,
    controllers: Vec<LoadedController>,
    failures: Vec<LoadFailure>,
}

impl<S: ManagerState> ControllerManager<S> {
    pub fn hardware(&self) -> &HardwareInterface {
        &self.hardware
    }

    pub fn controller(&self, name: &str) -> Option<&dyn ControllerBase> {
        self.controllers
            .iter()
            .find(|loaded| loaded.controller.name() == name)
            .map(LoadedController::controller)
    }

    pub fn controllers(&self) -> impl Iterator<Item = &LoadedController> {
        self.controllers.iter()
    }

    pub fn failures(&self) -> &[LoadFailure] {
        &self.failures
    }
}

impl ControllerManager<Loading> {
    pub fn create(
        hardware: HardwareInterface,
        root: ConfigScope,
        registry: ControllerRegistry,
    ) -> Self {
        info!(
            "Creating controller manager on {} with types {:?}",
            hardware.label(),
            registry.types()
        );
        Self::new(hardware, root, registry, Vec::new(), Vec::new())
    }

    /// Names of the controllers declared in the root scope
    pub fn declared(&self) -> Vec<String> {
        match self.root.child(CONTROLLERS_NAMESPACE) {
            Ok(scope) => scope.children(),
            Err(e) => {
                warn!("No controllers declared: {}", e);
                Vec::new()
            }
        }
    }

    /// Builds the controller declared as `name` and runs its handshake
    ///
    /// A controller whose handshake fails is dropped. The caller may fix the
    /// configuration and load it again.
    pub fn load_controller(&mut self, name: &str) -> Result<(), ManagerError> {
        if self.controller(name).is_some() {
            return Err(ManagerError::AlreadyLoaded(name.to_string()));
        }

        let scope = self.root.child(CONTROLLERS_NAMESPACE)?.child(name)?;
        let type_name: String = scope.get("type")?;
        debug!("Loading controller {} of type {}", name, type_name);

        let mut controller = self.registry.create(&type_name, name)?;
        controller.init_request(&mut self.hardware, &scope)?;

        info!("Loaded controller {} ({})", name, type_name);
        self.controllers.push(LoadedController {
            controller,
            loaded_at: Local::now(),
        });
        Ok(())
    }

    /// Loads every declared controller, recording failures instead of stopping
    ///
    /// Returns the number of controllers loaded by this call.
    pub fn load_all(&mut self) -> usize {
        let mut loaded = 0;
        for name in self.declared() {
            match self.load_controller(&name) {
                Ok(()) => loaded += 1,
                Err(e) => {
                    warn!("Failed to load controller {}: {}", name, e);
                    self.failures.push(LoadFailure {
                        name,
                        reason: e.to_string(),
                    });
                }
            }
        }
        loaded
    }

    pub fn finish(self) -> ControllerManager<Ready> {
        info!(
            "Controller loading finished: {} loaded, {} failed",
            self.controllers.len(),
            self.failures.len()
        );
        self.transition()
    }
}

impl ControllerManager<Ready> {
    pub fn report(&self) -> LoadReport {
        LoadReport {
            hardware: self.hardware.label().to_string(),
            available: self
                .hardware
                .available_types()
                .into_iter()
                .map(str::to_string)
                .collect(),
            loaded: self
                .controllers
                .iter()
                .map(|loaded| LoadedEntry {
                    name: loaded.controller.name().to_string(),
                    type_name: loaded.controller.type_name().to_string(),
                    interface: loaded.controller.required_interface().to_string(),
                    claimed: loaded.controller.claimed_resources(),
                    loaded_at: loaded.loaded_at,
                })
                .collect(),
            failed: self.failures.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::LifecycleState;
    use crate::controllers::register_builtin;
    use crate::hardware::{ArmInterface, HardwareInterface, ResourceManager, RobotHardware};

    fn registry() -> ControllerRegistry {
        let mut registry = ControllerRegistry::new();
        register_builtin(&mut registry).unwrap();
        registry
    }

    fn arm_only() -> HardwareInterface {
        HardwareInterface::Robot(RobotHardware {
            arm: Some(ArmInterface::new(
                ResourceManager::from_names(["shoulder", "elbow"]).unwrap(),
            )),
            ..Default::default()
        })
    }

    fn root(body: &str) -> ConfigScope {
        ConfigScope::root(toml::from_str(body).unwrap())
    }

    #[test]
    fn loads_declared_controllers_and_records_failures() {
        let mut manager = ControllerManager::create(
            arm_only(),
            root(
                r#"
                [controllers.arm]
                type = "ArmPositionController"
                joints = ["shoulder", "elbow"]

                [controllers.hand]
                type = "GripperController"
                max_effort = 10.0
                "#,
            ),
            registry(),
        );

        assert_eq!(manager.load_all(), 1);
        let manager = manager.finish();

        let arm = manager.controller("arm").unwrap();
        assert_eq!(arm.state(), LifecycleState::Initialized);
        assert!(manager.controller("hand").is_none());

        let report = manager.report();
        assert_eq!(report.hardware, "RobotHardware");
        assert_eq!(report.loaded.len(), 1);
        assert_eq!(report.loaded[0].claimed, vec!["shoulder", "elbow"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].name, "hand");
        assert!(report.failed[0].reason.contains("GripperInterface"));
    }

    #[test]
    fn loading_twice_is_rejected() {
        let mut manager = ControllerManager::create(
            arm_only(),
            root("[controllers.arm]\ntype = \"ArmPositionController\"\njoints = [\"elbow\"]"),
            registry(),
        );

        manager.load_controller("arm").unwrap();
        assert!(matches!(
            manager.load_controller("arm"),
            Err(ManagerError::AlreadyLoaded(_))
        ));
    }

    #[test]
    fn unknown_type_and_missing_declaration() {
        let mut manager = ControllerManager::create(
            arm_only(),
            root("[controllers.arm]\ntype = \"TrajectoryController\""),
            registry(),
        );

        assert!(matches!(
            manager.load_controller("arm"),
            Err(ManagerError::UnknownType(_))
        ));
        assert!(matches!(
            manager.load_controller("base"),
            Err(ManagerError::Scope(ScopeError::MissingParam { .. }))
        ));
        assert!(manager.controllers().next().is_none());
    }

    #[test]
    fn no_controllers_table() {
        let mut manager = ControllerManager::create(arm_only(), root(""), registry());
        assert!(manager.declared().is_empty());
        assert_eq!(manager.load_all(), 0);
        assert!(manager.finish().report().loaded.is_empty());
    }
}
