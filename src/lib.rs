//! Typed controller initialization for robot hardware
//!
//! A controller declares which hardware interface kind it needs. The
//! [`Controller`] gate checks that the hardware handle can present that kind,
//! narrows it and runs the controller's `init` exactly once.
//!
//! ```text
//! robot.toml ──► RobotConfig ──► HardwareInterface ─┐
//!                     │                             ▼
//!                     └────► ConfigScope ──► ControllerManager ──► Controller<C>::init_request
//! ```

pub mod config;
pub mod controller;
pub mod controllers;
pub mod hardware;
pub mod manager;
pub mod scope;

pub use config::RobotConfig;
pub use controller::{
    Controller, ControllerBase, ControllerError, ControllerInit, InitError, LifecycleState,
};
pub use hardware::{HardwareConfig, HardwareError, HardwareInterface, TypedInterface};
pub use manager::{ControllerManager, ControllerRegistry, LoadReport, ManagerError};
pub use scope::{ConfigScope, ScopeError};
