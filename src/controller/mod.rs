//! Controller side of the initialization handshake
//!
//! - [`lifecycle`] - the two-state lifecycle of a controller
//! - [`gate`] - the typed initialization gate and the implementer contract
//! - [`error`] - failures the handshake can report
//!
//! # Handshake
//!
//! ```text
//! Manager ──► Controller::init_request(&mut HardwareInterface, &ConfigScope)
//!                  │ check state, narrow hardware
//!                  ▼
//!             ControllerInit::init(&mut C::Hardware, &ConfigScope)
//! ```

pub mod error;
pub mod gate;
pub mod lifecycle;

pub use error::{ControllerError, InitError};
pub use gate::{Controller, ControllerBase, ControllerInit};
pub use lifecycle::LifecycleState;
