//! Controllers shipped with the crate
//!
//! Each one implements [`ControllerInit`](crate::controller::ControllerInit)
//! for a single hardware interface kind and is registered under its type
//! name by [`register_builtin`].

pub mod arm_position;
pub mod gripper;
pub mod joint_state;

pub use arm_position::ArmPositionController;
pub use gripper::GripperController;
pub use joint_state::JointStateController;

use crate::manager::{ControllerRegistry, ManagerError};

pub fn register_builtin(registry: &mut ControllerRegistry) -> Result<(), ManagerError> {
    registry.register_default::<JointStateController>("JointStateController")?;
    registry.register_default::<ArmPositionController>("ArmPositionController")?;
    registry.register_default::<GripperController>("GripperController")?;
    Ok(())
}
