//! Concrete hardware interface kinds
//!
//! Every kind carries a stable label. A controller names the kind it needs
//! through [`TypedInterface`] and the gate extracts it from a
//! [`HardwareInterface`] by pattern matching.

use super::resource::{JointHandle, ResourceManager};
use super::{HardwareError, HardwareInterface};

/// A hardware interface kind that controllers can require
pub trait TypedInterface: Sized + 'static {
    /// Label the interface is registered under
    const LABEL: &'static str;

    /// Typed view into a hardware handle, `None` if the handle cannot present `Self`
    fn view(hw: &HardwareInterface) -> Option<&Self>;

    fn view_mut(hw: &mut HardwareInterface) -> Option<&mut Self>;
}

/// Read-only access to joint positions, velocities and efforts
#[derive(Debug, Clone, Default)]
pub struct JointStateInterface {
    joints: ResourceManager,
}

impl JointStateInterface {
    pub fn new(joints: ResourceManager) -> Self {
        Self { joints }
    }

    pub fn joints(&self) -> &ResourceManager {
        &self.joints
    }

    pub fn joints_mut(&mut self) -> &mut ResourceManager {
        &mut self.joints
    }
}

/// Position-commanded arm joints
#[derive(Debug, Clone, Default)]
pub struct ArmInterface {
    joints: ResourceManager,
}

impl ArmInterface {
    pub fn new(joints: ResourceManager) -> Self {
        Self { joints }
    }

    pub fn joints(&self) -> &ResourceManager {
        &self.joints
    }

    pub fn joint_names(&self) -> &[String] {
        self.joints.names()
    }

    pub fn claim_joint(&mut self, name: &str) -> Result<JointHandle, HardwareError> {
        self.joints.claim(name)
    }
}

/// Effort-commanded gripper fingers with a hardware effort limit
#[derive(Debug, Clone)]
pub struct GripperInterface {
    fingers: ResourceManager,
    max_effort: f64,
}

impl GripperInterface {
    pub fn new(fingers: ResourceManager, max_effort: f64) -> Result<Self, HardwareError> {
        if !max_effort.is_finite() || max_effort <= 0.0 {
            return Err(HardwareError::InvalidLimit {
                name: "max_effort".to_string(),
                value: max_effort,
            });
        }
        Ok(Self {
            fingers,
            max_effort,
        })
    }

    pub fn fingers(&self) -> &ResourceManager {
        &self.fingers
    }

    pub fn fingers_mut(&mut self) -> &mut ResourceManager {
        &mut self.fingers
    }

    /// Highest effort the gripper hardware accepts
    pub fn max_effort(&self) -> f64 {
        self.max_effort
    }
}

/// A robot exposing several interfaces through one handle
#[derive(Debug, Clone, Default)]
pub struct RobotHardware {
    pub arm: Option<ArmInterface>,
    pub gripper: Option<GripperInterface>,
    pub joint_state: Option<JointStateInterface>,
}

impl RobotHardware {
    /// Labels of the interfaces this robot registered, in a fixed order
    pub fn registered_types(&self) -> Vec<&'static str> {
        let mut types = Vec::new();
        if self.joint_state.is_some() {
            types.push(JointStateInterface::LABEL);
        }
        if self.arm.is_some() {
            types.push(ArmInterface::LABEL);
        }
        if self.gripper.is_some() {
            types.push(GripperInterface::LABEL);
        }
        types
    }
}

impl TypedInterface for JointStateInterface {
    const LABEL: &'static str = "JointStateInterface";

    fn view(hw: &HardwareInterface) -> Option<&Self> {
        match hw {
            HardwareInterface::JointState(iface) => Some(iface),
            HardwareInterface::Robot(robot) => robot.joint_state.as_ref(),
            _ => None,
        }
    }

    fn view_mut(hw: &mut HardwareInterface) -> Option<&mut Self> {
        match hw {
            HardwareInterface::JointState(iface) => Some(iface),
            HardwareInterface::Robot(robot) => robot.joint_state.as_mut(),
            _ => None,
        }
    }
}

impl TypedInterface for ArmInterface {
    const LABEL: &'static str = "ArmInterface";

    fn view(hw: &HardwareInterface) -> Option<&Self> {
        match hw {
            HardwareInterface::Arm(iface) => Some(iface),
            HardwareInterface::Robot(robot) => robot.arm.as_ref(),
            _ => None,
        }
    }

    fn view_mut(hw: &mut HardwareInterface) -> Option<&mut Self> {
        match hw {
            HardwareInterface::Arm(iface) => Some(iface),
            HardwareInterface::Robot(robot) => robot.arm.as_mut(),
            _ => None,
        }
    }
}

impl TypedInterface for GripperInterface {
    const LABEL: &'static str = "GripperInterface";

    fn view(hw: &HardwareInterface) -> Option<&Self> {
        match hw {
            HardwareInterface::Gripper(iface) => Some(iface),
            HardwareInterface::Robot(robot) => robot.gripper.as_ref(),
            _ => None,
        }
    }

    fn view_mut(hw: &mut HardwareInterface) -> Option<&mut Self> {
        match hw {
            HardwareInterface::Gripper(iface) => Some(iface),
            HardwareInterface::Robot(robot) => robot.gripper.as_mut(),
            _ => None,
        }
    }
}

impl TypedInterface for RobotHardware {
    const LABEL: &'static str = "RobotHardware";

    fn view(hw: &HardwareInterface) -> Option<&Self> {
        match hw {
            HardwareInterface::Robot(robot) => Some(robot),
            _ => None,
        }
    }

    fn view_mut(hw: &mut HardwareInterface) -> Option<&mut Self> {
        match hw {
            HardwareInterface::Robot(robot) => Some(robot),
            _ => None,
        }
    }
}
