//! Hardware abstraction seen by controllers
//!
//! A [`HardwareInterface`] is the opaque handle the manager owns. It is a
//! closed set of tagged variants, one per interface kind, so asking "can this
//! handle act as an `ArmInterface`?" is a pattern match instead of a runtime
//! type comparison.
//!
//! ```text
//! HardwareConfig ──► HardwareInterface ──► TypedInterface::view_mut ──► &mut ArmInterface
//!   (robot.toml)       (tagged variant)         (total extraction)
//! ```

pub mod interfaces;
pub mod resource;

pub use interfaces::{
    ArmInterface, GripperInterface, JointStateInterface, RobotHardware, TypedInterface,
};
pub use resource::{JointHandle, ResourceManager};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

/// Errors raised while building or querying hardware interfaces
#[derive(Debug, Error)]
pub enum HardwareError {
    #[error("Unknown hardware resource: {0}")]
    UnknownResource(String),

    #[error("Hardware resource registered twice: {0}")]
    DuplicateResource(String),

    #[error("Invalid hardware limit {name}: {value}")]
    InvalidLimit { name: String, value: f64 },

    #[error("Robot hardware declares no interfaces")]
    EmptyRobot,
}

/// Opaque hardware handle handed to controllers during initialization
#[derive(Debug, Clone)]
pub enum HardwareInterface {
    JointState(JointStateInterface),
    Arm(ArmInterface),
    Gripper(GripperInterface),
    Robot(RobotHardware),
}

impl HardwareInterface {
    /// Concrete label of the variant itself
    pub fn label(&self) -> &'static str {
        match self {
            HardwareInterface::JointState(_) => JointStateInterface::LABEL,
            HardwareInterface::Arm(_) => ArmInterface::LABEL,
            HardwareInterface::Gripper(_) => GripperInterface::LABEL,
            HardwareInterface::Robot(_) => RobotHardware::LABEL,
        }
    }

    /// Labels of the additional interfaces this handle registered
    pub fn registered_types(&self) -> Vec<&'static str> {
        match self {
            HardwareInterface::Robot(robot) => robot.registered_types(),
            _ => Vec::new(),
        }
    }

    /// Every label the handle can present: registered ones plus its own
    pub fn available_types(&self) -> Vec<&'static str> {
        let mut types = self.registered_types();
        types.push(self.label());
        types
    }

    /// Exact label match, no prefix or partial matching
    pub fn presents(&self, label: &str) -> bool {
        self.available_types().iter().any(|available| *available == label)
    }

    /// Names of every resource some controller claimed so far
    pub fn claimed_resources(&self) -> Vec<String> {
        fn collect(manager: &ResourceManager, out: &mut Vec<String>) {
            out.extend(manager.claimed().map(str::to_string));
        }

        let mut claimed = Vec::new();
        match self {
            HardwareInterface::JointState(iface) => collect(iface.joints(), &mut claimed),
            HardwareInterface::Arm(iface) => collect(iface.joints(), &mut claimed),
            HardwareInterface::Gripper(iface) => collect(iface.fingers(), &mut claimed),
            HardwareInterface::Robot(robot) => {
                if let Some(iface) = &robot.joint_state {
                    collect(iface.joints(), &mut claimed);
                }
                if let Some(iface) = &robot.arm {
                    collect(iface.joints(), &mut claimed);
                }
                if let Some(iface) = &robot.gripper {
                    collect(iface.fingers(), &mut claimed);
                }
            }
        }
        claimed
    }

    pub fn from_config(config: &HardwareConfig) -> Result<Self, HardwareError> {
        debug!("Building hardware interface from config: {:?}", config);

        let hardware = match config {
            HardwareConfig::JointState(joints) => {
                HardwareInterface::JointState(joints.build_joint_state()?)
            }
            HardwareConfig::Arm(joints) => HardwareInterface::Arm(joints.build_arm()?),
            HardwareConfig::Gripper(gripper) => HardwareInterface::Gripper(gripper.build()?),
            HardwareConfig::Robot(robot) => {
                if robot.arm.is_none() && robot.gripper.is_none() && robot.joint_state.is_none() {
                    return Err(HardwareError::EmptyRobot);
                }
                HardwareInterface::Robot(RobotHardware {
                    arm: robot.arm.as_ref().map(JointsConfig::build_arm).transpose()?,
                    gripper: robot
                        .gripper
                        .as_ref()
                        .map(GripperConfig::build)
                        .transpose()?,
                    joint_state: robot
                        .joint_state
                        .as_ref()
                        .map(JointsConfig::build_joint_state)
                        .transpose()?,
                })
            }
        };

        info!(
            "Hardware interface {} ready, presents {:?}",
            hardware.label(),
            hardware.available_types()
        );
        Ok(hardware)
    }
}

/// Hardware section of a robot description, tagged by `kind`
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HardwareConfig {
    JointState(JointsConfig),
    Arm(JointsConfig),
    Gripper(GripperConfig),
    Robot(RobotSection),
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct JointsConfig {
    pub joints: Vec<String>,
}

impl JointsConfig {
    fn build_arm(&self) -> Result<ArmInterface, HardwareError> {
        Ok(ArmInterface::new(ResourceManager::from_names(
            self.joints.iter().cloned(),
        )?))
    }

    fn build_joint_state(&self) -> Result<JointStateInterface, HardwareError> {
        Ok(JointStateInterface::new(ResourceManager::from_names(
            self.joints.iter().cloned(),
        )?))
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct GripperConfig {
    pub fingers: Vec<String>,
    pub max_effort: f64,
}

impl GripperConfig {
    fn build(&self) -> Result<GripperInterface, HardwareError> {
        GripperInterface::new(
            ResourceManager::from_names(self.fingers.iter().cloned())?,
            self.max_effort,
        )
    }
}

/// Composite robot: any subset of the single-kind sections
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct RobotSection {
    #[serde(default)]
    pub arm: Option<JointsConfig>,
    #[serde(default)]
    pub gripper: Option<GripperConfig>,
    #[serde(default)]
    pub joint_state: Option<JointsConfig>,
}
