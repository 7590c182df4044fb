//! Position controller for arm joints

use std::collections::HashSet;

use crate::controller::{ControllerError, ControllerInit};
use crate::hardware::{ArmInterface, JointHandle};
use crate::scope::ConfigScope;
use tracing::debug;

pub const DEFAULT_GAIN: f64 = 1.0;

/// A claimed joint together with its proportional gain
#[derive(Debug, Clone, PartialEq)]
pub struct GainedJoint {
    pub handle: JointHandle,
    pub gain: f64,
}

/// Commands joint positions on an [`ArmInterface`]
///
/// Parameters:
/// - `joints`: non-empty list of joint names to control
/// - `gains.<joint>`: optional proportional gain per joint, defaults to 1.0
#[derive(Debug, Default)]
pub struct ArmPositionController {
    joints: Vec<GainedJoint>,
}

impl ArmPositionController {
    pub fn joints(&self) -> &[GainedJoint] {
        &self.joints
    }

    pub fn gain(&self, joint: &str) -> Option<f64> {
        self.joints
            .iter()
            .find(|gained| gained.handle.name() == joint)
            .map(|gained| gained.gain)
    }
}

impl ControllerInit for ArmPositionController {
    type Hardware = ArmInterface;

    fn init(&mut self, hw: &mut ArmInterface, scope: &ConfigScope) -> Result<(), ControllerError> {
        let names: Vec<String> = scope.get("joints")?;
        if names.is_empty() {
            return Err(ControllerError::InvalidConfig(format!(
                "{}/joints must not be empty",
                scope.namespace()
            )));
        }

        let mut seen = HashSet::new();
        let mut gains = Vec::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(ControllerError::InvalidConfig(format!(
                    "Joint {} listed twice in {}/joints",
                    name,
                    scope.namespace()
                )));
            }
            // Fail before claiming anything
            hw.joints().handle(name)?;

            let gain: f64 = scope.get_or(&format!("gains/{}", name), DEFAULT_GAIN)?;
            if !gain.is_finite() || gain <= 0.0 {
                return Err(ControllerError::InvalidConfig(format!(
                    "Gain for joint {} must be positive, got {}",
                    name, gain
                )));
            }
            gains.push(gain);
        }

        let mut joints = Vec::with_capacity(names.len());
        for (name, gain) in names.iter().zip(gains) {
            let handle = hw.claim_joint(name)?;
            debug!("Arm position controller claimed {} (gain {})", name, gain);
            joints.push(GainedJoint { handle, gain });
        }

        self.joints = joints;
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        "ArmPositionController"
    }

    fn claimed_resources(&self) -> Vec<String> {
        self.joints
            .iter()
            .map(|gained| gained.handle.name().to_string())
            .collect()
    }
}
