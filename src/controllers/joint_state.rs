//! Joint state broadcaster
//!
//! Reads every joint of a [`JointStateInterface`] at a fixed publish rate.

use crate::controller::{ControllerError, ControllerInit};
use crate::hardware::{JointHandle, JointStateInterface};
use crate::scope::ConfigScope;
use tracing::{debug, warn};

pub const DEFAULT_PUBLISH_RATE: f64 = 50.0;

#[derive(Debug, Default)]
pub struct JointStateController {
    publish_rate: f64,
    joints: Vec<JointHandle>,
}

impl JointStateController {
    /// Publish rate in Hz
    pub fn publish_rate(&self) -> f64 {
        self.publish_rate
    }

    pub fn joints(&self) -> &[JointHandle] {
        &self.joints
    }
}

impl ControllerInit for JointStateController {
    type Hardware = JointStateInterface;

    fn init(
        &mut self,
        hw: &mut JointStateInterface,
        scope: &ConfigScope,
    ) -> Result<(), ControllerError> {
        let publish_rate: f64 = scope.get_or("publish_rate", DEFAULT_PUBLISH_RATE)?;
        if !publish_rate.is_finite() || publish_rate <= 0.0 {
            return Err(ControllerError::InvalidConfig(format!(
                "{}/publish_rate must be positive, got {}",
                scope.namespace(),
                publish_rate
            )));
        }

        let names = hw.joints().names().to_vec();
        if names.is_empty() {
            warn!("Joint state interface has no joints, nothing will be published");
        }

        let joints = names
            .iter()
            .map(|name| hw.joints_mut().claim(name))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Joint state controller publishing {} joints at {} Hz",
            joints.len(),
            publish_rate
        );
        self.publish_rate = publish_rate;
        self.joints = joints;
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        "JointStateController"
    }

    fn claimed_resources(&self) -> Vec<String> {
        self.joints.iter().map(|joint| joint.name().to_string()).collect()
    }
}
