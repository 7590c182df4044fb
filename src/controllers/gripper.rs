//! Effort controller for gripper fingers

use crate::controller::{ControllerError, ControllerInit};
use crate::hardware::{GripperInterface, JointHandle};
use crate::scope::ConfigScope;
use tracing::debug;

/// Drives every finger of a [`GripperInterface`] up to `max_effort`
#[derive(Debug, Default)]
pub struct GripperController {
    max_effort: f64,
    fingers: Vec<JointHandle>,
}

impl GripperController {
    pub fn max_effort(&self) -> f64 {
        self.max_effort
    }

    pub fn fingers(&self) -> &[JointHandle] {
        &self.fingers
    }
}

impl ControllerInit for GripperController {
    type Hardware = GripperInterface;

    fn init(
        &mut self,
        hw: &mut GripperInterface,
        scope: &ConfigScope,
    ) -> Result<(), ControllerError> {
        let max_effort: f64 = scope.get("max_effort")?;
        if !max_effort.is_finite() || max_effort <= 0.0 {
            return Err(ControllerError::InvalidConfig(format!(
                "{}/max_effort must be positive, got {}",
                scope.namespace(),
                max_effort
            )));
        }
        if max_effort > hw.max_effort() {
            return Err(ControllerError::InvalidConfig(format!(
                "{}/max_effort {} exceeds the hardware limit {}",
                scope.namespace(),
                max_effort,
                hw.max_effort()
            )));
        }

        let names = hw.fingers().names().to_vec();
        let fingers = names
            .iter()
            .map(|name| hw.fingers_mut().claim(name))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Gripper controller claimed {} fingers, effort limit {}",
            fingers.len(),
            max_effort
        );
        self.max_effort = max_effort;
        self.fingers = fingers;
        Ok(())
    }

    fn type_name(&self) -> &'static str {
        "GripperController"
    }

    fn claimed_resources(&self) -> Vec<String> {
        self.fingers
            .iter()
            .map(|finger| finger.name().to_string())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::ResourceManager;

    fn gripper() -> GripperInterface {
        GripperInterface::new(ResourceManager::from_names(["left", "right"]).unwrap(), 40.0)
            .unwrap()
    }

    fn scope(body: &str) -> ConfigScope {
        ConfigScope::root(toml::from_str(body).unwrap())
    }

    #[test]
    fn claims_all_fingers() {
        let mut hw = gripper();
        let mut controller = GripperController::default();
        controller.init(&mut hw, &scope("max_effort = 25.0")).unwrap();

        assert_eq!(controller.max_effort(), 25.0);
        assert_eq!(controller.claimed_resources(), vec!["left", "right"]);
    }

    #[test]
    fn effort_above_hardware_limit() {
        let mut hw = gripper();
        let mut controller = GripperController::default();
        let err = controller
            .init(&mut hw, &scope("max_effort = 55.0"))
            .unwrap_err();

        assert!(err.to_string().contains("hardware limit"));
        assert_eq!(hw.fingers().claimed().count(), 0);
    }
}
