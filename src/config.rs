//! Robot description file
//!
//! A single TOML file describes the hardware and the controllers to load:
//!
//! ```toml
//! [hardware]
//! kind = "robot"
//!
//! [hardware.arm]
//! joints = ["shoulder", "elbow", "wrist"]
//!
//! [controllers.arm_controller]
//! type = "ArmPositionController"
//! joints = ["shoulder", "elbow", "wrist"]
//! ```
//!
//! Everything under `controllers` is handed to the manager as the root
//! configuration scope. The hardware section is parsed strictly.

use crate::hardware::HardwareConfig;
use crate::manager::CONTROLLERS_NAMESPACE;
use crate::scope::ConfigScope;
use color_eyre::eyre::{eyre, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const APP_DIR: &str = "controller-interface";
const CONFIG_FILE: &str = "robot.toml";

/// Sample description written on first start
pub const DEFAULT_ROBOT_TOML: &str = r#"[hardware]
kind = "robot"

[hardware.joint_state]
joints = ["shoulder", "elbow", "wrist", "left_finger", "right_finger"]

[hardware.arm]
joints = ["shoulder", "elbow", "wrist"]

[hardware.gripper]
fingers = ["left_finger", "right_finger"]
max_effort = 40.0

[controllers.joint_state_controller]
type = "JointStateController"
publish_rate = 50.0

[controllers.arm_controller]
type = "ArmPositionController"
joints = ["shoulder", "elbow", "wrist"]

[controllers.arm_controller.gains]
shoulder = 2.0
elbow = 1.5

[controllers.gripper_controller]
type = "GripperController"
max_effort = 25.0
"#;

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct RobotConfig {
    pub hardware: HardwareConfig,
    #[serde(default)]
    pub controllers: toml::Table,
}

impl RobotConfig {
    /// `<config dir>/controller-interface/robot.toml`, or `./robot.toml` if the
    /// platform has no config directory
    pub fn default_path() -> PathBuf {
        match dirs::config_dir() {
            Some(dir) => dir.join(APP_DIR).join(CONFIG_FILE),
            None => PathBuf::from(CONFIG_FILE),
        }
    }

    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| eyre!("Failed to parse robot description: {}", e))
    }

    pub fn load(path: &Path) -> Result<Self> {
        debug!("Reading robot description from {}", path.display());
        let content = fs::read_to_string(path)
            .map_err(|e| eyre!("Failed to read robot description {}: {}", path.display(), e))?;
        let config = Self::parse(&content)?;
        info!(
            "Loaded robot description {} ({} controllers declared)",
            path.display(),
            config.controllers.len()
        );
        Ok(config)
    }

    /// Writes [`DEFAULT_ROBOT_TOML`] to `path` unless a file already exists.
    /// Returns whether a file was written.
    pub fn ensure_default_config(path: &Path) -> Result<bool> {
        if path.exists() {
            return Ok(false);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| eyre!("Failed to create config directory: {}", e))?;
        }
        fs::write(path, DEFAULT_ROBOT_TOML)
            .map_err(|e| eyre!("Failed to write default robot description: {}", e))?;
        info!("Wrote default robot description to {}", path.display());
        Ok(true)
    }

    /// Root scope for the manager, with the controllers under `controllers`
    pub fn root_scope(&self) -> ConfigScope {
        let mut table = toml::Table::new();
        table.insert(
            CONTROLLERS_NAMESPACE.to_string(),
            toml::Value::Table(self.controllers.clone()),
        );
        ConfigScope::root(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::HardwareInterface;

    #[test]
    fn default_description_parses() {
        let config = RobotConfig::parse(DEFAULT_ROBOT_TOML).unwrap();
        assert_eq!(config.controllers.len(), 3);

        let hardware = HardwareInterface::from_config(&config.hardware).unwrap();
        assert_eq!(
            hardware.available_types(),
            vec![
                "JointStateInterface",
                "ArmInterface",
                "GripperInterface",
                "RobotHardware"
            ]
        );
    }

    #[test]
    fn root_scope_nests_controllers() {
        let config = RobotConfig::parse(DEFAULT_ROBOT_TOML).unwrap();
        let scope = config
            .root_scope()
            .child("controllers/arm_controller")
            .unwrap();
        assert_eq!(scope.namespace(), "/controllers/arm_controller");
        assert_eq!(scope.get::<f64>("gains/elbow").unwrap(), 1.5);
    }

    #[test]
    fn unknown_hardware_kind_is_an_error() {
        let err = RobotConfig::parse("[hardware]\nkind = \"hexapod\"").unwrap_err();
        assert!(err.to_string().contains("robot description"));
    }

    #[test]
    fn ensure_default_writes_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);

        assert!(RobotConfig::ensure_default_config(&path).unwrap());
        assert!(!RobotConfig::ensure_default_config(&path).unwrap());
        assert_eq!(
            RobotConfig::load(&path).unwrap(),
            RobotConfig::parse(DEFAULT_ROBOT_TOML).unwrap()
        );
    }
}
