use controller_interface::hardware::{
    ArmInterface, GripperInterface, JointStateInterface, ResourceManager, RobotHardware,
};
use controller_interface::{
    ConfigScope, Controller, ControllerError, ControllerInit, HardwareInterface, InitError,
    LifecycleState,
};

#[derive(Debug, Default)]
struct RecordingArmController {
    init_calls: usize,
    succeed: bool,
}

impl ControllerInit for RecordingArmController {
    type Hardware = ArmInterface;

    fn init(&mut self, _hw: &mut ArmInterface, _scope: &ConfigScope) -> Result<(), ControllerError> {
        self.init_calls += 1;
        if self.succeed {
            Ok(())
        } else {
            Err(ControllerError::InvalidConfig("gains not tuned".to_string()))
        }
    }
}

fn succeeding() -> Controller<RecordingArmController> {
    Controller::new(
        "arm",
        RecordingArmController {
            succeed: true,
            ..Default::default()
        },
    )
}

fn arm_hardware() -> HardwareInterface {
    HardwareInterface::Arm(ArmInterface::new(
        ResourceManager::from_names(["shoulder", "elbow"]).unwrap(),
    ))
}

fn gripper_hardware() -> HardwareInterface {
    HardwareInterface::Gripper(
        GripperInterface::new(ResourceManager::from_names(["left", "right"]).unwrap(), 30.0)
            .unwrap(),
    )
}

#[test]
fn matching_interface_initializes() {
    let mut hw = arm_hardware();
    assert_eq!(hw.available_types(), vec!["ArmInterface"]);

    let mut controller = succeeding();
    assert!(controller
        .init_request(&mut hw, &ConfigScope::default())
        .is_ok());

    assert_eq!(controller.state(), LifecycleState::Initialized);
    assert_eq!(controller.inner().init_calls, 1);
}

#[test]
fn mismatched_interface_names_required_type() {
    let mut hw = gripper_hardware();
    assert_eq!(hw.available_types(), vec!["GripperInterface"]);

    let mut controller = succeeding();
    let err = controller
        .init_request(&mut hw, &ConfigScope::default())
        .unwrap_err();

    assert!(matches!(err, InitError::TypeMismatch { required: "ArmInterface", .. }));
    assert!(err.to_string().contains("ArmInterface"));
    assert_eq!(controller.state(), LifecycleState::Constructed);
    assert_eq!(controller.inner().init_calls, 0);
}

#[test]
fn second_request_fails_regardless_of_handle() {
    let mut controller = succeeding();
    controller
        .init_request(&mut arm_hardware(), &ConfigScope::default())
        .unwrap();

    for mut hw in [arm_hardware(), gripper_hardware()] {
        let err = controller
            .init_request(&mut hw, &ConfigScope::default())
            .unwrap_err();
        assert!(matches!(err, InitError::NotConstructed { .. }));
        assert_eq!(controller.state(), LifecycleState::Initialized);
    }
    assert_eq!(controller.inner().init_calls, 1);
}

#[test]
fn failed_init_stays_constructed() {
    let mut controller = Controller::new("arm", RecordingArmController::default());
    let err = controller
        .init_request(&mut arm_hardware(), &ConfigScope::default())
        .unwrap_err();

    assert!(matches!(
        err,
        InitError::ControllerInit {
            source: ControllerError::InvalidConfig(_),
            ..
        }
    ));
    assert_eq!(controller.state(), LifecycleState::Constructed);
    assert_eq!(controller.inner().init_calls, 1);
}

#[test]
fn composite_hardware_presents_registered_interfaces() {
    let mut hw = HardwareInterface::Robot(RobotHardware {
        arm: Some(ArmInterface::new(
            ResourceManager::from_names(["shoulder"]).unwrap(),
        )),
        joint_state: Some(JointStateInterface::new(
            ResourceManager::from_names(["shoulder"]).unwrap(),
        )),
        gripper: None,
    });
    assert!(hw.presents("ArmInterface"));
    assert!(hw.presents("RobotHardware"));
    assert!(!hw.presents("GripperInterface"));

    let mut controller = succeeding();
    controller
        .init_request(&mut hw, &ConfigScope::default())
        .unwrap();
    assert!(controller.is_initialized());
}
