//! Controller type registry
//!
//! Maps a controller type name, as written in the robot description, to a
//! factory building a fresh controller in the `Constructed` state.

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use super::ManagerError;
use crate::controller::{Controller, ControllerBase, ControllerInit};

pub type ControllerFactory = Box<dyn Fn(&str) -> Box<dyn ControllerBase> + Send + Sync>;

#[derive(Default)]
pub struct ControllerRegistry {
    factories: BTreeMap<String, ControllerFactory>,
}

impl fmt::Debug for ControllerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControllerRegistry")
            .field("types", &self.types())
            .finish()
    }
}

impl ControllerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(
        &mut self,
        type_name: impl Into<String>,
        factory: ControllerFactory,
    ) -> Result<(), ManagerError> {
        let type_name = type_name.into();
        if self.factories.contains_key(&type_name) {
            return Err(ManagerError::DuplicateType(type_name));
        }
        debug!("Registering controller type {}", type_name);
        self.factories.insert(type_name, factory);
        Ok(())
    }

    /// Registers a controller type built from `C::default()`
    pub fn register_default<C: ControllerInit + Default>(
        &mut self,
        type_name: impl Into<String>,
    ) -> Result<(), ManagerError> {
        self.register(
            type_name,
            Box::new(|name: &str| -> Box<dyn ControllerBase> {
                Box::new(Controller::new(name, C::default()))
            }),
        )
    }

    /// Builds a new controller instance called `name`
    pub fn create(
        &self,
        type_name: &str,
        name: &str,
    ) -> Result<Box<dyn ControllerBase>, ManagerError> {
        let factory = self
            .factories
            .get(type_name)
            .ok_or_else(|| ManagerError::UnknownType(type_name.to_string()))?;
        Ok(factory(name))
    }

    pub fn types(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }
}
