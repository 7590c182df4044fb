//! Named hardware resources and the claim log kept per interface

use std::collections::BTreeSet;
use tracing::debug;

use super::HardwareError;

/// Reference to a single hardware resource (a joint or a finger)
///
/// Handles are cheap to clone. A controller keeps the handles it claimed
/// during `init` and uses them later on the control path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct JointHandle {
    name: String,
    index: usize,
}

impl JointHandle {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Position of the resource inside its interface
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Ordered set of resource names with a log of claimed resources
///
/// Claims are only recorded. Nothing here rejects a second claim on the same
/// resource, conflict resolution belongs to whoever starts the controllers.
#[derive(Debug, Clone, Default)]
pub struct ResourceManager {
    resources: Vec<String>,
    claims: BTreeSet<String>,
}

impl ResourceManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a manager from a list of names, rejecting duplicates
    pub fn from_names<I, S>(names: I) -> Result<Self, HardwareError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut manager = Self::new();
        for name in names {
            manager.register(name)?;
        }
        Ok(manager)
    }

    pub fn register(&mut self, name: impl Into<String>) -> Result<JointHandle, HardwareError> {
        let name = name.into();
        if self.resources.contains(&name) {
            return Err(HardwareError::DuplicateResource(name));
        }
        debug!("Registering hardware resource: {}", name);
        self.resources.push(name.clone());
        Ok(JointHandle {
            name,
            index: self.resources.len() - 1,
        })
    }

    pub fn names(&self) -> &[String] {
        &self.resources
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Looks up a resource without claiming it
    pub fn handle(&self, name: &str) -> Result<JointHandle, HardwareError> {
        self.resources
            .iter()
            .position(|resource| resource == name)
            .map(|index| JointHandle {
                name: name.to_string(),
                index,
            })
            .ok_or_else(|| HardwareError::UnknownResource(name.to_string()))
    }

    /// Looks up a resource and records it as claimed
    pub fn claim(&mut self, name: &str) -> Result<JointHandle, HardwareError> {
        let handle = self.handle(name)?;
        if !self.claims.insert(handle.name.clone()) {
            debug!("Resource {} claimed more than once", name);
        }
        Ok(handle)
    }

    pub fn claimed(&self) -> impl Iterator<Item = &str> {
        self.claims.iter().map(String::as_str)
    }

    pub fn clear_claims(&mut self) {
        self.claims.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_names_are_rejected() {
        let err = ResourceManager::from_names(["shoulder", "elbow", "shoulder"]).unwrap_err();
        assert!(matches!(err, HardwareError::DuplicateResource(name) if name == "shoulder"));
    }

    #[test]
    fn handle_keeps_registration_order() {
        let manager = ResourceManager::from_names(["shoulder", "elbow", "wrist"]).unwrap();
        let handle = manager.handle("wrist").unwrap();
        assert_eq!(handle.index(), 2);
        assert_eq!(handle.name(), "wrist");
        assert_eq!(manager.claimed().count(), 0);
    }

    #[test]
    fn claim_is_recorded_once() {
        let mut manager = ResourceManager::from_names(["shoulder", "elbow"]).unwrap();
        manager.claim("elbow").unwrap();
        manager.claim("elbow").unwrap();
        assert_eq!(manager.claimed().collect::<Vec<_>>(), vec!["elbow"]);

        manager.clear_claims();
        assert_eq!(manager.claimed().count(), 0);
    }

    #[test]
    fn unknown_resource() {
        let mut manager = ResourceManager::from_names(["shoulder"]).unwrap();
        assert!(matches!(
            manager.claim("knee"),
            Err(HardwareError::UnknownResource(name)) if name == "knee"
        ));
    }
}
