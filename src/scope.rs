//! Hierarchical configuration scope handed to controllers
//!
//! A scope is a namespace path plus the TOML table living under it. Controllers
//! read their parameters through it. Keys can address nested tables with `/`,
//! so `gains/shoulder` reads `shoulder` inside the `gains` table.

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("Missing parameter {namespace}/{key}")]
    MissingParam { namespace: String, key: String },

    #[error("Invalid parameter {namespace}/{key}: {source}")]
    InvalidParam {
        namespace: String,
        key: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Parameter {namespace}/{key} is not a table")]
    NotATable { namespace: String, key: String },
}

/// Configuration namespace of one controller (or of the whole robot at `/`)
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigScope {
    namespace: String,
    table: toml::Table,
}

impl Default for ConfigScope {
    /// Empty root scope
    fn default() -> Self {
        Self::root(toml::Table::new())
    }
}

impl ConfigScope {
    pub fn root(table: toml::Table) -> Self {
        Self {
            namespace: "/".to_string(),
            table,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn table(&self) -> &toml::Table {
        &self.table
    }

    fn lookup(&self, key: &str) -> Option<&toml::Value> {
        let mut segments = key.split('/').filter(|segment| !segment.is_empty());
        let first = segments.next()?;
        let mut value = self.table.get(first)?;
        for segment in segments {
            value = value.as_table()?.get(segment)?;
        }
        Some(value)
    }

    fn display_namespace(&self) -> &str {
        self.namespace.trim_end_matches('/')
    }

    pub fn has(&self, key: &str) -> bool {
        self.lookup(key).is_some()
    }

    /// Reads and deserializes a parameter
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T, ScopeError> {
        let value = self.lookup(key).ok_or_else(|| ScopeError::MissingParam {
            namespace: self.display_namespace().to_string(),
            key: key.to_string(),
        })?;

        value
            .clone()
            .try_into()
            .map_err(|source| ScopeError::InvalidParam {
                namespace: self.display_namespace().to_string(),
                key: key.to_string(),
                source,
            })
    }

    /// Like [`get`](Self::get) but falls back to `default` when the key is absent.
    /// A present but malformed value is still an error.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> Result<T, ScopeError> {
        if self.has(key) {
            self.get(key)
        } else {
            debug!(
                "Parameter {}/{} not set, using default",
                self.display_namespace(),
                key
            );
            Ok(default)
        }
    }

    /// Scope for a nested table
    pub fn child(&self, name: &str) -> Result<ConfigScope, ScopeError> {
        let value = self.lookup(name).ok_or_else(|| ScopeError::MissingParam {
            namespace: self.display_namespace().to_string(),
            key: name.to_string(),
        })?;

        let table = value.as_table().ok_or_else(|| ScopeError::NotATable {
            namespace: self.display_namespace().to_string(),
            key: name.to_string(),
        })?;

        Ok(ConfigScope {
            namespace: format!("{}/{}", self.display_namespace(), name.trim_matches('/')),
            table: table.clone(),
        })
    }

    /// Names of the nested tables directly under this scope
    pub fn children(&self) -> Vec<String> {
        self.table
            .iter()
            .filter(|(_, value)| value.is_table())
            .map(|(key, _)| key.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> ConfigScope {
        let table: toml::Table = toml::from_str(
            r#"
            rate = 50.0
            name = "arm"

            [controllers.arm]
            type = "ArmPositionController"
            joints = ["shoulder", "elbow"]

            [controllers.arm.gains]
            shoulder = 2.5
            "#,
        )
        .unwrap();
        ConfigScope::root(table)
    }

    #[test]
    fn reads_typed_values() {
        let scope = scope();
        assert_eq!(scope.get::<f64>("rate").unwrap(), 50.0);
        assert_eq!(scope.get::<String>("name").unwrap(), "arm");
    }

    #[test]
    fn nested_keys_and_child_namespaces() {
        let root = scope();
        let arm = root.child("controllers").unwrap().child("arm").unwrap();
        assert_eq!(arm.namespace(), "/controllers/arm");
        assert_eq!(
            arm.get::<Vec<String>>("joints").unwrap(),
            vec!["shoulder".to_string(), "elbow".to_string()]
        );
        assert_eq!(arm.get::<f64>("gains/shoulder").unwrap(), 2.5);
        assert_eq!(
            root.get::<f64>("controllers/arm/gains/shoulder").unwrap(),
            2.5
        );
    }

    #[test]
    fn missing_and_invalid_params() {
        let scope = scope();
        assert!(matches!(
            scope.get::<f64>("missing"),
            Err(ScopeError::MissingParam { key, .. }) if key == "missing"
        ));
        assert!(matches!(
            scope.get::<f64>("name"),
            Err(ScopeError::InvalidParam { .. })
        ));
        assert!(matches!(
            scope.child("rate"),
            Err(ScopeError::NotATable { .. })
        ));
    }

    #[test]
    fn default_only_for_absent_keys() {
        let scope = scope();
        assert_eq!(scope.get_or("missing", 7.0).unwrap(), 7.0);
        assert!(scope.get_or("name", 7.0).is_err());
    }

    #[test]
    fn default_is_an_empty_root() {
        let scope = ConfigScope::default();
        assert_eq!(scope.namespace(), "/");
        assert!(scope.children().is_empty());
        assert_eq!(scope.child("arm").unwrap_err().to_string(), "Missing parameter /arm");
    }

    #[test]
    fn children_lists_tables_only() {
        let root = scope();
        assert_eq!(root.children(), vec!["controllers".to_string()]);
        let controllers = root.child("controllers").unwrap();
        assert_eq!(controllers.children(), vec!["arm".to_string()]);
    }
}
