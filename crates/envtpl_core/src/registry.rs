//! Environment configuration loading.

use std::fs;
use std::path::{Path, PathBuf};

use envtpl_templates::RenderContext;
use serde_yaml::Value;
use tracing::{debug, info};

use crate::error::{CoreError, CoreResult};

/// Environment names mapped to their configuration data, in document order.
#[derive(Debug, Clone, Default)]
pub struct EnvironmentRegistry {
    source: PathBuf,
    environments: Vec<(String, Value)>,
}

impl EnvironmentRegistry {
    /// Load the registry from a YAML document.
    pub fn load(path: impl AsRef<Path>) -> CoreResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(CoreError::ConfigNotFound(path.to_path_buf()));
        }

        debug!("Loading environments from {:?}", path);
        let content = String::from_utf8(fs::read(path)?).map_err(|e| CoreError::ConfigParse {
            path: path.to_path_buf(),
            message: format!("not valid UTF-8: {}", e),
        })?;
        let registry = Self::from_yaml_str(path, &content)?;

        info!(
            "Loaded {} environment(s) from {:?}: {}",
            registry.len(),
            path,
            registry.names().join(", ")
        );
        Ok(registry)
    }

    /// Parse a registry from YAML text. `source` is used in diagnostics.
    ///
    /// A document with no content (blank, comments only, or `null`) is an
    /// empty registry. Anything else must be a mapping at the top level.
    /// Merge keys (`<<: *base`) are resolved before environments are read.
    pub fn from_yaml_str(source: impl Into<PathBuf>, content: &str) -> CoreResult<Self> {
        let source = source.into();
        let mut registry = Self {
            source,
            environments: Vec::new(),
        };

        if is_blank_document(content) {
            return Ok(registry);
        }

        let mut document: Value = serde_yaml::from_str(content)
            .map_err(|e| registry.parse_error(e.to_string()))?;
        document
            .apply_merge()
            .map_err(|e| registry.parse_error(e.to_string()))?;

        let mapping = match document {
            Value::Null => return Ok(registry),
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(registry.parse_error(format!(
                    "expected a mapping of environment names at the top level, found {}",
                    kind(&other)
                )))
            }
        };

        for (key, data) in mapping {
            let name = key_name(&key).ok_or_else(|| {
                registry.parse_error(format!("environment names must be scalars, found {}", kind(&key)))
            })?;
            registry.environments.push((name, data));
        }

        Ok(registry)
    }

    /// Select the data for one environment.
    pub fn select(&self, name: &str) -> CoreResult<RenderContext> {
        let data = self.get(name).ok_or_else(|| CoreError::EnvironmentNotFound {
            name: name.to_string(),
            path: self.source.clone(),
            available: self.names(),
        })?;

        match data {
            Value::Null => Ok(RenderContext::new()),
            Value::Mapping(mapping) => Ok(RenderContext::from(mapping.clone())),
            other => Err(self.parse_error(format!(
                "environment '{}' must be a mapping, found {}",
                name,
                kind(other)
            ))),
        }
    }

    /// Raw data for an environment.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.environments
            .iter()
            .find(|(env, _)| env == name)
            .map(|(_, data)| data)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Environment names in document order.
    pub fn names(&self) -> Vec<String> {
        self.environments.iter().map(|(name, _)| name.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.environments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.environments.is_empty()
    }

    /// Path the registry was loaded from.
    pub fn source(&self) -> &Path {
        &self.source
    }

    fn parse_error(&self, message: String) -> CoreError {
        CoreError::ConfigParse {
            path: self.source.clone(),
            message,
        }
    }
}

/// Load `path` and select `env_name` in one step.
pub fn load_environment(path: impl AsRef<Path>, env_name: &str) -> CoreResult<RenderContext> {
    EnvironmentRegistry::load(path)?.select(env_name)
}

fn is_blank_document(content: &str) -> bool {
    content.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    })
}

fn key_name(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const ENVS: &str = r#"
dev:
  name: svc-a
  replicas: 2
staging:
  name: svc-a
  replicas: 3
prod:
  name: svc-a
  replicas: 5
"#;

    fn registry(content: &str) -> EnvironmentRegistry {
        EnvironmentRegistry::from_yaml_str("envs.yaml", content).unwrap()
    }

    #[test]
    fn test_names_keep_document_order() {
        let registry = registry(ENVS);
        assert_eq!(registry.names(), vec!["dev", "staging", "prod"]);
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("staging"));
    }

    #[test]
    fn test_select_environment() {
        let ctx = registry(ENVS).select("dev").unwrap();
        assert_eq!(ctx.get("name").and_then(Value::as_str), Some("svc-a"));
        assert_eq!(ctx.get("replicas").and_then(Value::as_u64), Some(2));
    }

    #[test]
    fn test_select_missing_environment_lists_available() {
        let err = registry("dev:\n  replicas: 2\n").select("prod").unwrap_err();
        match err {
            CoreError::EnvironmentNotFound { name, available, .. } => {
                assert_eq!(name, "prod");
                assert_eq!(available, vec!["dev"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_documents_are_empty_registries() {
        for content in ["", "   \n", "# nothing here\n", "---\n", "~\n"] {
            let registry = registry(content);
            assert!(registry.is_empty(), "content {:?}", content);
        }
    }

    #[test]
    fn test_malformed_document_is_parse_error() {
        let err = EnvironmentRegistry::from_yaml_str("envs.yaml", "dev: [unclosed\n").unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse { .. }));
    }

    #[test]
    fn test_non_mapping_document_is_parse_error() {
        let err = EnvironmentRegistry::from_yaml_str("envs.yaml", "- dev\n- prod\n").unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse { .. }));
        assert!(err.to_string().contains("a sequence"));
    }

    #[test]
    fn test_scalar_keys_are_normalized() {
        let registry = registry("2024: {a: 1}\ntrue: {b: 2}\n");
        assert_eq!(registry.names(), vec!["2024", "true"]);
        assert!(registry.select("2024").is_ok());
    }

    #[test]
    fn test_empty_environment_body_is_empty_context() {
        let ctx = registry("dev:\n").select("dev").unwrap();
        assert!(ctx.is_empty());
    }

    #[test]
    fn test_non_mapping_environment_is_parse_error() {
        let err = registry("dev: [1, 2]\n").select("dev").unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse { .. }));
    }

    #[test]
    fn test_merge_keys_are_resolved() {
        let registry = registry(
            "base: &base\n  replicas: 3\n  name: base\ndev:\n  <<: *base\n  name: svc-a\n",
        );
        let ctx = registry.select("dev").unwrap();
        assert_eq!(ctx.get("replicas").and_then(Value::as_u64), Some(3));
        assert_eq!(ctx.get("name").and_then(Value::as_str), Some("svc-a"));
        assert!(ctx.get("<<").is_none());
    }

    #[test]
    fn test_nested_merge_keys_are_resolved() {
        let registry = registry(
            "defaults:\n  image: &image {repo: nginx, tag: latest}\nprod:\n  image:\n    <<: *image\n    tag: '1.25'\n",
        );
        let ctx = registry.select("prod").unwrap();
        assert_eq!(ctx.lookup("image.repo").and_then(Value::as_str), Some("nginx"));
        assert_eq!(ctx.lookup("image.tag").and_then(Value::as_str), Some("1.25"));
    }

    #[test]
    fn test_invalid_merge_is_parse_error() {
        let err = EnvironmentRegistry::from_yaml_str("envs.yaml", "dev:\n  <<: 42\n").unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse { .. }));
    }

    #[test]
    fn test_duplicate_environment_is_parse_error() {
        let err = EnvironmentRegistry::from_yaml_str(
            "envs.yaml",
            "dev:\n  replicas: 1\ndev:\n  replicas: 2\n",
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse { .. }));
    }

    #[test]
    fn test_load_non_utf8_file_is_parse_error() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("envs.yaml");
        fs::write(&path, b"dev:\n  name: \xff\xfe\n").unwrap();

        let err = EnvironmentRegistry::load(&path).unwrap_err();
        assert!(matches!(err, CoreError::ConfigParse { .. }));
        assert_eq!(err.exit_code(), 5);
    }

    #[test]
    fn test_load_missing_file() {
        let temp = tempdir().unwrap();
        let err = EnvironmentRegistry::load(temp.path().join("envs.yaml")).unwrap_err();
        assert!(matches!(err, CoreError::ConfigNotFound(_)));
    }

    #[test]
    fn test_load_environment_from_file() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("envs.yaml");
        fs::write(&path, ENVS).unwrap();

        let ctx = load_environment(&path, "prod").unwrap();
        assert_eq!(ctx.get("replicas").and_then(Value::as_u64), Some(5));

        let registry = EnvironmentRegistry::load(&path).unwrap();
        assert_eq!(registry.source(), path.as_path());
    }
}
