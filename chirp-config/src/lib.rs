//! Loader for `chirp.yaml` with environment overlays.
//!
//! Sources are merged in the order they are added, and `CHIRP__`-prefixed
//! environment variables are applied last so they always win
//! (`CHIRP__GRAPH__LINK_SHARED_HASHTAGS=true` sets `graph.link_shared_hashtags`).
//! String values may reference `${VAR}` placeholders, which are expanded after merging.
use chirp_common::LogFormat;
use config::{Config, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

const MAXIMUM_ENV_EXPANSION_DEPTH: usize = 8;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChirpConfig {
    pub version: Option<String>,
    pub logging: LoggingSettings,
    pub graph: GraphSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
    pub format: LogFormat,
    pub stderr: bool,
    pub file: bool,
    pub dir: Option<PathBuf>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".into(),
            format: LogFormat::Text,
            stderr: true,
            file: false,
            dir: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct GraphSettings {
    /// Treat authors who share a hashtag as following each other.
    pub link_shared_hashtags: bool,
}

fn expand_env_in_value(v: &mut Value) {
    match v {
        Value::String(s) => {
            if s.contains('$') {
                let mut cur = std::mem::take(s);
                for _ in 0..MAXIMUM_ENV_EXPANSION_DEPTH {
                    let expanded = match shellexpand::env(&cur) {
                        Ok(cow) => cow.into_owned(),
                        Err(_) => cur.clone(),
                    };
                    if expanded == cur {
                        break;
                    }
                    cur = expanded;
                }
                *s = cur;
            }
        }
        Value::Array(arr) => arr.iter_mut().for_each(expand_env_in_value),
        Value::Object(obj) => obj.values_mut().for_each(expand_env_in_value),
        _ => {}
    }
}

/// Per-user config location, e.g. `~/.config/chirp/chirp.yaml` on Linux.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("chirp").join("chirp.yaml"))
}

/// Builder over the `config` crate (files + inline YAML + env overrides).
pub struct ChirpConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
}

impl Default for ChirpConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ChirpConfigLoader {
    /// An empty loader; with no sources added, `load` yields the defaults.
    ///
    /// ```
    /// use chirp_config::ChirpConfigLoader;
    ///
    /// let config = ChirpConfigLoader::new().load().expect("defaults");
    /// assert!(config.version.is_none());
    /// assert!(!config.graph.link_shared_hashtags);
    /// ```
    pub fn new() -> Self {
        Self {
            builder: Config::builder(),
        }
    }

    /// Attach a YAML/TOML/JSON file that must exist; format is inferred from the suffix.
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(true));
        self
    }

    /// Attach a file that is skipped when missing.
    pub fn with_optional_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path.as_ref()).required(false));
        self
    }

    /// Attach [`user_config_path`] if the platform has a config directory.
    pub fn with_user_config(self) -> Self {
        match user_config_path() {
            Some(path) => self.with_optional_file(path),
            None => self,
        }
    }

    /// Merge an inline YAML snippet.
    ///
    /// ```
    /// use chirp_common::LogFormat;
    /// use chirp_config::ChirpConfigLoader;
    ///
    /// let cfg = ChirpConfigLoader::new()
    ///     .with_yaml_str(
    ///         r#"
    /// version: "1"
    /// logging:
    ///   level: debug
    ///   format: json
    /// graph:
    ///   link_shared_hashtags: true
    /// "#,
    ///     )
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(cfg.version.as_deref(), Some("1"));
    /// assert_eq!(cfg.logging.level, "debug");
    /// assert_eq!(cfg.logging.format, LogFormat::Json);
    /// assert!(cfg.logging.stderr);
    /// assert!(cfg.graph.link_shared_hashtags);
    /// ```
    pub fn with_yaml_str(mut self, yaml: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(yaml, FileFormat::Yaml));
        self
    }

    /// Merge all sources plus `CHIRP__` environment overrides, expand `${VAR}`
    /// placeholders, and deserialize into [`ChirpConfig`].
    pub fn load(self) -> Result<ChirpConfig, ConfigError> {
        let cfg = self
            .builder
            .add_source(
                Environment::with_prefix("CHIRP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let mut v: Value = cfg.try_deserialize()?;
        expand_env_in_value(&mut v);

        serde_json::from_value(v).map_err(|e| ConfigError::Message(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn expands_simple_string() {
        temp_env::with_var("CHIRP_TEST_FOO", Some("bar"), || {
            let mut v = json!("prefix-${CHIRP_TEST_FOO}-suffix");
            expand_env_in_value(&mut v);
            assert_eq!(v, json!("prefix-bar-suffix"));
        });
    }

    #[test]
    fn expands_in_array_and_object() {
        temp_env::with_vars(
            [("CHIRP_TEST_CITY", Some("Cambridge")), ("CHIRP_TEST_STATE", Some("MA"))],
            || {
                let mut v = json!([
                    "hello-$CHIRP_TEST_CITY",
                    { "loc": "${CHIRP_TEST_CITY}-${CHIRP_TEST_STATE}" },
                    42,
                    true,
                    null
                ]);
                expand_env_in_value(&mut v);
                assert_eq!(
                    v,
                    json!(["hello-Cambridge", { "loc": "Cambridge-MA" }, 42, true, null])
                );
            },
        );
    }

    #[test]
    fn expands_recursively_across_env_values() {
        temp_env::with_vars(
            [
                ("CHIRP_TEST_BAZ", Some("qux")),
                ("CHIRP_TEST_BAR", Some("mid-${CHIRP_TEST_BAZ}")),
                ("CHIRP_TEST_FOO", Some("start-${CHIRP_TEST_BAR}-end")),
            ],
            || {
                let mut v = json!("X=${CHIRP_TEST_FOO}");
                expand_env_in_value(&mut v);
                assert_eq!(v, json!("X=start-mid-qux-end"));
            },
        );
    }

    #[test]
    fn stops_on_cycles() {
        temp_env::with_vars(
            [("CHIRP_TEST_A", Some("${CHIRP_TEST_B}")), ("CHIRP_TEST_B", Some("${CHIRP_TEST_A}"))],
            || {
                let mut v = json!("x=${CHIRP_TEST_A}-y");
                expand_env_in_value(&mut v);
                let s = v.as_str().unwrap();
                assert!(s.starts_with("x=") && s.ends_with("-y"));
                assert!(s.contains("${"));
            },
        );
    }

    #[test]
    fn unknown_vars_are_left_as_is() {
        let mut v = json!("hi-${CHIRP_TEST_DOES_NOT_EXIST}");
        expand_env_in_value(&mut v);
        assert_eq!(v, json!("hi-${CHIRP_TEST_DOES_NOT_EXIST}"));
    }

    #[test]
    fn user_config_lives_under_chirp() {
        if let Some(path) = user_config_path() {
            assert!(path.ends_with("chirp/chirp.yaml"));
        }
    }
}
