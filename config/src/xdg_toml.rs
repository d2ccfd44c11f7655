//! `[env]` table of `<config home>/<app>/config.toml`.
//!
//! Config home is `$XDG_CONFIG_HOME` when set and non-empty, else `~/.config`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::LoadError;

fn config_home() -> Result<PathBuf, LoadError> {
    if let Some(dir) = std::env::var_os("XDG_CONFIG_HOME").filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    dirs::home_dir()
        .map(|home| home.join(".config"))
        .ok_or_else(|| LoadError::XdgPath("no home directory".to_string()))
}

#[derive(serde::Deserialize, Default)]
struct ConfigFile {
    #[serde(default)]
    env: HashMap<String, toml::Value>,
}

/// Scalars become their display form; tables and arrays are rejected.
fn scalar_to_string(key: &str, value: toml::Value) -> Result<String, LoadError> {
    match value {
        toml::Value::String(s) => Ok(s),
        toml::Value::Integer(i) => Ok(i.to_string()),
        toml::Value::Float(f) => Ok(f.to_string()),
        toml::Value::Boolean(b) => Ok(b.to_string()),
        other => Err(LoadError::XdgValue {
            key: key.to_string(),
            kind: other.type_str().to_string(),
        }),
    }
}

/// Reads `<config_home>/<app_name>/config.toml`. Missing file or section yields an empty map.
pub fn load_env_map_from(
    config_home: &Path,
    app_name: &str,
) -> Result<HashMap<String, String>, LoadError> {
    let path = config_home.join(app_name).join("config.toml");
    if !path.is_file() {
        return Ok(HashMap::new());
    }
    let content = std::fs::read_to_string(&path).map_err(LoadError::XdgRead)?;
    let file: ConfigFile = toml::from_str(&content)?;
    file.env
        .into_iter()
        .map(|(k, v)| scalar_to_string(&k, v).map(|s| (k, s)))
        .collect()
}

/// [`load_env_map_from`] against the resolved config home.
pub fn load_env_map(app_name: &str) -> Result<HashMap<String, String>, LoadError> {
    load_env_map_from(&config_home()?, app_name)
}
