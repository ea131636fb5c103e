//! Connection settings for the Prefect API.
//!
//! Environment variables win; otherwise the active profile in
//! `$PREFECT_HOME/profiles.toml` (default `~/.prefect/profiles.toml`) is
//! consulted, the same file the Prefect CLI maintains.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::debug;
use serde::Deserialize;

const API_URL_SETTING: &str = "PREFECT_API_URL";
const API_KEY_SETTING: &str = "PREFECT_API_KEY";

#[derive(Debug, Clone)]
pub struct Settings {
    pub api_url: String,
    pub api_key: Option<String>,
}

impl Settings {
    /// Resolve settings from the environment and the Prefect profiles file
    pub fn load() -> Result<Self> {
        let profiles = match profiles_path() {
            Some(path) if path.exists() => {
                let content = std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?;
                debug!("Loaded profiles from {}", path.display());
                Some(ProfilesFile::parse(&content)?)
            }
            _ => None,
        };

        let setting = |name: &str| -> Option<String> {
            std::env::var(name)
                .ok()
                .filter(|value| !value.is_empty())
                .or_else(|| profiles.as_ref().and_then(|p| p.active_setting(name)))
        };

        let api_url = setting(API_URL_SETTING).ok_or_else(|| {
            anyhow::anyhow!(
                "No Prefect API URL configured. Set {} or configure a profile in ~/.prefect/profiles.toml.",
                API_URL_SETTING
            )
        })?;

        Ok(Self {
            api_url,
            api_key: setting(API_KEY_SETTING),
        })
    }
}

/// Profiles file as written by `prefect profile` commands
#[derive(Debug, Default, Deserialize)]
struct ProfilesFile {
    active: Option<String>,
    #[serde(default)]
    profiles: HashMap<String, HashMap<String, String>>,
}

impl ProfilesFile {
    fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse profiles.toml")
    }

    /// Look up a setting in the active profile
    fn active_setting(&self, name: &str) -> Option<String> {
        let active = self.active.as_deref()?;
        self.profiles.get(active)?.get(name).cloned()
    }
}

fn profiles_path() -> Option<PathBuf> {
    let home = match std::env::var("PREFECT_HOME") {
        Ok(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => dirs::home_dir()?.join(".prefect"),
    };
    Some(home.join("profiles.toml"))
}
