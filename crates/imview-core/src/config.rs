//! Bridge configuration, read from the environment.
//!
//! | variable              | meaning                                            |
//! |-----------------------|----------------------------------------------------|
//! | `IMVIEW_DEBUG`        | verbose developer logging (`1`/`0`, `true`/`false`) |
//! | `IMVIEW_GLSL_VERSION` | force a GLSL version instead of asking the driver  |
//! | `IMVIEW_LOG`          | explicit `tracing` filter, overrides `IMVIEW_DEBUG` |

use anyhow::{bail, Context, Result};
use once_cell::sync::Lazy;

pub const ENV_DEBUG: &str = "IMVIEW_DEBUG";
pub const ENV_GLSL_VERSION: &str = "IMVIEW_GLSL_VERSION";
pub const ENV_LOG: &str = "IMVIEW_LOG";

static GLOBAL: Lazy<BridgeConfig> = Lazy::new(|| BridgeConfig::from_env().unwrap_or_default());

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BridgeConfig {
    /// Enables developer log output.
    pub debug: bool,
    /// GLSL version to compile for, e.g. `120` on drivers that misreport.
    pub glsl_version_override: Option<u32>,
    pub log_filter: Option<String>,
}

impl BridgeConfig {
    /// Process-wide configuration, read from the environment on first use.
    /// Invalid values fall back to the defaults.
    pub fn global() -> &'static BridgeConfig {
        &GLOBAL
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let debug = match lookup(ENV_DEBUG) {
            Some(value) => parse_flag(&value).with_context(|| format!("invalid {ENV_DEBUG}"))?,
            None => false,
        };

        let glsl_version_override = match lookup(ENV_GLSL_VERSION) {
            Some(value) => Some(
                value
                    .trim()
                    .parse::<u32>()
                    .with_context(|| format!("invalid {ENV_GLSL_VERSION}: {value:?}"))?,
            ),
            None => None,
        };

        let log_filter = lookup(ENV_LOG).filter(|f| !f.trim().is_empty());

        Ok(Self {
            debug,
            glsl_version_override,
            log_filter,
        })
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => bail!("expected a boolean flag, got {other:?}"),
    }
}
