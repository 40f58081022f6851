//! Server configuration: built-in defaults, an optional TOML file, and CLI
//! flags, in increasing order of precedence.
//!
//! # Example
//!
//! ```toml
//! [tasks]
//! port = 3000
//! data_file = "data/tareas.txt"
//!
//! [heroes]
//! port = 3005
//! data_file = "data/superheroes.txt"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Environment variable overriding the bind host.
pub(crate) const BIND_ENV: &str = "MVC_BIND";

const DEFAULT_BIND: &str = "0.0.0.0";

// ── Types ─────────────────────────────────────────────────────────────────────

/// Top-level configuration file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ServiceConfig {
    pub(crate) tasks: ServiceSection,
    pub(crate) heroes: ServiceSection,
}

/// `[tasks]` / `[heroes]` section. Absent keys fall through to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct ServiceSection {
    pub(crate) port: Option<u16>,
    pub(crate) data_file: Option<PathBuf>,
}

/// Built-in values for one service.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ServiceDefaults {
    pub(crate) port: u16,
    pub(crate) data_file: &'static str,
}

impl ServiceDefaults {
    pub(crate) const TASKS: ServiceDefaults = ServiceDefaults {
        port: 3000,
        data_file: "tareas.txt",
    };
    pub(crate) const HEROES: ServiceDefaults = ServiceDefaults {
        port: 3005,
        data_file: "superheroes.txt",
    };
}

/// Fully resolved settings for one server process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ServiceSettings {
    pub(crate) port: u16,
    pub(crate) data_file: PathBuf,
}

impl ServiceSection {
    /// Apply CLI flags over this section, then defaults under both.
    pub(crate) fn resolve(
        &self,
        cli_port: Option<u16>,
        cli_data_file: Option<PathBuf>,
        defaults: ServiceDefaults,
    ) -> ServiceSettings {
        ServiceSettings {
            port: cli_port.or(self.port).unwrap_or(defaults.port),
            data_file: cli_data_file
                .or_else(|| self.data_file.clone())
                .unwrap_or_else(|| PathBuf::from(defaults.data_file)),
        }
    }
}

// ── Functions ─────────────────────────────────────────────────────────────────

/// Read and parse a configuration TOML file from `path`.
///
/// Returns a human-readable error string on failure.
pub(crate) fn read_service_config(path: &Path) -> Result<ServiceConfig, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("could not read '{}': {}", path.display(), e))?;

    toml::from_str(&content).map_err(|e| format!("could not parse '{}': {}", path.display(), e))
}

/// Host to bind, from `MVC_BIND` or `0.0.0.0`.
pub(crate) fn bind_host() -> String {
    std::env::var(BIND_ENV)
        .ok()
        .filter(|h| !h.is_empty())
        .unwrap_or_else(|| DEFAULT_BIND.to_string())
}
