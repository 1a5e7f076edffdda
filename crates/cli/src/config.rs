//! Run configuration loaded from `hookgen.toml`.
//!
//! ```toml
//! source_dir = "openapi"
//! export_dir = "src/queries"
//! api_module = "../api"
//! header_filters = ["Authorization"]
//!
//! [overrides.GetTimeline]
//! kind = "infiniteQuery"
//! page_param = "Offset"
//! ```

use hookgen_core::GeneratorOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Config filename looked up in the working directory
pub const CONFIG_FILENAME: &str = "hookgen.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Directory holding the OpenAPI documents
    #[serde(default = "default_source_dir")]
    pub source_dir: PathBuf,
    /// Directory the generated modules are written to
    #[serde(default = "default_export_dir")]
    pub export_dir: PathBuf,
    #[serde(flatten)]
    pub generator: GeneratorOptions,
}

fn default_source_dir() -> PathBuf {
    PathBuf::from("openapi")
}

fn default_export_dir() -> PathBuf {
    PathBuf::from("src/queries")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: default_source_dir(),
            export_dir: default_export_dir(),
            generator: GeneratorOptions::default(),
        }
    }
}

impl Config {
    /// Load `path`, or the defaults when it doesn't exist and wasn't asked for explicitly.
    pub fn load(path: &Path, explicit: bool) -> Result<Self, String> {
        if !path.exists() {
            if explicit {
                return Err(format!("Config file not found: {}", path.display()));
            }
            debug!(path = %path.display(), "No config file, using defaults.");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .map_err(|err| format!("Failed to read {}: {err}", path.display()))?;
        let config: Self = toml::from_str(&contents)
            .map_err(|err| format!("Failed to parse {}: {err}", path.display()))?;
        debug!(
            path = %path.display(),
            overrides = config.generator.overrides.len(),
            "Loaded config."
        );
        Ok(config)
    }

    /// Apply command-line values on top of the file.
    pub fn with_overrides(mut self, source_dir: Option<PathBuf>, export_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = source_dir {
            self.source_dir = dir;
        }
        if let Some(dir) = export_dir {
            self.export_dir = dir;
        }
        self
    }
}
