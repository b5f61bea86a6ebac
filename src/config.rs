use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SnapkeepError};

const SAMPLE_CONFIG: &str = r#"# snapkeep configuration

# The directory which contains archives as directories or symbolic links (mandatory)
# directory = "/home/user/tarsnap/links"

# Remote tool binary (optional, defaults to tarsnap on PATH)
# tool = "/usr/local/bin/tarsnap"

# Per-archive exclusions: within archive "firefox-profile", skip the listed entries
# [exclusions]
# firefox-profile = ["Cache", "urlclassifier2", "urlclassifier3"]
"#;

/// Process-wide configuration, loaded once at startup and passed by
/// reference to every component that needs it.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory containing one entry per archive.
    pub directory: PathBuf,
    /// Remote tool binary.
    pub tool: PathBuf,
    /// Per-archive exclusion lists, relative to each archive's own root.
    pub exclusions: HashMap<String, Vec<String>>,
}

#[derive(Deserialize)]
struct RawConfig {
    directory: Option<PathBuf>,
    tool: Option<PathBuf>,
    #[serde(default)]
    exclusions: HashMap<String, Vec<String>>,
}

impl Config {
    /// Load the configuration, bootstrapping a commented sample on first run.
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let path = match override_path {
            Some(p) => p.to_path_buf(),
            None => default_path()?,
        };

        if !path.is_file() {
            return Err(bootstrap_sample(&path));
        }

        let raw = fs::read_to_string(&path)?;
        let parsed: RawConfig = toml::from_str(&raw)
            .map_err(|e| SnapkeepError::Config(format!("{}: {}", path.display(), e)))?;

        let directory = parsed.directory.ok_or_else(|| {
            SnapkeepError::Config(format!("{} is missing 'directory' entry", path.display()))
        })?;

        Ok(Config {
            directory,
            tool: parsed.tool.unwrap_or_else(|| PathBuf::from("tarsnap")),
            exclusions: parsed.exclusions,
        })
    }

    /// Configured exclusions for one archive, empty if none. Exact,
    /// case-sensitive match on the archive name.
    pub fn exclusions_for(&self, archive: &str) -> &[String] {
        self.exclusions
            .get(archive)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

fn default_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "snapkeep")
        .ok_or_else(|| SnapkeepError::Config("could not determine config directory".into()))?;
    Ok(dirs.config_dir().join("config.toml"))
}

/// Materialize a sample config and tell the operator to edit it. Always an
/// error: the sample has no usable 'directory' entry yet.
fn bootstrap_sample(path: &Path) -> SnapkeepError {
    let write = || -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, SAMPLE_CONFIG)
    };
    match write() {
        Ok(()) => SnapkeepError::Config(format!(
            "created a sample config at {}, please customize it",
            path.display()
        )),
        Err(e) => SnapkeepError::Config(format!(
            "no config at {} and failed to create a sample: {}",
            path.display(),
            e
        )),
    }
}
