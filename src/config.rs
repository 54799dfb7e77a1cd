use crate::error::Result;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Default number of shares produced by `split`.
pub const DEFAULT_PARTS: usize = 5;

/// Default number of shares needed to restore.
pub const DEFAULT_THRESHOLD: usize = 3;

/// Name of the settings file inside the configuration directory.
pub const CONFIG_FILE: &str = "conf.toml";

/// Prefix for environment overrides, e.g. `SHARESPLIT_THRESHOLD=4`.
pub const ENV_PREFIX: &str = "SHARESPLIT";

/// Split defaults, layered from built-in values, an optional `conf.toml`,
/// and `SHARESPLIT_*` environment variables, in that order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub parts: usize,
    pub threshold: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            parts: DEFAULT_PARTS,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl Settings {
    /// Loads settings. When `dir` is given it is created if needed, and a
    /// `conf.toml` holding the defaults is written there if absent.
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        Settings::load_with_env(dir, Environment::with_prefix(ENV_PREFIX))
    }

    fn load_with_env(dir: Option<&Path>, env: Environment) -> Result<Self> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("parts", defaults.parts as i64)?
            .set_default("threshold", defaults.threshold as i64)?;

        if let Some(dir) = dir {
            let conf_file = dir.join(CONFIG_FILE);
            if !conf_file.exists() {
                fs::create_dir_all(dir)?;
                fs::write(&conf_file, toml::to_string_pretty(&defaults)?)?;
                debug!("📝 Wrote default config at path: {}", conf_file.display());
            }
            debug!("📝 Loaded config at path: {}", conf_file.display());
            builder = builder.add_source(File::from(conf_file).required(true));
        }

        let settings = builder
            .add_source(env)
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
