use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use validator::Validate;

use crate::domain::config::AppConfig;
use crate::domain::error::Result;

/// Optional settings file, read from the working directory
pub const CONFIG_FILE: &str = "csv-viewer.toml";

/// Prefix for environment overrides, e.g. `CSV_VIEWER_PORT=9000`
pub const ENV_PREFIX: &str = "CSV_VIEWER_";

pub struct ConfigService {
    figment: Figment,
}

impl ConfigService {
    /// Defaults, then `csv-viewer.toml`, then `CSV_VIEWER_*` variables (a `.env` file
    /// is loaded into the environment first)
    pub fn new() -> Self {
        let _ = dotenvy::dotenv();

        Self::from_figment(
            Figment::from(Serialized::defaults(AppConfig::default()))
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX)),
        )
    }

    pub fn from_figment(figment: Figment) -> Self {
        Self { figment }
    }

    pub fn load(&self) -> Result<AppConfig> {
        let config: AppConfig = self.figment.extract()?;
        config.validate()?;

        Ok(config)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
