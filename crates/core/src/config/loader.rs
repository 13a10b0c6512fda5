use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use std::path::Path;

use super::{types::Config, ConfigError};

/// Environment variables understood by earlier deployments, mapped onto config keys.
const LEGACY_ENV: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("GOOGLE_CLOUD_BUCKET_NAME", "storage.bucket"),
    ("GOOGLE_CLOUD_PROJECT_ID", "google.project_id"),
    ("GOOGLE_CLOUD_KEYFILE", "google.credentials_path"),
];

/// Load configuration from file with environment variable overrides
///
/// Precedence, lowest first: the TOML file, the legacy variables in
/// [`LEGACY_ENV`], then `WATERMARK_`-prefixed variables (nested with `__`,
/// e.g. `WATERMARK_STORAGE__BUCKET`).
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::FileNotFound(path.display().to_string()));
    }

    let config: Config = Figment::new()
        .merge(Toml::file(path))
        .merge(legacy_env())
        .merge(Env::prefixed("WATERMARK_").split("__"))
        .extract()
        .map_err(|e| ConfigError::ParseError(e.to_string()))?;

    Ok(config)
}

/// Load configuration from TOML string (useful for testing)
pub fn load_config_from_str(toml_str: &str) -> Result<Config, ConfigError> {
    toml::from_str(toml_str).map_err(|e| ConfigError::ParseError(e.to_string()))
}

fn legacy_env() -> Env {
    let names: Vec<&str> = LEGACY_ENV.iter().map(|(name, _)| *name).collect();
    Env::raw().only(&names).map(|key| {
        LEGACY_ENV
            .iter()
            .find(|(name, _)| key.as_str().eq_ignore_ascii_case(name))
            .map(|(_, target)| target.to_string())
            .unwrap_or_else(|| key.as_str().to_string())
            .into()
    })
}
