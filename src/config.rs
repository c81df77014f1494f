use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const DEFAULT_SERIAL_PORT: &str = "/dev/ttyUSB0";
pub const DEFAULT_BAUD_RATE: u32 = 57_600;

static ENV_PREFIX: &str = "BUTTON_BOX_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    Extract(#[from] Box<figment::Error>),
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("configuration file {} does not exist", .0.display())]
    MissingFile(PathBuf),
    #[error("no user configuration directory available")]
    NoConfigDir,
}

/// Settings given on the command line, applied on top of file and environment.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub config_file: Option<PathBuf>,
    /// Accept a missing `config_file` because it is about to be written.
    pub create_config_file: bool,
    pub serial_port: Option<String>,
    pub baud_rate: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    pub serial_port: String,
    pub baud_rate: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            serial_port: DEFAULT_SERIAL_PORT.to_owned(),
            baud_rate: DEFAULT_BAUD_RATE,
        }
    }
}

impl Config {
    /// Loads defaults, then the TOML file at `path` if it exists, then
    /// `BUTTON_BOX_*` environment variables.
    ///
    /// # Errors
    ///
    /// Will return `Err` if a layer holds a value of the wrong type.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        Config::extract(Some(path))
    }

    fn extract(path: Option<&Path>) -> Result<Config, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Config::default()));
        if let Some(path) = path {
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .map_err(|e| ConfigError::Extract(Box::new(e)))
    }

    /// Builds the effective settings from defaults, the configuration file,
    /// the environment and `overrides`, in that order. `default_file` is used
    /// when no file is given explicitly; without either only defaults and
    /// environment apply.
    ///
    /// Returns the settings and the file they are saved to.
    ///
    /// # Errors
    ///
    /// Will return `Err` if an explicitly given file is missing and not about
    /// to be created, or if a layer holds a value of the wrong type.
    pub fn resolve(
        overrides: &Overrides,
        default_file: Option<PathBuf>,
    ) -> Result<(Config, Option<PathBuf>), ConfigError> {
        let path = match &overrides.config_file {
            Some(p) if !p.is_file() && !overrides.create_config_file => {
                return Err(ConfigError::MissingFile(p.clone()));
            }
            Some(p) => Some(p.clone()),
            None => default_file,
        };
        let mut config = Config::extract(path.as_deref())?;
        if let Some(port) = &overrides.serial_port {
            config.serial_port.clone_from(port);
        }
        if let Some(baud_rate) = overrides.baud_rate {
            config.baud_rate = baud_rate;
        }
        Ok((config, path))
    }

    /// # Errors
    ///
    /// Will return `Err` if the file or its directory cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let toml = toml::to_string(&self)?;
        let write_error = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).map_err(write_error)?;
        }
        let mut f = File::create(path).map_err(write_error)?;
        f.write_all(toml.as_bytes()).map_err(write_error)?;
        debug!("Saved configuration to {}", path.display());
        Ok(())
    }

    /// # Errors
    ///
    /// Will return `Err` if the platform has no user configuration directory.
    pub fn file_path() -> Result<PathBuf, ConfigError> {
        Ok(dirs::config_dir()
            .ok_or(ConfigError::NoConfigDir)?
            .join("button-box")
            .join("config.toml"))
    }

    /// Like [`Config::file_path`], but logs and yields `None` when there is
    /// no user configuration directory.
    #[must_use]
    pub fn default_file() -> Option<PathBuf> {
        match Config::file_path() {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("{e}, using defaults");
                None
            }
        }
    }
}
