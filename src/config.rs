//! Configuration for the probes.
//!
//! Every setting has a default, so no configuration is needed at all. The
//! defaults can be changed, from lowest to highest priority, with:
//!
//! 1. A TOML file given with `--config-path` or the
//!    `WEB_CHECKS_CONFIG_TOML_PATH` environment variable.
//! 2. The whole TOML content in the `WEB_CHECKS_CONFIG_TOML` environment
//!    variable. It has priority over the file.
//! 3. Environment variables prefixed with `WEB_CHECKS_`, with `__`
//!    separating nested sections, for example
//!    `WEB_CHECKS_FRESHNESS__WARNING_SECS=64800`.
//!
//! Options given on the command line override all of them.
//!
//! ```toml
//! timeout_secs = 5
//! user_agent = "nagios-check"
//!
//! [logging]
//! threshold = "off"
//!
//! [freshness]
//! fields = ["lastUpdated", "last_update"]
//! warning_secs = 43200
//! critical_secs = 86400
//! label = "RSYNC"
//!
//! [string]
//! stage_on_disk = false
//!
//! [[fonts.resources]]
//! name = "css"
//! path = "fontface.css"
//! ```
//!
//! Logging goes to `stderr` and is off by default: `stdout` only ever holds
//! the status line.
use std::env;
use std::sync::Arc;
use std::time::Duration;

use camino::{Utf8Path, Utf8PathBuf};
use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checks::fonts::{self, Resource};
use crate::probe::evaluate::{DEFAULT_CRITICAL_SECS, DEFAULT_LABEL, DEFAULT_WARNING_SECS};
use crate::probe::extract::DEFAULT_TIMESTAMP_FIELDS;
use crate::probe::fetch::{DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};

/// The whole TOML configuration. It has priority over the config file.
pub const ENV_VAR_CONFIG_TOML: &str = "WEB_CHECKS_CONFIG_TOML";

/// The TOML configuration file location.
pub const ENV_VAR_CONFIG_TOML_PATH: &str = "WEB_CHECKS_CONFIG_TOML_PATH";

/// Prefix of the environment variables overriding single settings.
const ENV_VAR_PREFIX: &str = "WEB_CHECKS_";

/// Errors that can occur when loading the configuration.
#[derive(Error, Debug, Clone)]
pub enum Error {
    #[error("Unable to read the config file `{path}`: {source}")]
    UnableToReadConfigFile { path: Utf8PathBuf, source: Arc<std::io::Error> },

    #[error("Failed processing the configuration: {source}")]
    ConfigError { source: Arc<figment::Error> },

    #[error("Invalid setting `{key}`: {reason}")]
    InvalidSetting { key: &'static str, reason: &'static str },
}

impl From<figment::Error> for Error {
    fn from(err: figment::Error) -> Self {
        Self::ConfigError { source: Arc::new(err) }
    }
}

/// Information required for loading the configuration.
#[derive(Debug, Default, Clone)]
pub struct Info {
    config_toml: Option<String>,
}

impl Info {
    /// Uses the TOML content when given, or otherwise reads the file.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the config file cannot be read.
    pub fn new(config_toml: Option<String>, config_toml_path: Option<&Utf8Path>) -> Result<Self, Error> {
        if let Some(config_toml) = config_toml {
            tracing::debug!("loading configuration from the environment");
            return Ok(Self {
                config_toml: Some(config_toml),
            });
        }

        let Some(path) = config_toml_path else {
            return Ok(Self::default());
        };

        tracing::debug!(%path, "loading configuration from file");

        let config_toml = std::fs::read_to_string(path).map_err(|err| Error::UnableToReadConfigFile {
            path: path.to_owned(),
            source: Arc::new(err),
        })?;

        Ok(Self {
            config_toml: Some(config_toml),
        })
    }

    /// Same as [`Info::new`] taking both locations from the environment.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the config file cannot be read.
    pub fn from_env() -> Result<Self, Error> {
        let config_toml_path = env::var(ENV_VAR_CONFIG_TOML_PATH).ok().map(Utf8PathBuf::from);

        Self::new(env::var(ENV_VAR_CONFIG_TOML).ok(), config_toml_path.as_deref())
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Configuration {
    /// Timeout in seconds for connecting and for the whole request.
    #[serde(default = "Configuration::default_timeout_secs")]
    pub timeout_secs: u64,

    /// `User-Agent` header for the requests. An empty value sends the HTTP
    /// client default.
    #[serde(default = "Configuration::default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub logging: Logging,

    #[serde(default)]
    pub freshness: Freshness,

    #[serde(default)]
    pub string: StringCheck,

    #[serde(default)]
    pub fonts: Fonts,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            timeout_secs: Self::default_timeout_secs(),
            user_agent: Self::default_user_agent(),
            logging: Logging::default(),
            freshness: Freshness::default(),
            string: StringCheck::default(),
            fonts: Fonts::default(),
        }
    }
}

impl Configuration {
    fn default_timeout_secs() -> u64 {
        DEFAULT_TIMEOUT.as_secs()
    }

    fn default_user_agent() -> String {
        DEFAULT_USER_AGENT.to_owned()
    }

    /// Loads the configuration: defaults, then the TOML in `info`, then the
    /// `WEB_CHECKS_` environment variables.
    ///
    /// # Errors
    ///
    /// Will return `Err` if the TOML is not valid, a setting has the wrong
    /// type, or a setting has a value no check can run with.
    pub fn load(info: &Info) -> Result<Configuration, Error> {
        let mut figment = Figment::from(Serialized::defaults(Configuration::default()));

        if let Some(config_toml) = &info.config_toml {
            figment = figment.merge(Toml::string(config_toml));
        }

        figment = figment.merge(
            Env::prefixed(ENV_VAR_PREFIX)
                .ignore(&["config_toml", "config_toml_path"])
                .split("__"),
        );

        let config: Configuration = figment.extract()?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<(), Error> {
        if self.timeout_secs == 0 {
            return Err(Error::InvalidSetting {
                key: "timeout_secs",
                reason: "must be greater than zero",
            });
        }

        if self.freshness.fields.iter().all(|field| field.trim().is_empty()) {
            return Err(Error::InvalidSetting {
                key: "freshness.fields",
                reason: "needs at least one field name",
            });
        }

        Ok(())
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    #[must_use]
    pub fn user_agent(&self) -> Option<&str> {
        Some(self.user_agent.as_str()).filter(|user_agent| !user_agent.is_empty())
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Logging {
    /// Logging level. Possible values are: `off`, `error`, `warn`, `info`,
    /// `debug` and `trace`. Default is `off`.
    #[serde(default = "Logging::default_threshold")]
    pub threshold: Threshold,
}

impl Default for Logging {
    fn default() -> Self {
        Self {
            threshold: Self::default_threshold(),
        }
    }
}

impl Logging {
    fn default_threshold() -> Threshold {
        Threshold::Off
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum Threshold {
    /// A threshold lower than all security levels.
    Off,
    /// Corresponds to the `Error` security level.
    Error,
    /// Corresponds to the `Warn` security level.
    Warn,
    /// Corresponds to the `Info` security level.
    Info,
    /// Corresponds to the `Debug` security level.
    Debug,
    /// Corresponds to the `Trace` security level.
    Trace,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Freshness {
    /// Candidate timestamp fields, the first one present in the document wins.
    #[serde(default = "Freshness::default_fields")]
    pub fields: Vec<String>,

    /// Maximum age in seconds before the check is WARNING.
    #[serde(default = "Freshness::default_warning_secs")]
    pub warning_secs: u64,

    /// Maximum age in seconds before the check is CRITICAL.
    #[serde(default = "Freshness::default_critical_secs")]
    pub critical_secs: u64,

    /// Name of the monitored job in the OK message.
    #[serde(default = "Freshness::default_label")]
    pub label: String,
}

impl Default for Freshness {
    fn default() -> Self {
        Self {
            fields: Self::default_fields(),
            warning_secs: Self::default_warning_secs(),
            critical_secs: Self::default_critical_secs(),
            label: Self::default_label(),
        }
    }
}

impl Freshness {
    fn default_fields() -> Vec<String> {
        DEFAULT_TIMESTAMP_FIELDS.iter().map(ToString::to_string).collect()
    }

    fn default_warning_secs() -> u64 {
        DEFAULT_WARNING_SECS
    }

    fn default_critical_secs() -> u64 {
        DEFAULT_CRITICAL_SECS
    }

    fn default_label() -> String {
        DEFAULT_LABEL.to_owned()
    }
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone, Default)]
pub struct StringCheck {
    /// Write the response to a temporary file before searching it.
    #[serde(default)]
    pub stage_on_disk: bool,
}

#[derive(Serialize, Deserialize, PartialEq, Eq, Debug, Clone)]
pub struct Fonts {
    /// Files checked under the font base URL, in order.
    #[serde(default = "fonts::default_resources")]
    pub resources: Vec<Resource>,
}

impl Default for Fonts {
    fn default() -> Self {
        Self {
            resources: fonts::default_resources(),
        }
    }
}
