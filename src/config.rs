use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use validator::Validate;

use crate::query_catalog::{
    CatalogError, QueryCatalog, TemplateKind, SELECT_ALL_USERS, SELECT_USER_BY_NAME,
};

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

/// One allow-listed query shape as written in the config file
#[derive(Clone, Debug, Validate, Serialize, Deserialize, PartialEq)]
pub struct TemplateConfig {
    #[validate(length(min = 1, message = "Template SQL cannot be empty"))]
    pub sql: String,

    pub kind: TemplateKind,
}

/// Gateway configuration with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Allow-listed query templates (deployment-time only)
    #[validate(
        length(min = 1, message = "At least one query template is required"),
        nested
    )]
    pub templates: Vec<TemplateConfig>,

    /// Number of injected variants the demo runs against the name lookup
    #[validate(range(max = 1000, message = "Injection rounds must be at most 1000"))]
    pub injection_rounds: u32,

    /// Seed for the adversarial harness; random when unset
    pub harness_seed: Option<u64>,

    /// Whether to create and populate the USERS table on startup
    pub seed_fixtures: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            templates: vec![
                TemplateConfig {
                    sql: SELECT_ALL_USERS.to_string(),
                    kind: TemplateKind::Fixed,
                },
                TemplateConfig {
                    sql: SELECT_USER_BY_NAME.to_string(),
                    kind: TemplateKind::Parameterized,
                },
            ],
            injection_rounds: 5,
            harness_seed: None,
            seed_fixtures: true,
        }
    }
}

impl GatewayConfig {
    /// Create configuration from environment variables with validation.
    /// Templates always come from the defaults or a config file.
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            injection_rounds: parse_env_var("SQLGATE_INJECTION_ROUNDS", "5")?,
            harness_seed: parse_optional_env_var("SQLGATE_HARNESS_SEED")?,
            seed_fixtures: parse_env_var("SQLGATE_SEED_FIXTURES", "true")?,
            ..Default::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from CLI arguments with validation.
    /// The config file (or the environment, without one) supplies the base;
    /// explicit flags override it.
    pub fn from_cli(cli: CliConfig) -> Result<Self, ConfigError> {
        let mut config = match cli.config_path {
            Some(ref path) => Self::from_yaml_file(path)?,
            None => Self::from_env()?,
        };
        config.merge(cli);

        config.validate()?;
        Ok(config)
    }

    /// Apply command-line overrides on top of this configuration.
    /// Flags left unset keep the current values.
    pub fn merge(&mut self, other: CliConfig) {
        if let Some(rounds) = other.injection_rounds {
            self.injection_rounds = rounds;
        }
        if other.harness_seed.is_some() {
            self.harness_seed = other.harness_seed;
        }
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Build the query catalog from the configured templates
    pub fn catalog(&self) -> Result<QueryCatalog, ConfigError> {
        Ok(QueryCatalog::from_config(&self.templates)?)
    }
}

/// CLI configuration (parsed from command line arguments)
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub config_path: Option<std::path::PathBuf>,
    pub injection_rounds: Option<u32>,
    pub harness_seed: Option<u64>,
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}

/// Parse an environment variable that may be absent
fn parse_optional_env_var<T: std::str::FromStr>(key: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value.parse().map(Some).map_err(|e| ConfigError::Parse {
            field: key.to_string(),
            value,
            source: Box::new(e),
        }),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
