use std::env;
use thiserror::Error;
use validator::Validate;

/// Base URL used when neither a flag nor `INVENTORY_API_URL` is given
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Harness configuration with validation
#[derive(Clone, Debug, Validate)]
pub struct HarnessConfig {
    /// Root under which every resource endpoint is addressed
    #[validate(url(message = "Base URL must be an absolute URL"))]
    pub base_url: String,

    /// Bearer credential attached to every request when present
    #[validate(length(min = 1, message = "Token cannot be empty"))]
    pub token: Option<String>,

    /// Per-request timeout; the HTTP client default applies when unset
    #[validate(range(
        min = 1,
        max = 3600,
        message = "Timeout must be between 1 and 3600 seconds"
    ))]
    pub timeout_secs: Option<u64>,

    /// Whether to POST `init-db` before the resource scenarios
    pub init_db: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout_secs: None,
            init_db: false,
        }
    }
}

impl HarnessConfig {
    /// Build configuration from environment variables, let CLI arguments
    /// override them, then validate the result
    pub fn load(cli: CliConfig) -> Result<Self, ConfigError> {
        let mut config = Self::read_env()?;
        config.merge_cli(cli);

        config.validate()?;
        Ok(config)
    }

    fn read_env() -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: env::var("INVENTORY_API_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            token: env::var("INVENTORY_API_TOKEN").ok(),
            timeout_secs: parse_optional_env_var("INVENTORY_API_TIMEOUT_SECS")?,
            init_db: parse_env_var("INVENTORY_API_INIT_DB", "false")?,
        })
    }

    /// Merge with CLI arguments (only the ones actually given override)
    pub fn merge_cli(&mut self, cli: CliConfig) {
        if let Some(base_url) = cli.base_url {
            self.base_url = base_url;
        }
        if let Some(token) = cli.token {
            self.token = Some(token);
        }
        if let Some(timeout_secs) = cli.timeout_secs {
            self.timeout_secs = Some(timeout_secs);
        }
        self.init_db |= cli.init_db;
    }

    /// Base URL without a trailing slash, ready for `<base>/<endpoint>` joins
    pub fn normalized_base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

/// CLI configuration (parsed from command line arguments)
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub base_url: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
    pub init_db: bool,
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

/// Parse an environment variable that has no default
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
        Err(_) => Ok(None),
    }
}
