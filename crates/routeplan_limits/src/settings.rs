//! Layered run configuration.
//!
//! Sources, in order of precedence (later sources override earlier):
//! 1. Bundled defaults (include_str! from routeplan.toml)
//! 2. User config in home directory (~/.config/routeplan/routeplan.toml)
//! 3. User config in current directory (./routeplan.toml)
//! 4. `ROUTEPLAN_*` environment variables (`ROUTEPLAN_OUTPUT_PATH`; `__` separates
//!    nested keys, as in `ROUTEPLAN_STATUS_COMMAND__PROGRAM`)
//! 5. `OPENAI_TIER`

use routeplan_error::{ConfigError, RouteplanResult};
use config::{Config, ConfigBuilder, Environment, File, FileFormat, Map, builder::DefaultState};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

/// Environment variable that selects the OpenAI usage tier.
pub const TIER_ENV_VAR: &str = "OPENAI_TIER";

const ENV_PREFIX: &str = "ROUTEPLAN";

const DEFAULT_CONFIG: &str = include_str!("../../../routeplan.toml");

/// External command that prints the usage snapshot.
///
/// ```toml
/// [status_command]
/// program = "openclaw"
/// args = ["status", "--usage", "--json"]
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatusCommandConfig {
    /// Program to execute (looked up on PATH)
    pub program: String,

    /// Arguments passed to the program
    #[serde(default)]
    pub args: Vec<String>,
}

/// Top-level routeplan configuration.
///
/// # Example
///
/// ```no_run
/// use routeplan_limits::RouteplanConfig;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = RouteplanConfig::load()?;
/// println!("tier {} -> {}", config.openai_tier, config.output_path()?.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RouteplanConfig {
    /// Requested OpenAI usage tier, recorded verbatim in the artifact
    pub openai_tier: i64,

    /// Artifact location; a leading `~/` expands to the home directory
    pub output_path: String,

    /// Usage snapshot command
    pub status_command: StatusCommandConfig,
}

impl RouteplanConfig {
    /// Load configuration with full precedence from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file is malformed or `OPENAI_TIER` is
    /// not an integer.
    #[instrument]
    pub fn load() -> RouteplanResult<Self> {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));
        Self::load_from_vars(vars)
    }

    /// Load configuration with full precedence, taking the environment
    /// layer and `OPENAI_TIER` from `vars` instead of the process.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file is malformed or `OPENAI_TIER` is
    /// not an integer.
    #[instrument(skip(vars))]
    pub fn load_from_vars(
        vars: impl IntoIterator<Item = (String, String)>,
    ) -> RouteplanResult<Self> {
        let vars: Map<String, String> = vars.into_iter().collect();
        let tier = vars.get(TIER_ENV_VAR).cloned();
        Self::layered(Self::environment().source(Some(vars)), tier.as_deref())
    }

    /// Load configuration with full precedence, using `tier` in place of
    /// the `OPENAI_TIER` environment variable.
    #[instrument]
    pub fn load_with_tier(tier: Option<&str>) -> RouteplanResult<Self> {
        Self::layered(Self::environment(), tier)
    }

    /// `ROUTEPLAN_OUTPUT_PATH`, `ROUTEPLAN_STATUS_COMMAND__PROGRAM`, ...
    fn environment() -> Environment {
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
    }

    fn layered(environment: Environment, tier: Option<&str>) -> RouteplanResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder = Self::defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/routeplan/routeplan.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder
            .add_source(File::with_name("routeplan").required(false))
            .add_source(environment);

        Self::finish(builder, tier)
    }

    /// Load bundled defaults overlaid with a specific file.
    ///
    /// Environment variables are not consulted.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> RouteplanResult<Self> {
        debug!("Loading configuration from file");
        let builder = Self::defaults().add_source(File::from(path.as_ref()));
        Self::finish(builder, None)
    }

    /// Resolved artifact path.
    ///
    /// # Errors
    ///
    /// Returns an error if the path starts with `~/` and no home directory
    /// can be determined.
    pub fn output_path(&self) -> RouteplanResult<PathBuf> {
        match self.output_path.strip_prefix("~/") {
            Some(rest) => {
                let home = dirs::home_dir().ok_or_else(|| {
                    ConfigError::new(format!(
                        "Cannot expand '{}': no home directory",
                        self.output_path
                    ))
                })?;
                Ok(home.join(rest))
            }
            None => Ok(PathBuf::from(&self.output_path)),
        }
    }

    fn defaults() -> ConfigBuilder<DefaultState> {
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
    }

    fn finish(
        mut builder: ConfigBuilder<DefaultState>,
        tier: Option<&str>,
    ) -> RouteplanResult<Self> {
        if let Some(raw) = tier {
            let level = parse_tier(raw)?;
            debug!(level, "Applying {} override", TIER_ENV_VAR);
            builder = builder.set_override("openai_tier", level).map_err(|e| {
                ConfigError::new(format!("Failed to apply {}: {}", TIER_ENV_VAR, e))
            })?;
        }

        let config: Self = builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))?;

        if config.status_command.program.trim().is_empty() {
            return Err(ConfigError::new("status_command.program must not be empty").into());
        }
        if config.output_path.trim().is_empty() {
            return Err(ConfigError::new("output_path must not be empty").into());
        }

        Ok(config)
    }
}

/// Parse an integer tier selector, tolerating surrounding whitespace.
fn parse_tier(raw: &str) -> RouteplanResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| {
        ConfigError::new(format!("{} must be an integer, got '{}'", TIER_ENV_VAR, raw)).into()
    })
}
