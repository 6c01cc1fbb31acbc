//! Server configuration.
//!
//! Settings come from a YAML file (`config.yaml` unless `-f` or `CLUBHOUSE_CONFIG` names
//! another) layered under environment variables. Every field has a default, so an empty or
//! missing file starts an in-memory server on port 3001 with fixture data.
//!
//! ## Sources
//!
//! Later sources win:
//!
//! 1. **YAML file**
//! 2. **Environment variables** - Variables prefixed with `CLUBHOUSE_` override YAML values
//! 3. **MONGODB_URI** - Special case: switches `database` to MongoDB at that URI
//!
//! Nested fields are addressed with double underscores: `CLUBHOUSE_GRAPHQL__MAX_DEPTH=8` sets
//! `graphql.max_depth`.
//!
//! ## Usage
//!
//! ```no_run
//! use clap::Parser;
//! use clubhouse::config::{Args, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let args = Args::parse();
//! let config = Config::load(&args)?;
//!
//! println!("binding {}", config.bind_address());
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Variable Examples
//!
//! ```bash
//! # Override server port
//! CLUBHOUSE_PORT=8080
//!
//! # Use MongoDB (preferred method)
//! MONGODB_URI="mongodb://localhost:27017"
//!
//! # Or select it explicitly
//! CLUBHOUSE_DATABASE__TYPE=mongo
//! CLUBHOUSE_DATABASE__URL="mongodb://db:27017"
//! CLUBHOUSE_DATABASE__DATABASE=clubhouse
//!
//! # Toggle features
//! CLUBHOUSE_SEED__ENABLED=false
//! CLUBHOUSE_ENABLE_METRICS=true
//! ```

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::Error;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// YAML configuration file
    #[arg(short = 'f', long, env = "CLUBHOUSE_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Load and check the configuration, then exit
    #[arg(long)]
    pub validate: bool,
}

/// Root of the configuration file. Missing fields take their [`Default`] values.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Interface to listen on
    pub host: String,
    pub port: u16,
    /// Optional: MongoDB connection string override via the `MONGODB_URI` environment variable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mongodb_uri: Option<String>,
    /// Document store backend - in-memory or MongoDB
    pub database: DatabaseConfig,
    /// Fixture data loaded into an empty store on startup
    pub seed: SeedConfig,
    /// GraphQL endpoint settings
    pub graphql: GraphqlConfig,
    /// CORS settings for browser clients
    pub cors: CorsConfig,
    /// Page sizes for list endpoints
    pub pagination: PaginationConfig,
    /// Serve Prometheus request metrics at `/internal/metrics`
    pub enable_metrics: bool,
    /// Export spans over OTLP, see [`crate::telemetry`]
    pub enable_otel_export: bool,
}

/// Document store configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DatabaseConfig {
    /// Keep documents in process memory (development and tests; data is lost on restart)
    #[default]
    Memory,
    /// Use a MongoDB deployment
    Mongo(MongoSettings),
}

/// MongoDB connection settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct MongoSettings {
    /// Connection string, e.g. `mongodb://localhost:27017`
    pub url: String,
    /// Database holding the collections
    pub database: String,
    /// Timeout for establishing connections and selecting a server
    #[serde(with = "humantime_serde")]
    pub connect_timeout: Duration,
    /// Maximum number of pooled connections
    pub max_pool_size: u32,
}

impl Default for MongoSettings {
    fn default() -> Self {
        Self {
            url: "mongodb://localhost:27017".to_string(),
            database: "clubhouse".to_string(),
            connect_timeout: Duration::from_secs(10),
            max_pool_size: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SeedConfig {
    /// Insert the fixture set when the competitions collection is empty
    pub enabled: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GraphqlConfig {
    /// Serve `POST /graphql`
    pub enabled: bool,
    /// Serve the GraphiQL playground at `GET /graphql`
    pub playground: bool,
    /// Maximum query depth
    pub max_depth: usize,
    /// Maximum query complexity
    pub max_complexity: usize,
}

impl Default for GraphqlConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            playground: true,
            max_depth: 10,
            max_complexity: 500,
        }
    }
}

/// Cross-origin access for browser clients of the REST and GraphQL endpoints.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// `*` or full origins such as `https://fans.example.com`
    pub allowed_origins: Vec<CorsOrigin>,
    /// Send `Access-Control-Allow-Credentials`; not allowed with `*`
    pub allow_credentials: bool,
    /// Preflight cache lifetime in seconds
    pub max_age: Option<u64>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![CorsOrigin::Wildcard],
            allow_credentials: false,
            max_age: Some(3600),
        }
    }
}

/// One entry of `cors.allowed_origins`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum CorsOrigin {
    /// `*`
    #[serde(deserialize_with = "parse_wildcard", serialize_with = "serialize_wildcard")]
    Wildcard,
    #[serde(deserialize_with = "parse_url")]
    Url(Url),
}

fn parse_wildcard<'de, D>(deserializer: D) -> Result<(), D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    if s == "*" {
        Ok(())
    } else {
        Err(serde::de::Error::custom("Expected '*'"))
    }
}

fn serialize_wildcard<S>(serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str("*")
}

fn parse_url<'de, D>(deserializer: D) -> Result<Url, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: String = Deserialize::deserialize(deserializer)?;
    Url::parse(&s).map_err(serde::de::Error::custom)
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PaginationConfig {
    /// Page size when `limit` is not given
    pub default_limit: u64,
    /// Upper bound for `limit`
    pub max_limit: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 100,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            mongodb_uri: None,
            database: DatabaseConfig::default(),
            seed: SeedConfig::default(),
            graphql: GraphqlConfig::default(),
            cors: CorsConfig::default(),
            pagination: PaginationConfig::default(),
            enable_metrics: true,
            enable_otel_export: false,
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let mut config: Self = Self::figment(args).extract()?;

        // if MONGODB_URI is set, use it (preserving any other mongo settings)
        if let Some(url) = config.mongodb_uri.take() {
            let settings = match &config.database {
                DatabaseConfig::Mongo(settings) => settings.clone(),
                DatabaseConfig::Memory => MongoSettings::default(),
            };
            config.database = DatabaseConfig::Mongo(MongoSettings { url, ..settings });
        }

        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    /// Reject settings the server cannot run with
    pub fn validate(&self) -> Result<(), Error> {
        if let DatabaseConfig::Mongo(settings) = &self.database {
            if settings.url.trim().is_empty() {
                return Err(Error::Internal {
                    operation: "Config validation: database.url cannot be empty. Set MONGODB_URI or CLUBHOUSE_DATABASE__URL."
                        .to_string(),
                });
            }
            if settings.database.trim().is_empty() {
                return Err(Error::Internal {
                    operation: "Config validation: database.database cannot be empty".to_string(),
                });
            }
            if settings.max_pool_size == 0 {
                return Err(Error::Internal {
                    operation: "Config validation: database.max_pool_size must be at least 1".to_string(),
                });
            }
        }

        if self.pagination.default_limit == 0 || self.pagination.max_limit == 0 {
            return Err(Error::Internal {
                operation: "Config validation: pagination limits must be positive".to_string(),
            });
        }

        if self.pagination.default_limit > self.pagination.max_limit {
            return Err(Error::Internal {
                operation: format!(
                    "Config validation: pagination.default_limit ({}) cannot be greater than pagination.max_limit ({})",
                    self.pagination.default_limit, self.pagination.max_limit
                ),
            });
        }

        if self.graphql.max_depth == 0 || self.graphql.max_complexity == 0 {
            return Err(Error::Internal {
                operation: "Config validation: graphql.max_depth and graphql.max_complexity must be positive".to_string(),
            });
        }

        if self.cors.allowed_origins.is_empty() {
            return Err(Error::Internal {
                operation: "Config validation: CORS allowed_origins cannot be empty. Add at least one allowed origin.".to_string(),
            });
        }

        let has_wildcard = self
            .cors
            .allowed_origins
            .iter()
            .any(|origin| matches!(origin, CorsOrigin::Wildcard));
        if has_wildcard && self.cors.allow_credentials {
            return Err(Error::Internal {
                operation: "Config validation: CORS cannot use wildcard origin '*' with allow_credentials=true. Specify explicit origins."
                    .to_string(),
            });
        }

        Ok(())
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            .merge(Yaml::file(&args.config))
            .merge(Env::prefixed("CLUBHOUSE_").ignore(&["config"]).split("__"))
            // Common MONGODB_URI pattern
            .merge(Env::raw().only(&["MONGODB_URI"]).map(|_| "mongodb_uri".into()))
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    fn args(path: &str) -> Args {
        Args {
            config: path.to_string(),
            validate: false,
        }
    }

    #[test]
    fn test_defaults_without_config_file() {
        Jail::expect_with(|_jail| {
            let config = Config::load(&args("missing.yaml"))?;
            assert_eq!(config.port, 3001);
            assert!(matches!(config.database, DatabaseConfig::Memory));
            assert!(config.seed.enabled);
            assert_eq!(config.pagination.default_limit, 10);
            assert_eq!(config.pagination.max_limit, 100);
            Ok(())
        });
    }

    #[test]
    fn test_yaml_mongo_config() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
port: 8080
database:
  type: mongo
  url: "mongodb://db:27017"
  database: "club"
  connect_timeout: "3s"
seed:
  enabled: false
graphql:
  playground: false
  max_depth: 6
cors:
  allowed_origins:
    - "https://club.example.com"
  allow_credentials: true
"#,
            )?;

            let config = Config::load(&args("test.yaml"))?;
            assert_eq!(config.port, 8080);
            match &config.database {
                DatabaseConfig::Mongo(settings) => {
                    assert_eq!(settings.url, "mongodb://db:27017");
                    assert_eq!(settings.database, "club");
                    assert_eq!(settings.connect_timeout, Duration::from_secs(3));
                    assert_eq!(settings.max_pool_size, 10); // still default
                }
                other => panic!("expected mongo config, got {other:?}"),
            }
            assert!(!config.seed.enabled);
            assert!(!config.graphql.playground);
            assert_eq!(config.graphql.max_depth, 6);
            assert!(matches!(config.cors.allowed_origins[0], CorsOrigin::Url(_)));
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides() {
        Jail::expect_with(|jail| {
            jail.create_file("test.yaml", "port: 8080\n")?;
            jail.set_env("CLUBHOUSE_PORT", "9090");
            jail.set_env("CLUBHOUSE_PAGINATION__DEFAULT_LIMIT", "25");
            jail.set_env("CLUBHOUSE_ENABLE_METRICS", "false");

            let config = Config::load(&args("test.yaml"))?;
            assert_eq!(config.port, 9090);
            assert_eq!(config.pagination.default_limit, 25);
            assert!(!config.enable_metrics);
            Ok(())
        });
    }

    #[test]
    fn test_mongodb_uri_switches_to_mongo() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
database:
  type: mongo
  url: "mongodb://ignored:27017"
  database: "from_yaml"
"#,
            )?;
            jail.set_env("MONGODB_URI", "mongodb://env-host:27017");

            let config = Config::load(&args("test.yaml"))?;
            match config.database {
                DatabaseConfig::Mongo(settings) => {
                    assert_eq!(settings.url, "mongodb://env-host:27017");
                    assert_eq!(settings.database, "from_yaml");
                }
                other => panic!("expected mongo config, got {other:?}"),
            }
            Ok(())
        });
    }

    #[test]
    fn test_unknown_fields_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("test.yaml", "admin_email: someone@example.com\n")?;
            assert!(Config::load(&args("test.yaml")).is_err());
            Ok(())
        });
    }

    #[test]
    fn test_validation_rejects_inconsistent_settings() {
        let mut config = Config::default();
        config.pagination.default_limit = 200;
        assert!(config.validate().unwrap_err().to_string().contains("default_limit"));

        let mut config = Config::default();
        config.pagination.max_limit = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.cors.allow_credentials = true;
        assert!(config.validate().unwrap_err().to_string().contains("wildcard"));

        let mut config = Config::default();
        config.graphql.max_complexity = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.database = DatabaseConfig::Mongo(MongoSettings {
            url: " ".to_string(),
            ..Default::default()
        });
        assert!(config.validate().unwrap_err().to_string().contains("database.url"));

        assert!(Config::default().validate().is_ok());
    }
}
