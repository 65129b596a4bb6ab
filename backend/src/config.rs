//! Command line and environment configuration.

use clap::Parser;

pub const ENV_HOST: &str = "ANAR_HOST";
pub const ENV_PORT: &str = "ANAR_PORT";
pub const ENV_INDEX: &str = "ANAR_INDEX";
pub const ENV_LOG: &str = "ANAR_LOG";
pub const ENV_MANTICORE_URL: &str = "MANTICORE_URL";
pub const ENV_CLICKHOUSE_URL: &str = "CLICKHOUSE_URL";
pub const ENV_CLICKHOUSE_USER: &str = "CLICKHOUSE_USER";
pub const ENV_CLICKHOUSE_PASSWORD: &str = "CLICKHOUSE_PASSWORD";
pub const ENV_CLICKHOUSE_DATABASE: &str = "CLICKHOUSE_DATABASE";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_MANTICORE_URL: &str = "http://127.0.0.1:9308";
pub const DEFAULT_INDEX: &str = "anar_yacimientos";

#[derive(Debug, Clone, Parser)]
#[command(name = "anar-search")]
#[command(version, about = "Search service for the ANAR archaeological site registry", long_about = None)]
pub struct Config {
    /// Server host address
    #[arg(long, short = 'H', env = ENV_HOST, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Server port
    #[arg(long, short = 'p', env = ENV_PORT, default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Base URL of the Manticore HTTP endpoint
    #[arg(long, env = ENV_MANTICORE_URL, default_value = DEFAULT_MANTICORE_URL)]
    pub manticore_url: String,

    /// Name of the index holding site records
    #[arg(long = "index", env = ENV_INDEX, default_value = DEFAULT_INDEX)]
    pub index_name: String,

    /// ClickHouse URL for the search response cache (cache disabled when unset)
    #[arg(long, env = ENV_CLICKHOUSE_URL)]
    pub clickhouse_url: Option<String>,

    #[arg(long, env = ENV_CLICKHOUSE_USER, default_value = "anar")]
    pub clickhouse_user: String,

    #[arg(long, env = ENV_CLICKHOUSE_PASSWORD, default_value = "anar", hide_env_values = true)]
    pub clickhouse_password: String,

    #[arg(long, env = ENV_CLICKHOUSE_DATABASE, default_value = "anar")]
    pub clickhouse_database: String,
}

#[derive(Debug, Clone)]
pub struct ClickhouseConfig {
    pub url: String,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Config {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn clickhouse(&self) -> Option<ClickhouseConfig> {
        let url = self.clickhouse_url.as_ref().filter(|u| !u.trim().is_empty())?;
        Some(ClickhouseConfig {
            url: url.clone(),
            user: self.clickhouse_user.clone(),
            password: self.clickhouse_password.clone(),
            database: self.clickhouse_database.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["anar-search"]).unwrap();
        assert_eq!(config.manticore_url, DEFAULT_MANTICORE_URL);
        assert_eq!(config.index_name, DEFAULT_INDEX);
        assert_eq!(config.bind_address(), format!("{DEFAULT_HOST}:{DEFAULT_PORT}"));
    }

    #[test]
    fn test_cache_enabled_by_clickhouse_url() {
        let config = Config::try_parse_from([
            "anar-search",
            "--clickhouse-url",
            "http://localhost:8123",
            "--index",
            "anar_test",
        ])
        .unwrap();
        let clickhouse = config.clickhouse().unwrap();
        assert_eq!(clickhouse.url, "http://localhost:8123");
        assert_eq!(clickhouse.database, "anar");
        assert_eq!(config.index_name, "anar_test");
    }

    #[test]
    fn test_blank_clickhouse_url_disables_cache() {
        let config = Config::try_parse_from(["anar-search", "--clickhouse-url", " "]).unwrap();
        assert!(config.clickhouse().is_none());
    }
}
