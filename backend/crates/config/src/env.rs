use serde::Deserialize;
use std::env;
use wellbeing_common::error::{WellbeingError, WellbeingResult};

#[derive(Debug, Clone, Deserialize)]
pub struct MongoConfig {
    pub uri: String,
    pub database: String,
    /// Extra attempts after the first failed startup connection.
    pub connect_retries: u32,
}

/// Collections the gateway reads from. Older pipelines wrote location impact
/// to `work_mode` or `worklocation_impact`; point `WORK_LOCATION_COLLECTION`
/// at whichever one is populated.
#[derive(Debug, Clone, Deserialize)]
pub struct CollectionNames {
    pub stats: String,
    pub alerts: String,
    pub work_location: String,
}

impl Default for CollectionNames {
    fn default() -> Self {
        Self {
            stats: "cmsDashboard".to_owned(),
            alerts: "dept_burnout_alerts".to_owned(),
            work_location: "work_location_impact".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct WorkLocationOptions {
    pub sorted: bool,
    pub coerce_numeric: bool,
}

impl Default for WorkLocationOptions {
    fn default() -> Self {
        Self {
            sorted: true,
            coerce_numeric: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub mongo: MongoConfig,
    pub collections: CollectionNames,
    pub work_location: WorkLocationOptions,
    pub host: String,
    pub port: u16,
    pub log_level: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` file if present; every variable has a default.
    pub fn from_env() -> WellbeingResult<Self> {
        // Best-effort .env load; ignore if missing
        let _ = dotenvy::dotenv();

        let defaults = CollectionNames::default();

        Ok(Self {
            mongo: MongoConfig {
                uri: get_var_or("MONGO_URI", "mongodb://127.0.0.1:27017"),
                database: get_var_or("MONGO_DB", "analytics"),
                connect_retries: parse_var("MONGO_CONNECT_RETRIES", 3)?,
            },
            collections: CollectionNames {
                stats: get_var_or("STATS_COLLECTION", &defaults.stats),
                alerts: get_var_or("ALERTS_COLLECTION", &defaults.alerts),
                work_location: get_var_or("WORK_LOCATION_COLLECTION", &defaults.work_location),
            },
            work_location: WorkLocationOptions {
                sorted: get_flag("WORK_LOCATION_SORT", true)?,
                coerce_numeric: get_flag("WORK_LOCATION_COERCE", true)?,
            },
            host: get_var_or("HOST", "0.0.0.0"),
            port: parse_var("PORT", 5000)?,
            log_level: get_var_or("LOG_LEVEL", "info"),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_var<T>(key: &str, default: T) -> WellbeingResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| WellbeingError::Config(format!("invalid {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

fn get_flag(key: &str, default: bool) -> WellbeingResult<bool> {
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(WellbeingError::Config(format!(
            "invalid {key}: expected a boolean, got {other:?}"
        ))),
    }
}
