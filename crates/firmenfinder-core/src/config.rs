use crate::app_config::{AppConfig, Environment};
use crate::error::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files — useful for testing
/// or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if a value fails to parse.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual environment
/// so it can be tested with a pure `HashMap` lookup — no `set_var`/`remove_var` needed.
///
/// Every variable has a default: the tool targets a local SQLite file, so a
/// bare environment must still produce a working config.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u32>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_u8 = |var: &str, default: &str| -> Result<u8, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u8>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_f64 = |var: &str, default: &str| -> Result<f64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<f64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let database_url = or_default("FIRMENFINDER_DATABASE_URL", "sqlite://firmenfinder.db");
    let env = parse_environment(&or_default("FIRMENFINDER_ENV", "development"));
    let bind_addr = parse_addr("FIRMENFINDER_BIND_ADDR", "127.0.0.1:3000")?;
    let log_level = or_default("FIRMENFINDER_LOG_LEVEL", "info");
    let industries_path = PathBuf::from(or_default(
        "FIRMENFINDER_INDUSTRIES_PATH",
        "./config/industries.yaml",
    ));

    let db_max_connections = parse_u32("FIRMENFINDER_DB_MAX_CONNECTIONS", "5")?;
    let db_min_connections = parse_u32("FIRMENFINDER_DB_MIN_CONNECTIONS", "1")?;
    let db_acquire_timeout_secs = parse_u64("FIRMENFINDER_DB_ACQUIRE_TIMEOUT_SECS", "10")?;

    let sim_default_radius_m = parse_f64("FIRMENFINDER_SIM_DEFAULT_RADIUS_M", "2000")?;
    let sim_default_count = parse_usize("FIRMENFINDER_SIM_DEFAULT_COUNT", "80")?;
    let sim_default_website_pct = parse_u8("FIRMENFINDER_SIM_DEFAULT_WEBSITE_PCT", "70")?;

    if sim_default_website_pct > 100 {
        return Err(ConfigError::Validation(format!(
            "FIRMENFINDER_SIM_DEFAULT_WEBSITE_PCT must be at most 100, got {sim_default_website_pct}"
        )));
    }

    Ok(AppConfig {
        database_url,
        env,
        bind_addr,
        log_level,
        industries_path,
        db_max_connections,
        db_min_connections,
        db_acquire_timeout_secs,
        sim_default_radius_m,
        sim_default_count,
        sim_default_website_pct,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}
