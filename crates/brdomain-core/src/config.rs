use crate::app_config::AppConfig;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; defaults reproduce the pacing the registries
/// are known to tolerate (10 s settle, 60 s per domain, 5 min every 5 saves).
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
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

    let input_path = PathBuf::from(or_default("BRDOMAIN_INPUT_PATH", "dominios.csv"));
    let output_path = PathBuf::from(or_default(
        "BRDOMAIN_OUTPUT_PATH",
        "informacoes_empresa.csv",
    ));
    let rdap_base_url = or_default(
        "BRDOMAIN_RDAP_BASE_URL",
        "https://rdap.registro.br/domain/",
    );
    let receitaws_base_url = or_default(
        "BRDOMAIN_RECEITAWS_BASE_URL",
        "https://receitaws.com.br/v1/cnpj/",
    );
    let log_level = or_default("BRDOMAIN_LOG_LEVEL", "info");

    let request_timeout_secs = parse_u64("BRDOMAIN_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("BRDOMAIN_USER_AGENT", "brdomain/0.1 (registry-enrichment)");

    let settle_delay_secs = parse_u64("BRDOMAIN_SETTLE_DELAY_SECS", "10")?;
    let base_interval_secs = parse_u64("BRDOMAIN_BASE_INTERVAL_SECS", "60")?;
    let success_batch_size = parse_u32("BRDOMAIN_SUCCESS_BATCH_SIZE", "5")?;
    if success_batch_size == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "BRDOMAIN_SUCCESS_BATCH_SIZE".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    let cooldown_secs = parse_u64("BRDOMAIN_COOLDOWN_SECS", "300")?;

    Ok(AppConfig {
        input_path,
        output_path,
        rdap_base_url,
        receitaws_base_url,
        log_level,
        request_timeout_secs,
        user_agent,
        settle_delay_secs,
        base_interval_secs,
        success_batch_size,
        cooldown_secs,
    })
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
