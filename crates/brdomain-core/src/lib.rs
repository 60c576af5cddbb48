pub mod app_config;
pub mod config;
pub mod domain;
pub mod records;

pub use app_config::AppConfig;
pub use config::{load_app_config, load_app_config_from_env};
pub use domain::{normalize_domain, normalize_domains, Domain};
pub use records::{
    sanitize_taxpayer_id, Cnpj, CompanyRecord, EnrichmentRow, OwnershipRecord, Partner,
    ERROR_SENTINEL, NOT_AVAILABLE,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
