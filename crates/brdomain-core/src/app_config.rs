use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub rdap_base_url: String,
    pub receitaws_base_url: String,
    pub log_level: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    /// Wait after each registry call, whatever its outcome.
    pub settle_delay_secs: u64,
    /// Minimum wall-clock time spent on one domain before the next starts.
    pub base_interval_secs: u64,
    /// A cooldown is inserted each time this many domains have been saved.
    pub success_batch_size: u32,
    pub cooldown_secs: u64,
}

impl AppConfig {
    #[must_use]
    pub fn settle_delay(&self) -> Duration {
        Duration::from_secs(self.settle_delay_secs)
    }

    #[must_use]
    pub fn base_interval(&self) -> Duration {
        Duration::from_secs(self.base_interval_secs)
    }

    #[must_use]
    pub fn cooldown(&self) -> Duration {
        Duration::from_secs(self.cooldown_secs)
    }
}
