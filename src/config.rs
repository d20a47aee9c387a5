use crate::error::FleetError;
use crate::o_info;
use crate::output_broker::Logger;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Fallback credential file read when the token variable is unset.
pub const TOKEN_FILE: &str = "AGENT_TOKEN";

const MAX_STANDBY_SECONDS: u64 = 3600;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetCommandConfig {
    pub api: ApiConfig,
    pub fleet: FleetConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Root of the remote API
    pub base_url: String,
    /// Shared rate limit for every outbound call
    pub max_requests_per_second: u32,
    /// Per-call deadline enforced by the HTTP client
    pub request_timeout_seconds: u64,
    /// Environment variable holding the bearer token
    pub token_env: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Bound of the ship-ready report queue
    pub report_queue_capacity: usize,
    /// Delay before a ship whose waypoint could not be observed reports again
    pub standby_seconds: u64,
    /// Send the first ship on the shipyard tour before the loop starts
    pub run_requisition: bool,
    /// Accept every open contract at startup
    pub accept_contracts: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// 0 = errors and summaries, 1 = info, 2 = debug and trace
    pub verbosity: u8,
    /// How often batched summary lines are printed
    pub summary_interval_seconds: u64,
}

impl Default for FleetCommandConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "https://api.spacetraders.io/v2".to_string(),
                max_requests_per_second: 2,
                request_timeout_seconds: 60,
                token_env: "TOKEN".to_string(),
            },
            fleet: FleetConfig {
                report_queue_capacity: 16,
                standby_seconds: 10,
                run_requisition: true,
                accept_contracts: true,
            },
            output: OutputConfig {
                verbosity: 1,
                summary_interval_seconds: 30,
            },
        }
    }
}

impl FleetConfig {
    pub fn standby(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.standby_seconds.min(MAX_STANDBY_SECONDS) as i64)
    }
}

impl FleetCommandConfig {
    /// Load configuration from file, creating the default one if it doesn't exist.
    /// Returns the config and whether it was freshly created.
    pub fn load_or_create(config_path: &str) -> Result<(Self, bool), FleetError> {
        if Path::new(config_path).exists() {
            let config_str = fs::read_to_string(config_path)?;
            let config = Self::parse(&config_str)?;
            Ok((config, false))
        } else {
            let config = Self::default();
            config.save(config_path)?;
            Ok((config, true))
        }
    }

    pub fn parse(config_str: &str) -> Result<Self, FleetError> {
        toml::from_str(config_str).map_err(|e| FleetError::Config(e.to_string()))
    }

    pub fn save(&self, config_path: &str) -> Result<(), FleetError> {
        if let Some(parent) = Path::new(config_path).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let config_str = toml::to_string_pretty(self).map_err(|e| FleetError::Config(e.to_string()))?;
        fs::write(config_path, config_str)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), FleetError> {
        if self.api.max_requests_per_second == 0 {
            return Err(FleetError::Config("max_requests_per_second must be greater than 0".to_string()));
        }
        if self.api.request_timeout_seconds == 0 {
            return Err(FleetError::Config("request_timeout_seconds must be greater than 0".to_string()));
        }
        if self.api.token_env.trim().is_empty() {
            return Err(FleetError::Config("token_env must name an environment variable".to_string()));
        }
        if self.fleet.report_queue_capacity == 0 {
            return Err(FleetError::Config("report_queue_capacity must be greater than 0".to_string()));
        }
        if self.output.summary_interval_seconds == 0 {
            return Err(FleetError::Config("summary_interval_seconds must be greater than 0".to_string()));
        }
        if self.fleet.standby_seconds > MAX_STANDBY_SECONDS {
            return Err(FleetError::Config(format!("standby_seconds must be at most {}", MAX_STANDBY_SECONDS)));
        }
        Ok(())
    }

    /// Bearer token from the configured environment variable, falling back to
    /// the token file in the working directory.
    pub fn read_token(&self) -> Result<String, FleetError> {
        if let Ok(token) = std::env::var(&self.api.token_env) {
            if !token.trim().is_empty() {
                return Ok(token.trim().to_string());
            }
        }

        match fs::read_to_string(TOKEN_FILE) {
            Ok(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
            _ => Err(FleetError::Config(format!(
                "no credential: set {} or write the token to {}",
                self.api.token_env, TOKEN_FILE
            ))),
        }
    }

    pub fn print_summary(&self, log: &Logger) {
        o_info!(log, "📋 Configuration Summary:");
        o_info!(log, "   🌐 API: {}", self.api.base_url);
        o_info!(log, "   ⏱️ Rate limit: {}/s, timeout {}s", self.api.max_requests_per_second, self.api.request_timeout_seconds);
        o_info!(log, "   📬 Report queue: {}", self.fleet.report_queue_capacity);
        o_info!(log, "   💤 Standby: {}s", self.fleet.standby_seconds);
        o_info!(log, "   🏭 Requisition: {}", if self.fleet.run_requisition { "on" } else { "off" });
        o_info!(log, "   📝 Accept contracts: {}", if self.fleet.accept_contracts { "on" } else { "off" });
    }
}
