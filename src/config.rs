/**
* filename : config
* author : HAMA
* date: 2025. 6. 2.
* description:
**/

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::error::AnalyticsError;
use crate::models::trade::Verdict;

/// 기본 설정 파일 경로
pub const DEFAULT_CONFIG_PATH: &str = "analytics.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Account balance the equity curve starts from
    pub starting_balance: f64,
    /// Annual risk-free rate, converted to a per-day rate for Sharpe
    pub annual_risk_free_rate: f64,
    /// TTL for memoized results, in seconds
    pub cache_ttl_secs: u64,
    /// Minimum checklist percentage for an A+ verdict
    pub a_plus_threshold: f64,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl AnalyticsConfig {
    /// Load configuration from `analytics.json` in the working directory,
    /// falling back to defaults when the file is absent.
    pub fn load() -> Result<Self, AnalyticsError> {
        let config_path = Path::new(DEFAULT_CONFIG_PATH);

        let mut cfg = if config_path.exists() {
            Self::read_file(config_path)?
        } else {
            AnalyticsConfig::default()
        };
        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load configuration from an explicit file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, AnalyticsError> {
        let mut cfg = Self::read_file(path.as_ref())?;
        cfg.apply_env_overrides();
        cfg.validate()?;
        Ok(cfg)
    }

    fn read_file(path: &Path) -> Result<Self, AnalyticsError> {
        let mut file = File::open(path)
            .map_err(|e| AnalyticsError::ConfigError(format!("Failed to open config file: {}", e)))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|e| AnalyticsError::ConfigError(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| AnalyticsError::ConfigError(format!("Failed to parse config file: {}", e)))
    }

    /// Apply environment variable overrides for runtime fields
    fn apply_env_overrides(&mut self) {
        use std::env;
        if let Ok(v) = env::var("JOURNAL_STARTING_BALANCE") {
            match v.parse::<f64>() {
                Ok(balance) => self.starting_balance = balance,
                Err(_) => log::warn!("JOURNAL_STARTING_BALANCE 값 무시: {}", v),
            }
        }
        if let Ok(v) = env::var("JOURNAL_RISK_FREE_RATE") {
            match v.parse::<f64>() {
                Ok(rate) => self.annual_risk_free_rate = rate,
                Err(_) => log::warn!("JOURNAL_RISK_FREE_RATE 값 무시: {}", v),
            }
        }
        if let Ok(v) = env::var("JOURNAL_CACHE_TTL_SECS") {
            match v.parse::<u64>() {
                Ok(ttl) => self.cache_ttl_secs = ttl,
                Err(_) => log::warn!("JOURNAL_CACHE_TTL_SECS 값 무시: {}", v),
            }
        }
    }

    /// 설정된 기준으로 체크리스트 판정
    pub fn verdict_for(&self, score: u32, possible: u32, high_importance_complete: bool) -> Verdict {
        Verdict::derive(score, possible, high_importance_complete, self.a_plus_threshold)
    }

    pub fn validate(&self) -> Result<(), AnalyticsError> {
        if !self.starting_balance.is_finite() || self.starting_balance < 0.0 {
            return Err(AnalyticsError::ConfigError(format!(
                "starting_balance must be a non-negative number, got {}",
                self.starting_balance
            )));
        }
        if !self.annual_risk_free_rate.is_finite() {
            return Err(AnalyticsError::ConfigError(
                "annual_risk_free_rate must be finite".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.a_plus_threshold) {
            return Err(AnalyticsError::ConfigError(format!(
                "a_plus_threshold must be within 0..=100, got {}",
                self.a_plus_threshold
            )));
        }
        Ok(())
    }
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        AnalyticsConfig {
            starting_balance: 10_000.0,
            annual_risk_free_rate: 0.02,
            cache_ttl_secs: 300,
            a_plus_threshold: 80.0,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}
