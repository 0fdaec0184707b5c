//! Configuration for report generation

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for the simulated data sources and the export path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// How long a memoized quote or sentiment reading stays valid
    pub cache_ttl: Duration,

    /// Simulated latency before generating a stock quote
    pub stock_latency: Duration,

    /// Simulated latency before generating an index quote
    pub index_latency: Duration,

    /// Simulated latency before generating a sentiment reading
    pub sentiment_latency: Duration,

    /// Simulated latency before returning news
    pub news_latency: Duration,

    /// Pause between two quotes of a batch request
    pub batch_pause: Duration,

    /// Directory the Markdown export is written to
    pub output_dir: PathBuf,

    /// Seed for reproducible data; `None` draws from the thread RNG
    pub seed: Option<u64>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            cache_ttl: Duration::from_secs(300), // 5 minutes
            stock_latency: Duration::from_millis(100),
            index_latency: Duration::from_millis(80),
            sentiment_latency: Duration::from_millis(150),
            news_latency: Duration::from_millis(300),
            batch_pause: Duration::from_millis(50),
            output_dir: PathBuf::from("."),
            seed: None,
        }
    }
}

impl ReportConfig {
    /// Create a new configuration builder
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Apply `MARKET_REPORT_*` environment overrides
    pub fn with_env_overrides(mut self) -> Result<Self> {
        if let Some(secs) = report_utils::env_var::<u64>("MARKET_REPORT_CACHE_TTL_SECS")? {
            self.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(dir) = report_utils::env_var::<PathBuf>("MARKET_REPORT_OUTPUT_DIR")? {
            self.output_dir = dir;
        }
        if let Some(seed) = report_utils::env_var::<u64>("MARKET_REPORT_SEED")? {
            self.seed = Some(seed);
        }
        if report_utils::env_flag("MARKET_REPORT_NO_LATENCY") {
            self = self.without_latency();
        }
        self.validate()?;
        Ok(self)
    }

    /// Zero every simulated delay
    pub fn without_latency(mut self) -> Self {
        self.stock_latency = Duration::ZERO;
        self.index_latency = Duration::ZERO;
        self.sentiment_latency = Duration::ZERO;
        self.news_latency = Duration::ZERO;
        self.batch_pause = Duration::ZERO;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.cache_ttl.is_zero() {
            return Err(ReportError::Config(
                "cache_ttl must be greater than 0".to_string(),
            ));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(ReportError::Config(
                "output_dir must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for ReportConfig
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    cache_ttl: Option<Duration>,
    stock_latency: Option<Duration>,
    index_latency: Option<Duration>,
    sentiment_latency: Option<Duration>,
    news_latency: Option<Duration>,
    batch_pause: Option<Duration>,
    output_dir: Option<PathBuf>,
    seed: Option<u64>,
    no_latency: bool,
}

impl ReportConfigBuilder {
    /// Set the memoization window
    pub fn cache_ttl(mut self, duration: Duration) -> Self {
        self.cache_ttl = Some(duration);
        self
    }

    /// Set the simulated stock latency
    pub fn stock_latency(mut self, duration: Duration) -> Self {
        self.stock_latency = Some(duration);
        self
    }

    /// Set the simulated index latency
    pub fn index_latency(mut self, duration: Duration) -> Self {
        self.index_latency = Some(duration);
        self
    }

    /// Set the simulated sentiment latency
    pub fn sentiment_latency(mut self, duration: Duration) -> Self {
        self.sentiment_latency = Some(duration);
        self
    }

    /// Set the simulated news latency
    pub fn news_latency(mut self, duration: Duration) -> Self {
        self.news_latency = Some(duration);
        self
    }

    /// Set the pause between batch requests
    pub fn batch_pause(mut self, duration: Duration) -> Self {
        self.batch_pause = Some(duration);
        self
    }

    /// Set the export directory
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Seed the random source
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Disable every simulated delay
    pub fn no_latency(mut self) -> Self {
        self.no_latency = true;
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<ReportConfig> {
        let defaults = ReportConfig::default();

        let mut config = ReportConfig {
            cache_ttl: self.cache_ttl.unwrap_or(defaults.cache_ttl),
            stock_latency: self.stock_latency.unwrap_or(defaults.stock_latency),
            index_latency: self.index_latency.unwrap_or(defaults.index_latency),
            sentiment_latency: self.sentiment_latency.unwrap_or(defaults.sentiment_latency),
            news_latency: self.news_latency.unwrap_or(defaults.news_latency),
            batch_pause: self.batch_pause.unwrap_or(defaults.batch_pause),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            seed: self.seed,
        };

        if self.no_latency {
            config = config.without_latency();
        }

        config.validate()?;
        Ok(config)
    }
}
